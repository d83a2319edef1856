pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::domain::UserId;
use crate::render::{RefreshOutcome, SelectionController};

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run a refresh cycle in the background and report its outcome.
fn spawn_refresh(
    controller: &SelectionController,
    selected: Option<UserId>,
    tx: &mpsc::UnboundedSender<RefreshOutcome>,
    tui_app: &mut TuiApp,
) {
    let controller = controller.clone();
    let tx = tx.clone();
    tui_app.pending_refreshes += 1;

    tokio::spawn(async move {
        let outcome = controller.on_selection_change(selected).await;
        let _ = tx.send(outcome);
    });
}

fn apply_outcome(tui_app: &mut TuiApp, outcome: RefreshOutcome) {
    tui_app.pending_refreshes = tui_app.pending_refreshes.saturating_sub(1);

    if let RefreshOutcome::Rendered { user_id, posts, .. } = outcome {
        let now = Local::now();
        tui_app.button_index = 0;
        tui_app.last_refresh = Some(now);
        tui_app.set_status(format!(
            "Loaded {} posts for employee {} at {}",
            posts,
            user_id,
            now.format("%H:%M:%S")
        ));
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = &ctx.controller;
    let keybindings = &ctx.config.keybindings;

    // Load the employee list, then show the first one
    controller.init().await;
    spawn_refresh(controller, None, &tx, &mut tui_app);

    loop {
        while let Ok(outcome) = rx.try_recv() {
            apply_outcome(&mut tui_app, outcome);
        }

        {
            let board = ctx.board().lock().await;
            terminal.draw(|frame| layout::render(frame, &mut tui_app, &board, &ctx.config.colors))?;
        }

        let AppEvent::Key(key) = event_handler.next()? else {
            continue;
        };

        match keybindings.get_action(&key) {
            Action::Quit => {
                tui_app.should_quit = true;
            }
            Action::MoveUp => {
                tui_app.move_up();
            }
            Action::MoveDown => {
                let board = ctx.board().lock().await;
                tui_app.move_down(board.select_menu.options().len(), board.buttons().len());
            }
            Action::NextPane | Action::PrevPane => {
                tui_app.active_pane = tui_app.active_pane.toggle();
            }
            Action::Select if tui_app.active_pane == ActivePane::Employees => {
                let selected = {
                    let board = ctx.board().lock().await;
                    board.select_menu.options().get(tui_app.user_index).map(|o| o.value)
                };
                spawn_refresh(controller, selected, &tx, &mut tui_app);
            }
            Action::Select | Action::ToggleComments => {
                let mut board = ctx.board().lock().await;
                let focused = board.buttons().get(tui_app.button_index).copied();
                if let Some((button, post_id)) = focused {
                    let toggled = board.click(button);
                    tracing::debug!(post_id, clicks = toggled.len(), "Toggled comments");
                }
            }
            Action::Refresh => {
                let selected = ctx.board().lock().await.select_menu.selected();
                spawn_refresh(controller, selected, &tx, &mut tui_app);
            }
            Action::None => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}
