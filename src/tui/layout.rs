use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::dom::{Document, NodeId, Tag};
use crate::render::Board;
use crate::tui::app::{ActivePane, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, board: &Board, colors: &ColorConfig) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    render_employees_pane(frame, app, board, panes[0], colors);
    render_posts_pane(frame, app, board, panes[1], colors);
    render_status_bar(frame, app, rows[1], colors);
}

fn border_style(app: &TuiApp, pane: ActivePane, colors: &ColorConfig) -> Style {
    if app.active_pane == pane {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_employees_pane(
    frame: &mut Frame,
    app: &mut TuiApp,
    board: &Board,
    area: Rect,
    colors: &ColorConfig,
) {
    let selected = board.select_menu.selected();
    let items: Vec<ListItem> = board
        .select_menu
        .options()
        .iter()
        .map(|option| {
            let marker = if Some(option.value) == selected { "●" } else { " " };
            ListItem::new(format!("{} {}", marker, option.label))
        })
        .collect();

    let highlight_style = if app.active_pane == ActivePane::Employees {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    };

    let block = Block::default()
        .title(format!(" Employees ({}) ", board.select_menu.options().len()))
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Employees, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.user_list_state);
}

fn render_posts_pane(frame: &mut Frame, app: &TuiApp, board: &Board, area: Rect, colors: &ColorConfig) {
    let focused = board
        .buttons()
        .get(app.button_index)
        .map(|&(button, _)| button);

    let mut lines = Vec::new();
    let mut focused_line = 0;
    let doc = &board.document;

    for &node in doc.children(doc.container()) {
        let Some(data) = doc.node(node) else {
            continue;
        };
        match data.tag {
            Tag::Article => {
                if let Some(line) = card_lines(doc, node, focused, colors, &mut lines) {
                    focused_line = line;
                }
                lines.push(Line::from(""));
            }
            _ => lines.push(Line::from(Span::styled(
                data.text.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ))),
        }
    }

    // Keep the focused button roughly centered.
    let scroll = focused_line.saturating_sub(usize::from(area.height / 2));
    let title = format!(" Posts ({}) ", board.post_count());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Posts, colors));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

/// Push the lines of one post card. Returns the line index of the focused
/// button if it belongs to this card.
fn card_lines(
    doc: &Document,
    card: NodeId,
    focused: Option<NodeId>,
    colors: &ColorConfig,
    lines: &mut Vec<Line<'static>>,
) -> Option<usize> {
    let mut focused_line = None;

    for &child in doc.children(card) {
        let Some(data) = doc.node(child) else {
            continue;
        };
        match data.tag {
            Tag::H2 => lines.push(Line::from(Span::styled(
                data.text.clone(),
                Style::default()
                    .fg(colors.post_title)
                    .add_modifier(Modifier::BOLD),
            ))),
            Tag::Button => {
                let style = if Some(child) == focused {
                    focused_line = Some(lines.len());
                    Style::default()
                        .bg(colors.selection_bg_active)
                        .fg(colors.selection_fg_active)
                } else {
                    Style::default().add_modifier(Modifier::REVERSED)
                };
                lines.push(Line::from(Span::styled(format!("[ {} ]", data.text), style)));
            }
            Tag::Section if !data.is_hidden() => comment_lines(doc, child, colors, lines),
            Tag::Section => {}
            _ if data.text.starts_with("Author:") => lines.push(Line::from(Span::styled(
                data.text.clone(),
                Style::default().fg(colors.author),
            ))),
            _ => lines.push(Line::from(data.text.clone())),
        }
    }

    focused_line
}

fn comment_lines(doc: &Document, section: NodeId, colors: &ColorConfig, lines: &mut Vec<Line<'static>>) {
    let comments = doc.children(section);
    if comments.is_empty() {
        lines.push(Line::from("  (no comments)"));
        return;
    }

    for &comment in comments {
        for &part in doc.children(comment) {
            let Some(data) = doc.node(part) else {
                continue;
            };
            let style = match data.tag {
                Tag::H3 => Style::default().add_modifier(Modifier::BOLD),
                _ if data.text.starts_with("From:") => Style::default().fg(colors.comment_email),
                _ => Style::default(),
            };
            lines.push(Line::from(vec![
                Span::raw("  │ "),
                Span::styled(data.text.clone(), style),
            ]));
        }
        lines.push(Line::from("  │"));
    }
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.is_loading() {
        "Loading posts...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "j/k:Nav  Tab:Pane  Enter:Select  Space:Comments  R:Reload  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
