use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Employees,
    Posts,
}

impl ActivePane {
    pub fn toggle(self) -> Self {
        match self {
            ActivePane::Employees => ActivePane::Posts,
            ActivePane::Posts => ActivePane::Employees,
        }
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub user_index: usize,
    /// Focused toggle button, as an index into the board's buttons.
    pub button_index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Refresh cycles spawned but not yet reported back.
    pub pending_refreshes: usize,
    pub last_refresh: Option<DateTime<Local>>,
    pub user_list_state: ListState,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut user_list_state = ListState::default();
        user_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Employees,
            user_index: 0,
            button_index: 0,
            should_quit: false,
            status_message: None,
            pending_refreshes: 0,
            last_refresh: None,
            user_list_state,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_refreshes > 0
    }

    /// Move the cursor of the active pane up.
    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Employees => {
                self.user_index = self.user_index.saturating_sub(1);
                self.user_list_state.select(Some(self.user_index));
            }
            ActivePane::Posts => {
                self.button_index = self.button_index.saturating_sub(1);
            }
        }
    }

    /// Move the cursor of the active pane down, given how many users and
    /// buttons there are.
    pub fn move_down(&mut self, users: usize, buttons: usize) {
        match self.active_pane {
            ActivePane::Employees => {
                if self.user_index + 1 < users {
                    self.user_index += 1;
                    self.user_list_state.select(Some(self.user_index));
                }
            }
            ActivePane::Posts => {
                if self.button_index + 1 < buttons {
                    self.button_index += 1;
                }
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
