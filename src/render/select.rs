use crate::domain::{User, UserId};

/// Fallback selection when no option is available.
pub const DEFAULT_USER_ID: UserId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: UserId,
    pub label: String,
}

impl From<&User> for SelectOption {
    fn from(user: &User) -> Self {
        Self {
            value: user.id,
            label: user.name.clone(),
        }
    }
}

/// The employee picker.
#[derive(Debug, Clone, Default)]
pub struct SelectMenu {
    options: Vec<SelectOption>,
    selected: Option<UserId>,
}

impl SelectMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one option per user. Returns the number added.
    pub fn populate(&mut self, users: &[User]) -> usize {
        self.options.extend(users.iter().map(SelectOption::from));
        users.len()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn first(&self) -> Option<UserId> {
        self.options.first().map(|option| option.value)
    }

    pub fn selected(&self) -> Option<UserId> {
        self.selected
    }

    pub fn select(&mut self, user_id: UserId) {
        self.selected = Some(user_id);
    }

    /// The id a selection event resolves to: the event's own id, else the
    /// first option, else [`DEFAULT_USER_ID`].
    pub fn resolve(&self, requested: Option<UserId>) -> UserId {
        requested
            .filter(|&id| id != 0)
            .or_else(|| self.first())
            .unwrap_or(DEFAULT_USER_ID)
    }

    pub fn position(&self, user_id: UserId) -> Option<usize> {
        self.options.iter().position(|option| option.value == user_id)
    }
}
