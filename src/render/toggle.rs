use std::collections::HashMap;

use crate::dom::{Document, NodeId, Tag, HIDDEN_CLASS};
use crate::domain::PostId;

pub const SHOW_COMMENTS: &str = "Show Comments";
pub const HIDE_COMMENTS: &str = "Hide Comments";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn flip(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Visible,
            Visibility::Visible => Visibility::Hidden,
        }
    }

    /// Label of the toggle button while the section is in this state.
    pub fn button_label(self) -> &'static str {
        match self {
            Visibility::Hidden => SHOW_COMMENTS,
            Visibility::Visible => HIDE_COMMENTS,
        }
    }

    pub fn is_hidden(self) -> bool {
        self == Visibility::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    pub post_id: PostId,
    pub visibility: Visibility,
}

impl ToggleState {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Per-post comment visibility.
///
/// The section's hidden class and the button's label are both rendered from
/// the recorded [`Visibility`]; neither is read back from the tree.
#[derive(Debug, Default)]
pub struct ToggleController {
    states: HashMap<PostId, Visibility>,
}

impl ToggleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, post_id: PostId) -> ToggleState {
        ToggleState {
            post_id,
            visibility: self.states.get(&post_id).copied().unwrap_or_default(),
        }
    }

    /// Flip the comment section of `post_id`.
    ///
    /// Returns `None` without touching any state when the id is zero or the
    /// post's section or button is not rendered.
    pub fn toggle(&mut self, doc: &mut Document, post_id: PostId) -> Option<ToggleState> {
        if post_id == 0 {
            return None;
        }
        let section = doc.query_by_post_id(Tag::Section, post_id)?;
        let button = doc.query_by_post_id(Tag::Button, post_id)?;

        let visibility = self.state(post_id).visibility.flip();
        self.states.insert(post_id, visibility);
        apply(doc, section, button, visibility);

        Some(ToggleState {
            post_id,
            visibility,
        })
    }

    /// Forget every recorded state; all posts are hidden again.
    pub fn reset(&mut self) {
        self.states.clear();
    }
}

fn apply(doc: &mut Document, section: NodeId, button: NodeId, visibility: Visibility) {
    doc.set_class(section, HIDDEN_CLASS, visibility.is_hidden());
    doc.set_text(button, visibility.button_label());
}
