use std::collections::BTreeMap;

use crate::dom::{ClickAction, Document, HandlerId, NodeId, Tag};
use crate::domain::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration {
    button: NodeId,
    handler: HandlerId,
}

/// Click handlers installed on toggle buttons, keyed by post.
///
/// Detaching removes the exact handlers that attaching installed, so
/// handlers never pile up across refreshes.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    registrations: BTreeMap<PostId, Registration>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a toggle handler to every keyed button in the container.
    ///
    /// Buttons that already hold a registered handler are skipped. Returns the
    /// number of handlers installed.
    pub fn attach_all(&mut self, doc: &mut Document) -> usize {
        let mut attached = 0;

        for button in doc.query_all(doc.container(), Tag::Button) {
            let Some(post_id) = doc.node(button).and_then(|node| node.post_id) else {
                continue;
            };

            if let Some(existing) = self.registrations.get(&post_id).copied() {
                if existing.button == button {
                    continue;
                }
                doc.remove_listener(existing.button, existing.handler);
            }

            if let Some(handler) = doc.add_listener(button, ClickAction::ToggleComments(post_id)) {
                self.registrations
                    .insert(post_id, Registration { button, handler });
                attached += 1;
            }
        }

        tracing::debug!(attached, "Attached toggle handlers");
        attached
    }

    /// Remove every registered handler. Returns how many were still mounted.
    pub fn detach_all(&mut self, doc: &mut Document) -> usize {
        let detached = std::mem::take(&mut self.registrations)
            .into_values()
            .filter(|reg| doc.remove_listener(reg.button, reg.handler))
            .count();

        tracing::debug!(detached, "Detached toggle handlers");
        detached
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn handler_for(&self, post_id: PostId) -> Option<HandlerId> {
        self.registrations.get(&post_id).map(|reg| reg.handler)
    }
}
