use crate::dom::{ClickAction, Document, Fragment, NodeId, Tag};
use crate::domain::PostId;
use crate::render::listeners::ListenerRegistry;
use crate::render::select::SelectMenu;
use crate::render::toggle::{ToggleController, ToggleState};

/// Everything on screen: the employee picker, the rendered posts, their
/// toggle states and the handlers wired to them.
#[derive(Default)]
pub struct Board {
    pub document: Document,
    pub select_menu: SelectMenu,
    pub toggles: ToggleController,
    pub listeners: ListenerRegistry,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous cycle's handlers, views and toggle states.
    pub fn begin_refresh(&mut self) {
        self.listeners.detach_all(&mut self.document);
        let container = self.document.container();
        self.document.clear_children(container);
        self.toggles.reset();
    }

    /// Mount a cycle's content in one append, then wire its buttons.
    pub fn finish_refresh(&mut self, fragment: Option<Fragment>) -> usize {
        if let Some(fragment) = fragment {
            let container = self.document.container();
            self.document.append_fragment(container, fragment);
        }
        self.listeners.attach_all(&mut self.document);
        self.post_count()
    }

    /// Fire the click listeners of `node`.
    pub fn click(&mut self, node: NodeId) -> Vec<Option<ToggleState>> {
        self.document
            .click_actions(node)
            .into_iter()
            .map(|action| match action {
                ClickAction::ToggleComments(post_id) => {
                    self.toggles.toggle(&mut self.document, post_id)
                }
            })
            .collect()
    }

    /// Click the toggle button of `post_id`, if it is rendered.
    pub fn click_post(&mut self, post_id: PostId) -> Vec<Option<ToggleState>> {
        match self.document.query_by_post_id(Tag::Button, post_id) {
            Some(button) => self.click(button),
            None => Vec::new(),
        }
    }

    /// Rendered post cards.
    pub fn post_cards(&self) -> Vec<NodeId> {
        let container = self.document.container();
        self.document
            .children(container)
            .iter()
            .copied()
            .filter(|&id| {
                self.document
                    .node(id)
                    .is_some_and(|node| node.tag == Tag::Article)
            })
            .collect()
    }

    pub fn post_count(&self) -> usize {
        self.post_cards().len()
    }

    /// Toggle buttons in document order, paired with their post.
    pub fn buttons(&self) -> Vec<(NodeId, PostId)> {
        let container = self.document.container();
        self.document
            .query_all(container, Tag::Button)
            .into_iter()
            .filter_map(|id| {
                self.document
                    .node(id)
                    .and_then(|node| node.post_id)
                    .map(|post_id| (id, post_id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::render::comments::build_comment_section;
    use crate::render::toggle::{HIDE_COMMENTS, SHOW_COMMENTS};

    fn cards(ids: &[PostId]) -> Fragment {
        ids.iter()
            .map(|&id| {
                Element::new(Tag::Article)
                    .child(Element::text(Tag::Button, SHOW_COMMENTS).post_id(id))
                    .child(build_comment_section(id, &[]))
            })
            .collect()
    }

    #[test]
    fn test_click_toggles_through_listener() {
        let mut board = Board::new();
        board.finish_refresh(Some(cards(&[1, 2])));

        let results = board.click_post(2);
        assert_eq!(results.len(), 1);
        assert!(results[0].unwrap().is_visible());

        let button = board.document.query_by_post_id(Tag::Button, 2).unwrap();
        assert_eq!(board.document.node(button).unwrap().text, HIDE_COMMENTS);
    }

    #[test]
    fn test_click_without_listeners_does_nothing() {
        let mut board = Board::new();
        let container = board.document.container();
        board.document.append_fragment(container, cards(&[1]));

        assert!(board.click_post(1).is_empty());
        assert!(!board.toggles.state(1).is_visible());
    }

    #[test]
    fn test_refresh_replaces_views_and_handlers() {
        let mut board = Board::new();
        assert_eq!(board.finish_refresh(Some(cards(&[1, 2]))), 2);
        board.click_post(1);

        board.begin_refresh();
        assert_eq!(board.post_count(), 0);
        assert_eq!(board.document.listener_count(), 0);
        assert!(board.listeners.is_empty());

        assert_eq!(board.finish_refresh(Some(cards(&[3]))), 1);
        assert_eq!(board.document.listener_count(), 1);
        let posts: Vec<_> = board.buttons().into_iter().map(|(_, id)| id).collect();
        assert_eq!(posts, vec![3]);
        assert!(!board.toggles.state(1).is_visible());
    }

    #[test]
    fn test_single_click_flips_once() {
        let mut board = Board::new();
        board.finish_refresh(Some(cards(&[1])));
        board.begin_refresh();
        board.finish_refresh(Some(cards(&[1])));

        // One handler per button, so one click is one flip.
        let results = board.click_post(1);
        assert_eq!(results.len(), 1);
        assert!(board.toggles.state(1).is_visible());
    }
}
