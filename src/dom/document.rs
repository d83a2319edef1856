use std::fmt::Write;

use crate::dom::node::{Element, Fragment, Tag};
use crate::dom::HIDDEN_CLASS;
use crate::domain::PostId;

/// Arena index plus the generation of the slot it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// What a click listener does when fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    ToggleComments(PostId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: HandlerId,
    pub action: ClickAction,
}

/// Attributes of a mounted node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub tag: Tag,
    pub text: String,
    pub classes: Vec<String>,
    pub post_id: Option<PostId>,
}

impl NodeData {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }
}

struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

/// Arena of mounted nodes rooted at a single `main` container.
///
/// Freed slots are reused for later mounts. Each reuse bumps the slot's
/// generation, so a stale [`NodeId`] never resolves to the new occupant.
pub struct Document {
    entries: Vec<Entry>,
    free: Vec<usize>,
    container: NodeId,
    next_handler: u64,
}

impl Document {
    pub fn new() -> Self {
        let root = Slot {
            data: NodeData {
                tag: Tag::Main,
                text: String::new(),
                classes: Vec::new(),
                post_id: None,
            },
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        };

        Self {
            entries: vec![Entry {
                generation: 0,
                slot: Some(root),
            }],
            free: Vec::new(),
            container: NodeId {
                index: 0,
                generation: 0,
            },
            next_handler: 1,
        }
    }

    /// The container that receives rendered content.
    pub fn container(&self) -> NodeId {
        self.container
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.entries
            .get(id.index)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_ref())
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.entries
            .get_mut(id.index)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_mut())
    }

    fn insert(&mut self, slot: Slot) -> NodeId {
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index];
            entry.slot = Some(slot);
            return NodeId {
                index,
                generation: entry.generation,
            };
        }

        self.entries.push(Entry {
            generation: 0,
            slot: Some(slot),
        });
        NodeId {
            index: self.entries.len() - 1,
            generation: 0,
        }
    }

    /// Mounted nodes, the container included.
    pub fn node_count(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    /// Arena slots allocated so far, free ones included.
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.slot(id).map(|slot| &slot.data)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|slot| slot.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map(|slot| slot.children.as_slice()).unwrap_or(&[])
    }

    /// Mount `element` and its subtree as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }

        let Element {
            tag,
            text,
            classes,
            post_id,
            children,
        } = element;

        let id = self.insert(Slot {
            data: NodeData {
                tag,
                text,
                classes,
                post_id,
            },
            parent: Some(parent),
            children: Vec::new(),
            listeners: Vec::new(),
        });
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(id);
        }

        for child in children {
            self.append(id, child);
        }

        Some(id)
    }

    /// Mount every element of `fragment` under `parent`, in order.
    pub fn append_fragment(&mut self, parent: NodeId, fragment: Fragment) -> Vec<NodeId> {
        fragment
            .into_elements()
            .into_iter()
            .filter_map(|element| self.append(parent, element))
            .collect()
    }

    /// Remove all children of `parent` together with their subtrees and
    /// listeners. Returns the number of direct children removed.
    pub fn clear_children(&mut self, parent: NodeId) -> usize {
        let children = match self.slot_mut(parent) {
            Some(slot) => std::mem::take(&mut slot.children),
            None => return 0,
        };

        for &child in &children {
            self.remove_subtree(child);
        }
        children.len()
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(entry) = self
                .entries
                .get_mut(next.index)
                .filter(|entry| entry.generation == next.generation)
            else {
                continue;
            };
            if let Some(slot) = entry.slot.take() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(next.index);
                stack.extend(slot.children);
            }
        }
    }

    /// Descendants of `scope` in document order, `scope` excluded.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        found
    }

    pub fn query_all(&self, scope: NodeId, tag: Tag) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.node(id).is_some_and(|node| node.tag == tag))
            .collect()
    }

    /// First node under the container with `tag` keyed by `post_id`.
    pub fn query_by_post_id(&self, tag: Tag, post_id: PostId) -> Option<NodeId> {
        self.descendants(self.container).into_iter().find(|&id| {
            self.node(id)
                .is_some_and(|node| node.tag == tag && node.post_id == Some(post_id))
        })
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        if let Some(node) = self.node(id) {
            if !node.text.is_empty() {
                parts.push(node.text.as_str());
            }
        }
        for descendant in self.descendants(id) {
            if let Some(node) = self.node(descendant) {
                if !node.text.is_empty() {
                    parts.push(node.text.as_str());
                }
            }
        }
        parts.join(" ")
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.data.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Add or remove `class` on a node.
    pub fn set_class(&mut self, id: NodeId, class: &str, present: bool) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };

        let classes = &mut slot.data.classes;
        let has = classes.iter().any(|c| c == class);
        if present && !has {
            classes.push(class.to_string());
        } else if !present && has {
            classes.retain(|c| c != class);
        }
        true
    }

    pub fn add_listener(&mut self, id: NodeId, action: ClickAction) -> Option<HandlerId> {
        let handler = HandlerId(self.next_handler);
        let slot = self.slot_mut(id)?;
        slot.listeners.push(Listener {
            id: handler,
            action,
        });
        self.next_handler += 1;
        Some(handler)
    }

    /// Remove exactly the listener `handler` from `id`.
    pub fn remove_listener(&mut self, id: NodeId, handler: HandlerId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };

        let before = slot.listeners.len();
        slot.listeners.retain(|listener| listener.id != handler);
        slot.listeners.len() != before
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] {
        self.slot(id).map(|slot| slot.listeners.as_slice()).unwrap_or(&[])
    }

    /// Listeners attached anywhere in the document.
    pub fn listener_count(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|entry| entry.slot.as_ref())
            .map(|slot| slot.listeners.len())
            .sum()
    }

    /// Actions a click on `id` would fire, in attachment order.
    pub fn click_actions(&self, id: NodeId) -> Vec<ClickAction> {
        self.listeners(id)
            .iter()
            .map(|listener| listener.action)
            .collect()
    }

    /// Indented plain-text outline of the subtree at `id`.
    ///
    /// Content of hidden nodes is summarized rather than printed.
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_outline(id, 0, &mut out);
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}{}", indent, node.tag);
        for class in &node.classes {
            let _ = write!(out, ".{}", class);
        }
        if let Some(post_id) = node.post_id {
            let _ = write!(out, "[post={}]", post_id);
        }
        if !node.text.is_empty() {
            let _ = write!(out, " {}", node.text);
        }

        let children = self.children(id);
        if node.is_hidden() && !children.is_empty() {
            let _ = writeln!(out, " ({} hidden)", children.len());
            return;
        }
        out.push('\n');

        for &child in children {
            self.write_outline(child, depth + 1, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(post_id: PostId) -> Element {
        Element::new(Tag::Article)
            .child(Element::text(Tag::H2, format!("title {}", post_id)))
            .child(Element::text(Tag::Button, "Show Comments").post_id(post_id))
            .child(
                Element::new(Tag::Section)
                    .class("comments")
                    .class(HIDDEN_CLASS)
                    .post_id(post_id)
                    .child(Element::text(Tag::P, "c")),
            )
    }

    #[test]
    fn test_append_fragment_preserves_order() {
        let mut doc = Document::new();
        let fragment: Fragment = [card(1), card(2), card(3)].into_iter().collect();
        let ids = doc.append_fragment(doc.container(), fragment);

        assert_eq!(doc.children(doc.container()), ids.as_slice());
        let titles: Vec<_> = ids
            .iter()
            .map(|&id| doc.node(doc.children(id)[0]).unwrap().text.clone())
            .collect();
        assert_eq!(titles, vec!["title 1", "title 2", "title 3"]);
    }

    #[test]
    fn test_query_by_post_id() {
        let mut doc = Document::new();
        doc.append_fragment(doc.container(), [card(1), card(2)].into_iter().collect());

        let button = doc.query_by_post_id(Tag::Button, 2).unwrap();
        assert_eq!(doc.node(button).unwrap().post_id, Some(2));
        assert!(doc.query_by_post_id(Tag::Section, 2).is_some());
        assert!(doc.query_by_post_id(Tag::Button, 3).is_none());
    }

    #[test]
    fn test_clear_children_removes_subtree_and_listeners() {
        let mut doc = Document::new();
        doc.append_fragment(doc.container(), [card(1), card(2)].into_iter().collect());
        let button = doc.query_by_post_id(Tag::Button, 1).unwrap();
        doc.add_listener(button, ClickAction::ToggleComments(1));

        assert_eq!(doc.clear_children(doc.container()), 2);
        assert!(doc.children(doc.container()).is_empty());
        assert!(!doc.contains(button));
        assert_eq!(doc.listener_count(), 0);
        assert!(doc.query_by_post_id(Tag::Button, 1).is_none());
    }

    #[test]
    fn test_stale_node_id_does_not_alias_reused_slot() {
        let mut doc = Document::new();
        let first = doc.append(doc.container(), card(1)).unwrap();
        doc.clear_children(doc.container());
        let second = doc.append(doc.container(), card(2)).unwrap();

        assert_ne!(first, second);
        assert!(!doc.contains(first));
        assert!(doc.node(first).is_none());
        assert!(!doc.set_text(first, "stale"));
        assert_eq!(doc.text_content(second), "title 2 Show Comments c");
    }

    #[test]
    fn test_arena_stays_bounded_across_refreshes() {
        let mut doc = Document::new();
        let cards = || (1..=10).map(card).collect::<Fragment>();

        doc.append_fragment(doc.container(), cards());
        let slots = doc.slot_count();
        for _ in 0..500 {
            doc.clear_children(doc.container());
            doc.append_fragment(doc.container(), cards());
        }

        assert_eq!(doc.slot_count(), slots);
        assert_eq!(doc.node_count(), slots);
        assert_eq!(doc.children(doc.container()).len(), 10);
    }

    #[test]
    fn test_remove_listener_removes_exact_handler() {
        let mut doc = Document::new();
        let button = doc.append(doc.container(), Element::new(Tag::Button)).unwrap();
        let a = doc.add_listener(button, ClickAction::ToggleComments(1)).unwrap();
        let b = doc.add_listener(button, ClickAction::ToggleComments(1)).unwrap();
        assert_ne!(a, b);

        assert!(doc.remove_listener(button, a));
        assert!(!doc.remove_listener(button, a));
        assert_eq!(doc.listeners(button).len(), 1);
        assert_eq!(doc.listeners(button)[0].id, b);
    }

    #[test]
    fn test_add_listener_to_missing_node() {
        let mut doc = Document::new();
        let button = doc.append(doc.container(), Element::new(Tag::Button)).unwrap();
        doc.clear_children(doc.container());
        assert!(doc.add_listener(button, ClickAction::ToggleComments(1)).is_none());
    }

    #[test]
    fn test_set_class() {
        let mut doc = Document::new();
        let section = doc.append(doc.container(), card(1)).unwrap();
        let section = doc.children(section)[2];
        assert!(doc.node(section).unwrap().is_hidden());

        doc.set_class(section, HIDDEN_CLASS, false);
        assert!(!doc.node(section).unwrap().is_hidden());
        assert!(doc.node(section).unwrap().has_class("comments"));

        doc.set_class(section, HIDDEN_CLASS, true);
        doc.set_class(section, HIDDEN_CLASS, true);
        assert_eq!(doc.node(section).unwrap().classes, vec!["comments", "hide"]);
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::new();
        let article = doc.append(doc.container(), card(7)).unwrap();
        assert_eq!(doc.text_content(article), "title 7 Show Comments c");
    }

    #[test]
    fn test_outline_summarizes_hidden_content() {
        let mut doc = Document::new();
        doc.append(doc.container(), card(1));
        let outline = doc.outline(doc.container());

        assert!(outline.starts_with("main\n"));
        assert!(outline.contains("  article\n"));
        assert!(outline.contains("    button[post=1] Show Comments\n"));
        assert!(outline.contains("    section.comments.hide[post=1] (1 hidden)\n"));
        assert!(!outline.contains("      p c"));
    }
}
