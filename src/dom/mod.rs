//! Headless UI tree.
//!
//! Content is built off-tree as [`Element`]s and [`Fragment`]s, then mounted
//! into a [`Document`] in one step. Mounted nodes are addressed by
//! [`NodeId`] and may carry click listeners identified by [`HandlerId`].

pub mod document;
pub mod node;

pub use document::{ClickAction, Document, HandlerId, Listener, NodeData, NodeId};
pub use node::{Element, Fragment, Tag};

/// Class marking a hidden node.
pub const HIDDEN_CLASS: &str = "hide";
