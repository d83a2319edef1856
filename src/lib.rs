//! # Postboard
//!
//! Pick an employee, read their posts, and expand each post's comment
//! thread on demand.
//!
//! ## Architecture
//!
//! ```text
//! SelectionController → RenderPipeline → DataProvider
//!                              ↓
//!                          Fragment → Board (Document, toggles, listeners)
//! ```
//!
//! Each change of the selected employee runs one refresh cycle: detach the
//! click handlers, clear the container, fetch and build every post into a
//! single fragment, mount it, attach fresh handlers. A generation counter
//! discards cycles overtaken by a newer selection.
//!
//! ## Quick Start
//!
//! ```bash
//! # List employees
//! postboard users
//!
//! # Print an employee's posts with the comments of post 3 expanded
//! postboard posts 1 --expand 3
//!
//! # Launch TUI
//! postboard tui
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/postboard/config.toml`.
pub mod config;

/// Headless UI tree the posts are rendered into.
pub mod dom;

/// Core domain models: [`User`](domain::User), [`Post`](domain::Post),
/// [`Comment`](domain::Comment).
pub mod domain;

/// Data retrieval.
///
/// - [`DataProvider`](provider::DataProvider): fail-soft async trait
/// - [`HttpProvider`](provider::HttpProvider): reqwest-based implementation
/// - [`MemoryProvider`](provider::MemoryProvider): in-memory implementation
pub mod provider;

/// Rendering and interaction: pipeline, comment panels, toggles, listener
/// lifecycle and selection handling.
pub mod render;

/// Terminal user interface.
///
/// Employees on the left, the rendered posts on the right. Enter selects an
/// employee, Space expands or collapses the focused post's comments.
pub mod tui;
