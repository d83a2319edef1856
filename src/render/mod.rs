pub mod board;
pub mod comments;
pub mod listeners;
pub mod pipeline;
pub mod select;
pub mod selection;
pub mod toggle;

pub use board::Board;
pub use comments::{build_comment_section, build_comments_fragment};
pub use listeners::ListenerRegistry;
pub use pipeline::{Enrichment, RenderPipeline};
pub use select::{SelectMenu, SelectOption};
pub use selection::{RefreshOutcome, SelectionController};
pub use toggle::{ToggleController, ToggleState, Visibility};
