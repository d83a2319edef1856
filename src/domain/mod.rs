pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::Post;
pub use user::{Company, User};

/// Identifier of a user. Zero is treated as "no user".
pub type UserId = u64;

/// Identifier of a post. Zero is treated as "no post".
pub type PostId = u64;
