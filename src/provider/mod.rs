pub mod http_provider;
pub mod memory;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Comment, Post, PostId, User, UserId};

pub use http_provider::HttpProvider;
pub use memory::MemoryProvider;

/// Read-only access to users, posts, authors and comments.
///
/// Every operation fails soft: a retrieval failure is logged by the
/// implementation and surfaces as an empty result, never as an error.
/// A zero id returns an empty result without issuing a request.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_users(&self) -> Vec<User>;

    async fn list_user_posts(&self, user_id: UserId) -> Vec<Post>;

    async fn get_user(&self, user_id: UserId) -> Option<User>;

    async fn list_post_comments(&self, post_id: PostId) -> Vec<Comment>;
}

/// Log a failed retrieval and degrade it to `None`.
pub(crate) fn fail_soft<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(operation, "Retrieval failed: {}", e);
            None
        }
    }
}
