use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Comment, Post, PostId, User, UserId};
use crate::provider::DataProvider;

/// In-memory provider with optional simulated latency.
///
/// Author lookups consume `author_delays` front to back, one delay per
/// `get_user` call, which makes it possible to have later lookups resolve
/// before earlier ones.
#[derive(Default)]
pub struct MemoryProvider {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    author_delays: Mutex<VecDeque<Duration>>,
    posts_delays: HashMap<UserId, Duration>,
    requests: AtomicUsize,
    authors_in_flight: AtomicUsize,
    peak_authors_in_flight: AtomicUsize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        self.users.extend(users);
        self
    }

    pub fn with_posts(mut self, posts: impl IntoIterator<Item = Post>) -> Self {
        self.posts.extend(posts);
        self
    }

    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments.extend(comments);
        self
    }

    pub fn with_author_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        if let Ok(mut queue) = self.author_delays.lock() {
            queue.extend(delays);
        }
        self
    }

    pub fn with_posts_delay(mut self, user_id: UserId, delay: Duration) -> Self {
        self.posts_delays.insert(user_id, delay);
        self
    }

    /// Total number of requests served, zero-id calls excluded.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Highest number of author lookups that were pending at the same time.
    pub fn peak_author_requests(&self) -> usize {
        self.peak_authors_in_flight.load(Ordering::SeqCst)
    }

    fn next_author_delay(&self) -> Option<Duration> {
        self.author_delays
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay.filter(|d| !d.is_zero()) {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl DataProvider for MemoryProvider {
    async fn list_users(&self) -> Vec<User> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.users.clone()
    }

    async fn list_user_posts(&self, user_id: UserId) -> Vec<Post> {
        if user_id == 0 {
            return Vec::new();
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        pause(self.posts_delays.get(&user_id).copied()).await;

        self.posts
            .iter()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn get_user(&self, user_id: UserId) -> Option<User> {
        if user_id == 0 {
            return None;
        }
        self.requests.fetch_add(1, Ordering::SeqCst);

        let in_flight = self.authors_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_authors_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);
        pause(self.next_author_delay()).await;
        self.authors_in_flight.fetch_sub(1, Ordering::SeqCst);

        let user = self.users.iter().find(|user| user.id == user_id).cloned();
        if user.is_none() {
            tracing::warn!(user_id, "Unknown user");
        }
        user
    }

    async fn list_post_comments(&self, post_id: PostId) -> Vec<Comment> {
        if post_id == 0 {
            return Vec::new();
        }
        self.requests.fetch_add(1, Ordering::SeqCst);

        self.comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect()
    }
}
