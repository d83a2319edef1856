use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::dom::{Element, Fragment, Tag};
use crate::domain::{Comment, Post, User, UserId};
use crate::provider::DataProvider;
use crate::render::comments::build_comment_section;
use crate::render::toggle::Visibility;

pub const PLACEHOLDER_TEXT: &str = "Select an Employee to display their posts.";
pub const PLACEHOLDER_CLASS: &str = "default-text";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Posts enriched at once in concurrent mode.
pub const DEFAULT_WORKERS: usize = 10;

/// How per-post author and comment lookups are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enrichment {
    /// One post at a time; at most one author lookup in flight.
    #[default]
    Sequential,
    /// Up to `workers` posts at once; results are still built in post order.
    Concurrent,
}

struct EnrichedPost {
    post: Post,
    author: Option<User>,
    comments: Vec<Comment>,
}

/// Fetches a user's posts and builds them into a single fragment.
#[derive(Clone)]
pub struct RenderPipeline {
    provider: Arc<dyn DataProvider>,
    enrichment: Enrichment,
    workers: usize,
}

impl RenderPipeline {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self::with_enrichment(provider, Enrichment::default())
    }

    pub fn with_enrichment(provider: Arc<dyn DataProvider>, enrichment: Enrichment) -> Self {
        Self {
            provider,
            enrichment,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Cap the number of posts enriched at once in concurrent mode.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn provider(&self) -> &Arc<dyn DataProvider> {
        &self.provider
    }

    pub fn enrichment(&self) -> Enrichment {
        self.enrichment
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Build the content for `user_id`'s posts.
    ///
    /// Returns `None` for a zero id. A user without posts yields the
    /// placeholder paragraph instead of cards. The caller mounts the result
    /// into an already cleared container.
    pub async fn render_posts_for_user(&self, user_id: UserId) -> Option<Fragment> {
        if user_id == 0 {
            return None;
        }

        let posts = self.provider.list_user_posts(user_id).await;
        if posts.is_empty() {
            tracing::debug!(user_id, "No posts, rendering placeholder");
            return Some(Fragment::from(placeholder()));
        }

        let enriched = match self.enrichment {
            Enrichment::Sequential => {
                let mut enriched = Vec::with_capacity(posts.len());
                for post in posts {
                    enriched.push(self.enrich(post).await);
                }
                enriched
            }
            // buffered yields outputs in input order
            Enrichment::Concurrent => {
                stream::iter(posts)
                    .map(|post| self.enrich(post))
                    .buffered(self.workers)
                    .collect::<Vec<_>>()
                    .await
            }
        };

        Some(enriched.iter().map(build_post_card).collect())
    }

    async fn enrich(&self, post: Post) -> EnrichedPost {
        let author = self.provider.get_user(post.user_id).await;
        let comments = self.provider.list_post_comments(post.id).await;
        EnrichedPost {
            post,
            author,
            comments,
        }
    }
}

pub fn placeholder() -> Element {
    Element::text(Tag::P, PLACEHOLDER_TEXT).class(PLACEHOLDER_CLASS)
}

fn build_post_card(enriched: &EnrichedPost) -> Element {
    let EnrichedPost {
        post,
        author,
        comments,
    } = enriched;

    let (byline, catch_phrase) = match author {
        Some(author) => (author.byline(), author.company.catch_phrase.clone()),
        None => (format!("Author: {}", UNKNOWN_AUTHOR), String::new()),
    };

    Element::new(Tag::Article)
        .child(Element::text(Tag::H2, post.title.as_str()))
        .child(Element::text(Tag::P, post.body.as_str()))
        .child(Element::text(Tag::P, format!("Post ID: {}", post.id)))
        .child(Element::text(Tag::P, byline))
        .child(Element::text(Tag::P, catch_phrase))
        .child(Element::text(Tag::Button, Visibility::Hidden.button_label()).post_id(post.id))
        .child(build_comment_section(post.id, comments))
}
