use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::UserId;
use crate::render::board::Board;
use crate::render::pipeline::RenderPipeline;

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cycle's content was mounted.
    Rendered {
        generation: u64,
        user_id: UserId,
        posts: usize,
    },
    /// A newer cycle started before this one finished; its content was
    /// discarded.
    Superseded { generation: u64, user_id: UserId },
}

impl RefreshOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RefreshOutcome::Rendered { .. })
    }
}

/// Drives a refresh cycle for every change of the selected employee.
///
/// The board lock is only taken around the synchronous clear and mount
/// steps, never across a fetch.
#[derive(Clone)]
pub struct SelectionController {
    pipeline: RenderPipeline,
    board: Arc<Mutex<Board>>,
    generation: Arc<AtomicU64>,
}

impl SelectionController {
    pub fn new(pipeline: RenderPipeline, board: Arc<Mutex<Board>>) -> Self {
        Self {
            pipeline,
            board,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn board(&self) -> &Arc<Mutex<Board>> {
        &self.board
    }

    /// Generation of the most recently started cycle.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Load the employee list into the select menu.
    pub async fn init(&self) -> usize {
        let users = self.pipeline.provider().list_users().await;
        let added = self.board.lock().await.select_menu.populate(&users);
        tracing::info!(users = added, "Populated employee list");
        added
    }

    /// Run one refresh cycle for the selected employee.
    ///
    /// A missing or zero id falls back to the first employee in the menu.
    pub async fn on_selection_change(&self, selected: Option<UserId>) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let user_id = {
            let mut board = self.board.lock().await;
            let user_id = board.select_menu.resolve(selected);
            board.select_menu.select(user_id);
            board.begin_refresh();
            user_id
        };
        tracing::debug!(generation, user_id, "Refresh started");

        let fragment = self.pipeline.render_posts_for_user(user_id).await;

        let mut board = self.board.lock().await;
        if self.generation() != generation {
            tracing::debug!(generation, user_id, "Refresh superseded, discarding");
            return RefreshOutcome::Superseded {
                generation,
                user_id,
            };
        }

        let posts = board.finish_refresh(fragment);
        tracing::info!(generation, user_id, posts, "Refresh complete");
        RefreshOutcome::Rendered {
            generation,
            user_id,
            posts,
        }
    }
}
