use crate::app::{AppContext, PostboardError, Result};
use crate::domain::{PostId, UserId};
use crate::render::RefreshOutcome;

pub async fn list_users(ctx: &AppContext) -> Result<()> {
    let users = ctx.provider.list_users().await;

    if users.is_empty() {
        println!("No users");
        return Ok(());
    }

    for user in users {
        println!("{:>3}  {}  ({})", user.id, user.name, user.company.name);
    }

    Ok(())
}

/// Run one refresh cycle for `user_id`, click the toggles of `expand`, and
/// print the resulting tree.
pub async fn show_posts(ctx: &AppContext, user_id: UserId, expand: &[PostId]) -> Result<()> {
    if user_id == 0 {
        return Err(PostboardError::UserNotFound(user_id));
    }

    let outcome = ctx.controller.on_selection_change(Some(user_id)).await;
    if let RefreshOutcome::Rendered { posts, .. } = outcome {
        tracing::debug!(user_id, posts, "Rendered posts");
    }

    let mut board = ctx.board().lock().await;
    for &post_id in expand {
        if board.click_post(post_id).is_empty() {
            eprintln!("Post {} is not rendered for user {}", post_id, user_id);
        }
    }

    let container = board.document.container();
    print!("{}", board.document.outline(container));
    Ok(())
}
