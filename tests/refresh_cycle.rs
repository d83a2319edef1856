use std::sync::Arc;
use std::time::Duration;

use postboard::app::AppContext;
use postboard::config::Config;
use postboard::dom::Tag;
use postboard::domain::{Comment, Post, User};
use postboard::provider::MemoryProvider;
use postboard::render::pipeline::PLACEHOLDER_TEXT;
use postboard::render::toggle::{HIDE_COMMENTS, SHOW_COMMENTS};
use postboard::render::{Enrichment, RefreshOutcome};

fn fixture() -> MemoryProvider {
    MemoryProvider::new()
        .with_users([
            User::new(1, "Leanne Graham").with_company("Romaguera-Crona", "Neural nets"),
            User::new(2, "Ervin Howell").with_company("Deckow-Crist", "Proactive"),
            User::new(3, "Clementine Bauch"),
        ])
        .with_posts([
            Post::new(1, 1, "P1", "first"),
            Post::new(2, 1, "P2", "second"),
            Post::new(11, 2, "Q1", "third"),
            Post::new(12, 2, "Q2", "fourth"),
        ])
        .with_comments([
            Comment::new(1, 1, "A", "b1", "a@x"),
            Comment::new(2, 11, "B", "b2", "b@x"),
        ])
}

fn context(provider: MemoryProvider, enrichment: Enrichment) -> AppContext {
    let mut config = Config::default();
    config.render.enrichment = enrichment;
    AppContext::with_provider(config, Arc::new(provider))
}

async fn card_titles(ctx: &AppContext) -> Vec<String> {
    let board = ctx.board().lock().await;
    board
        .post_cards()
        .into_iter()
        .map(|card| {
            let title = board.document.children(card)[0];
            board.document.node(title).unwrap().text.clone()
        })
        .collect()
}

#[tokio::test]
async fn select_then_switch_leaves_only_second_users_posts() {
    let ctx = context(fixture(), Enrichment::Sequential);
    assert_eq!(ctx.controller.init().await, 3);

    ctx.controller.on_selection_change(Some(1)).await;
    assert_eq!(card_titles(&ctx).await, vec!["P1", "P2"]);

    ctx.controller.on_selection_change(Some(2)).await;
    assert_eq!(card_titles(&ctx).await, vec!["Q1", "Q2"]);

    let board = ctx.board().lock().await;
    let posts: Vec<_> = board.buttons().into_iter().map(|(_, id)| id).collect();
    assert_eq!(posts, vec![11, 12]);
    assert_eq!(board.document.listener_count(), 2);
    for (button, _) in board.buttons() {
        assert_eq!(board.document.listeners(button).len(), 1);
    }
}

#[tokio::test]
async fn repeated_refreshes_never_accumulate_handlers() {
    let ctx = context(fixture(), Enrichment::Sequential);
    for _ in 0..3 {
        ctx.controller.on_selection_change(Some(1)).await;
    }

    let mut board = ctx.board().lock().await;
    assert_eq!(board.document.listener_count(), 2);

    // One click flips exactly once.
    let results = board.click_post(1);
    assert_eq!(results.len(), 1);
    let button = board.document.query_by_post_id(Tag::Button, 1).unwrap();
    assert_eq!(board.document.node(button).unwrap().text, HIDE_COMMENTS);
}

#[tokio::test]
async fn toggle_reveals_comments_and_refresh_hides_them_again() {
    let ctx = context(fixture(), Enrichment::Sequential);
    ctx.controller.on_selection_change(Some(1)).await;

    {
        let mut board = ctx.board().lock().await;
        board.click_post(1);
        let section = board.document.query_by_post_id(Tag::Section, 1).unwrap();
        assert!(!board.document.node(section).unwrap().is_hidden());
        let text = board.document.text_content(section);
        assert!(text.contains("b1"));
        assert!(text.contains("From: a@x"));
    }

    ctx.controller.on_selection_change(Some(1)).await;
    let board = ctx.board().lock().await;
    let section = board.document.query_by_post_id(Tag::Section, 1).unwrap();
    let button = board.document.query_by_post_id(Tag::Button, 1).unwrap();
    assert!(board.document.node(section).unwrap().is_hidden());
    assert_eq!(board.document.node(button).unwrap().text, SHOW_COMMENTS);
}

#[tokio::test]
async fn employee_without_posts_gets_placeholder_only() {
    let ctx = context(fixture(), Enrichment::Sequential);
    ctx.controller.on_selection_change(Some(3)).await;

    let board = ctx.board().lock().await;
    let container = board.document.container();
    let children = board.document.children(container);
    assert_eq!(children.len(), 1);
    assert_eq!(board.document.node(children[0]).unwrap().text, PLACEHOLDER_TEXT);
    assert_eq!(board.post_count(), 0);
}

#[tokio::test]
async fn slow_author_lookups_keep_post_order_in_both_modes() {
    for enrichment in [Enrichment::Sequential, Enrichment::Concurrent] {
        let provider =
            fixture().with_author_delays([Duration::from_millis(50), Duration::from_millis(1)]);
        let ctx = context(provider, enrichment);
        ctx.controller.on_selection_change(Some(1)).await;
        assert_eq!(card_titles(&ctx).await, vec!["P1", "P2"], "{:?}", enrichment);
    }
}

#[tokio::test]
async fn overtaken_selection_is_discarded() {
    let provider = fixture().with_posts_delay(1, Duration::from_millis(80));
    let ctx = Arc::new(context(provider, Enrichment::Sequential));

    let slow = {
        let ctx = ctx.clone();
        tokio::spawn(async move { ctx.controller.on_selection_change(Some(1)).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let fast = ctx.controller.on_selection_change(Some(2)).await;
    let slow = slow.await.unwrap();

    assert!(fast.is_rendered());
    assert!(matches!(slow, RefreshOutcome::Superseded { user_id: 1, .. }));
    assert_eq!(card_titles(&ctx).await, vec!["Q1", "Q2"]);
}

#[test]
fn blocking_harness_runs_a_cycle() {
    let ctx = context(fixture(), Enrichment::Sequential);
    let outcome = tokio_test::block_on(ctx.controller.on_selection_change(None));
    // No menu entries were loaded, so the cycle falls back to employee 1.
    assert!(matches!(outcome, RefreshOutcome::Rendered { user_id: 1, posts: 2, .. }));
}

#[tokio::test]
async fn configured_workers_bound_concurrent_author_lookups() {
    let posts: Vec<_> = (100..130).map(|id| Post::new(id, 3, format!("C{}", id), "b")).collect();
    let provider = Arc::new(
        fixture()
            .with_posts(posts)
            .with_author_delays(std::iter::repeat(Duration::from_millis(10)).take(30)),
    );

    let mut config = Config::default();
    config.render.enrichment = Enrichment::Concurrent;
    config.render.workers = 4;
    let ctx = AppContext::with_provider(config, provider.clone());

    let outcome = ctx.controller.on_selection_change(Some(3)).await;
    assert!(matches!(outcome, RefreshOutcome::Rendered { posts: 30, .. }));
    assert!(provider.peak_author_requests() <= 4);
    assert_eq!(card_titles(&ctx).await.last().map(String::as_str), Some("C129"));
}

#[tokio::test]
async fn many_refreshes_reuse_document_slots() {
    let ctx = context(fixture(), Enrichment::Sequential);
    ctx.controller.on_selection_change(Some(1)).await;
    let slots = ctx.board().lock().await.document.slot_count();

    for round in 0..200 {
        ctx.controller.on_selection_change(Some(1 + round % 2)).await;
    }
    ctx.controller.on_selection_change(Some(1)).await;

    assert_eq!(ctx.board().lock().await.document.slot_count(), slots);
}
