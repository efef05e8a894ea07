use std::time::Duration;

use tango_types::{AppEvent, UiEvent};
use tokio::time::timeout;

use super::fakes::{FakeWords, Harness};
use crate::events::{Flow, event_loop, handle_events};

fn drain_notices(h: &Harness) -> Vec<String> {
    let mut notices = Vec::new();
    while let Ok(Some(event)) = h.ui_rx.try_recv() {
        if let AppEvent::Notice(message) = event {
            notices.push(message);
        }
    }
    notices
}

#[tokio::test]
async fn close_ends_the_loop() {
    let h = Harness::new(FakeWords::new());

    let flow = handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::Close)).await;
    assert_eq!(flow, Flow::Exit);

    let flow = handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::Help)).await;
    assert_eq!(flow, Flow::Continue);
}

#[tokio::test]
async fn dismiss_clears_the_quota_banner() {
    let h = Harness::new(FakeWords::new());
    h.ctx.state.notices.write().await.quota_notice = true;

    handle_events(
        &h.ctx,
        None,
        AppEvent::UiEvent(UiEvent::DismissQuotaNotice),
    )
    .await;

    assert!(!h.ctx.state.view().await.quota_notice);
}

#[tokio::test]
async fn export_without_anki_reports_it() {
    let h = Harness::with_saved(FakeWords::new(), 1, 0);

    handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::ExportCard)).await;

    assert_eq!(
        drain_notices(&h),
        vec!["Anki export is disabled in the profile".to_string()]
    );
}

#[tokio::test]
async fn next_event_moves_through_saved_cards() {
    let h = Harness::with_saved(FakeWords::new(), 3, 0);

    handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::Next)).await;
    handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::Next)).await;
    handle_events(&h.ctx, None, AppEvent::UiEvent(UiEvent::Previous)).await;

    assert_eq!(h.index().await, Some(1));
    assert_eq!(h.words.calls(), 0);
}

#[tokio::test]
async fn event_loop_starts_a_fresh_session_and_exits_on_close() {
    let h = Harness::new(FakeWords::new());
    let (tx, rx) = kanal::unbounded_async();

    let ctx = h.ctx.clone();
    let task = tokio::spawn(async move { event_loop(ctx, rx, None).await });

    let first = timeout(Duration::from_secs(2), h.ui_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(first, AppEvent::BackendReady));

    // Wait for the startup fetch to land before closing
    timeout(Duration::from_secs(2), async {
        while h.len().await == 0 || h.ctx.state.session.is_fetching() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    tx.send(AppEvent::UiEvent(UiEvent::Close)).await.unwrap();
    timeout(Duration::from_secs(2), task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert_eq!(h.words.calls(), 1);
    assert_eq!(h.index().await, Some(0));
}
