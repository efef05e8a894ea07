use std::sync::Arc;
use std::time::Duration;

use tango_core::MemoryStore;
use tango_generator::GenerateError;
use tango_types::ImageRef;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use super::fakes::{FakeWords, Harness, test_config};
use crate::fetcher::FetchError;

#[tokio::test]
async fn successful_fetch_appends_full_entry() {
    let h = Harness::new(FakeWords::new());

    let entry = h.ctx.fetch_next(false).await.unwrap();

    assert_eq!(entry.word, "word1");
    assert_eq!(entry.example_translation, "Eto slovo1.");
    assert_eq!(entry.image, ImageRef::from_base64("image/jpeg", "QUJD"));
    assert_eq!(h.len().await, 1);
    assert_eq!(h.index().await, Some(0));
    assert!(!h.ctx.state.session.is_fetching());
    assert_eq!(h.saved_index().as_deref(), Some("0"));
}

#[tokio::test]
async fn schema_error_leaves_store_untouched() {
    let words = FakeWords::new();
    words.push(Err(GenerateError::InvalidFormat("missing field `word`".into())));
    let h = Harness::with_saved(words, 2, 1);

    let err = h.ctx.fetch_next(true).await.unwrap_err();

    assert!(matches!(err, FetchError::Generate(GenerateError::InvalidFormat(_))));
    assert_eq!(h.len().await, 2);
    assert_eq!(h.index().await, Some(1));
    assert_eq!(h.images.calls(), 0);

    let notices = h.ctx.state.notices.read().await.clone();
    assert!(notices.error.unwrap().contains("Invalid format"));

    // Guard released, the next attempt goes through and clears the banner
    h.ctx.fetch_next(true).await.unwrap();
    assert_eq!(h.len().await, 3);
    assert!(h.ctx.state.notices.read().await.error.is_none());
}

#[tokio::test]
async fn second_fetch_is_rejected_while_first_runs() {
    let gate = Arc::new(Semaphore::new(0));
    let h = Harness::new(FakeWords::gated(gate.clone()));

    let handle = h.ctx.spawn_fetch(false).unwrap();

    assert!(matches!(h.ctx.spawn_fetch(true), Err(FetchError::Busy)));
    assert!(matches!(h.ctx.fetch_next(true).await, Err(FetchError::Busy)));
    assert!(h.ctx.state.session.is_fetching());
    assert_eq!(h.len().await, 0);

    gate.add_permits(1);
    timeout(Duration::from_secs(2), handle)
        .await
        .expect("fetch timed out")
        .unwrap()
        .unwrap();

    assert_eq!(h.words.calls(), 1);
    assert_eq!(h.len().await, 1);
    assert!(!h.ctx.state.session.is_fetching());
}

#[tokio::test]
async fn quota_error_stops_image_requests_for_the_session() {
    let h = Harness::new(FakeWords::new());
    h.images.push(Err(GenerateError::RateLimitExceeded(
        "Quota exceeded for imagen".into(),
    )));

    for _ in 0..3 {
        let entry = h.ctx.fetch_next(true).await.unwrap();
        assert_eq!(entry.image, ImageRef::Failed);
    }

    assert_eq!(h.images.calls(), 1);
    assert!(h.ctx.state.session.image_quota_exhausted());
    assert!(h.ctx.state.notices.read().await.quota_notice);
    assert_eq!(h.len().await, 3);
}

#[tokio::test]
async fn other_image_errors_are_retried_next_time() {
    let h = Harness::new(FakeWords::new());
    h.images.push(Err(GenerateError::ApiError("HTTP 500: internal".into())));
    h.images.push(Ok(None));

    assert_eq!(h.ctx.fetch_next(true).await.unwrap().image, ImageRef::Failed);
    assert_eq!(h.ctx.fetch_next(true).await.unwrap().image, ImageRef::Failed);
    assert!(h.ctx.fetch_next(true).await.unwrap().image.as_data().is_some());

    assert_eq!(h.images.calls(), 3);
    assert!(!h.ctx.state.session.image_quota_exhausted());
    assert!(!h.ctx.state.notices.read().await.quota_notice);
}

#[tokio::test]
async fn disabled_images_are_never_requested() {
    let mut config = test_config();
    config.generator.images_enabled = false;
    let h = Harness::build(FakeWords::new(), Arc::new(MemoryStore::new()), config);

    let entry = h.ctx.fetch_next(true).await.unwrap();
    assert_eq!(entry.image, ImageRef::Pending);
    assert_eq!(h.images.calls(), 0);
}

#[tokio::test]
async fn request_excludes_last_fifty_words() {
    let h = Harness::with_saved(FakeWords::new(), 60, 59);

    h.ctx.fetch_next(true).await.unwrap();

    let request = h.words.last_request().unwrap();
    assert_eq!(request.exclude.len(), 50);
    assert_eq!(request.exclude.first().map(String::as_str), Some("saved11"));
    assert_eq!(request.exclude.last().map(String::as_str), Some("saved60"));
    assert_eq!(request.learning_language, "English");
    assert_eq!(request.native_language, "Russian");
}

#[tokio::test]
async fn ids_increase_across_fetches() {
    let h = Harness::new(FakeWords::new());

    let first = h.ctx.fetch_next(true).await.unwrap();
    let second = h.ctx.fetch_next(true).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn failed_save_is_a_notice_not_an_error() {
    let h = Harness::build(
        FakeWords::new(),
        Arc::new(MemoryStore::with_quota(16)),
        test_config(),
    );

    let entry = h.ctx.fetch_next(false).await.unwrap();

    assert_eq!(entry.word, "word1");
    assert_eq!(h.len().await, 1);
    let notices = h.ctx.state.notices.read().await.clone();
    assert!(notices.storage_notice.unwrap().contains("quota"));
    assert!(notices.error.is_none());
}

#[tokio::test]
async fn fetch_publishes_loading_then_result() {
    let h = Harness::new(FakeWords::new());
    h.ctx.fetch_next(false).await.unwrap();

    let mut views = Vec::new();
    while let Ok(Some(event)) = h.ui_rx.try_recv() {
        if let tango_types::AppEvent::Render(view) = event {
            views.push(view);
        }
    }

    assert_eq!(views.len(), 2);
    assert!(views[0].fetching);
    assert!(views[0].current.is_none());
    assert!(!views[1].fetching);
    assert_eq!(views[1].position, Some((1, 1)));
}

#[tokio::test]
async fn forbidden_quota_error_also_stops_images() {
    let h = Harness::new(FakeWords::new());
    h.images.push(Err(GenerateError::AuthenticationError(
        "Quota exceeded for imagen requests".into(),
    )));

    h.ctx.fetch_next(true).await.unwrap();
    let entry = h.ctx.fetch_next(true).await.unwrap();

    assert_eq!(entry.image, ImageRef::Failed);
    assert_eq!(h.images.calls(), 1);
    assert!(h.ctx.state.notices.read().await.quota_notice);
}
