use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use kanal::AsyncSender;
use tango_core::FetchGuard;
use tango_generator::{GenerateError, ImageGenerator, WordGenerator, WordRequest};
use tango_types::{AppEvent, ImageRef, VocabularyEntry};
use tokio::task::JoinHandle;

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("A word is already being fetched")]
    Busy,

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

pub type FetchHandle = JoinHandle<Result<VocabularyEntry, FetchError>>;

/// Everything a fetch needs, cheap to clone into a spawned task
#[derive(Clone)]
pub struct FetchContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub words: Arc<dyn WordGenerator>,
    pub images: Arc<dyn ImageGenerator>,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl FetchContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        words: Arc<dyn WordGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            state,
            event_tx,
            words,
            images,
        }
    }

    /// Take the fetch guard now and run the fetch in the background
    pub fn spawn_fetch(&self, advance: bool) -> Result<FetchHandle, FetchError> {
        let guard = self.state.session.try_begin_fetch().ok_or(FetchError::Busy)?;
        let ctx = self.clone();
        Ok(tokio::spawn(async move { ctx.run_fetch(guard, advance).await }))
    }

    /// Fetch inline, rejected while another fetch is running
    pub async fn fetch_next(&self, advance: bool) -> Result<VocabularyEntry, FetchError> {
        let guard = self.state.session.try_begin_fetch().ok_or(FetchError::Busy)?;
        self.run_fetch(guard, advance).await
    }

    pub async fn publish_view(&self) {
        let view = self.state.view().await;
        if let Err(e) = self.event_tx.send(AppEvent::Render(view)).await {
            tracing::debug!("UI is gone, dropping render: {}", e);
        }
    }

    async fn run_fetch(
        &self,
        guard: FetchGuard,
        advance: bool,
    ) -> Result<VocabularyEntry, FetchError> {
        self.state.notices.write().await.error = None;
        self.publish_view().await;

        let result = self.build_and_append(advance).await;

        if let Err(e) = &result {
            tracing::error!("Fetching a new word failed: {}", e);
            self.state.notices.write().await.error =
                Some(format!("Could not load a new word ({e}). Try again."));
        }

        // Release before the final render so the UI sees the fetch as finished
        drop(guard);
        self.publish_view().await;

        result
    }

    async fn build_and_append(&self, advance: bool) -> Result<VocabularyEntry, FetchError> {
        let (request, images_enabled) = {
            let config = self.state.config.read().await;
            let store = self.state.store.read().await;
            let request = WordRequest {
                learning_language: config.generator.learning_language.clone(),
                native_language: config.generator.native_language.clone(),
                exclude: store.recent_words(config.generator.recent_words_limit),
            };
            (request, config.generator.images_enabled)
        };

        let generated = self.words.generate_word(&request).await?;
        tracing::info!("Generated word '{}'", generated.word);

        let image = if images_enabled {
            self.illustrate(&generated.image_prompt).await
        } else {
            ImageRef::Pending
        };

        let entry = {
            let mut store = self.state.store.write().await;
            let entry = VocabularyEntry {
                id: store.next_id(now_ms()),
                word: generated.word,
                phonetic: generated.phonetic,
                translation: generated.translation,
                example: generated.example,
                example_translation: generated.example_translation,
                image,
            };

            if store.contains_word(&entry.word) {
                tracing::warn!("Model repeated a known word: '{}'", entry.word);
            }

            let index = store.append(entry.clone(), advance);
            tracing::debug!("Appended card {} at {:?}", entry.id, index);
            entry
        };

        self.state.persist_store().await;
        Ok(entry)
    }

    /// Never fails: problems end up as the "failed" image marker
    async fn illustrate(&self, prompt: &str) -> ImageRef {
        let session = &self.state.session;

        if session.image_quota_exhausted() {
            tracing::debug!("Image quota exhausted earlier, skipping image");
            return ImageRef::Failed;
        }

        match self.images.generate_image(prompt).await {
            Ok(Some(image)) => ImageRef::from_base64(&image.mime_type, &image.base64),
            Ok(None) => {
                tracing::warn!("Image generation returned nothing");
                ImageRef::Failed
            }
            Err(e) => {
                tracing::warn!("Image generation failed: {}", e);
                if e.is_quota() && session.mark_image_quota_exhausted() {
                    tracing::info!("Image quota exhausted, no more images this session");
                    self.state.notices.write().await.quota_notice = true;
                }
                ImageRef::Failed
            }
        }
    }
}
