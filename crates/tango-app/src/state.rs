use std::collections::BTreeSet;
use std::sync::Arc;

use tango_config::Config;
use tango_core::persistence::{INDEX_KEY, TIME_LEFT_KEY, WORDS_KEY};
use tango_core::{Countdown, Persistence, SessionState, StorageError, WordStore};
use tango_types::View;
use tokio::sync::{Mutex, RwLock};

/// Banners shown above the card
#[derive(Debug, Clone, Default)]
pub struct Notices {
    /// Last fetch failure, cleared when a new fetch starts
    pub error: Option<String>,
    pub quota_notice: bool,
    pub storage_notice: Option<String>,
    /// Records whose last save failed; the storage notice stays while any remain
    pub failed_records: BTreeSet<&'static str>,
}

pub struct AppState {
    pub config: RwLock<Config>,
    pub store: RwLock<WordStore>,
    pub countdown: RwLock<Countdown>,
    pub notices: RwLock<Notices>,
    pub session: SessionState,
    pub persistence: Arc<Persistence>,
    /// Serializes writes so a later save never lands before an earlier one
    save_lock: Mutex<()>,
}

impl AppState {
    /// Restore the previous session from `persistence`, reads from disk
    pub fn new(config: Config, persistence: Persistence) -> Self {
        let snapshot = persistence.load();
        let store = WordStore::from_parts(snapshot.entries, snapshot.current_index);
        let seconds_left = snapshot
            .seconds_left
            .unwrap_or(config.timer.initial_seconds);

        Self {
            config: RwLock::new(config),
            store: RwLock::new(store),
            countdown: RwLock::new(Countdown::new(seconds_left)),
            notices: RwLock::new(Notices::default()),
            session: SessionState::new(),
            persistence: Arc::new(persistence),
            save_lock: Mutex::new(()),
        }
    }

    pub async fn view(&self) -> View {
        let store = self.store.read().await;
        let notices = self.notices.read().await;
        let seconds_left = self.countdown.read().await.remaining();

        View {
            current: store.current().cloned(),
            position: store.position(),
            fetching: self.session.is_fetching(),
            error: notices.error.clone(),
            quota_notice: notices.quota_notice,
            storage_notice: notices.storage_notice.clone(),
            seconds_left,
        }
    }

    /// Save the word list and index; a failure becomes a notice
    pub async fn persist_store(&self) {
        let _saving = self.save_lock.lock().await;
        let (entries, index) = {
            let store = self.store.read().await;
            (store.entries().to_vec(), store.current_index())
        };

        let result = self.blocking(move |p| p.save_words(&entries)).await;
        self.record_save(WORDS_KEY, result).await;

        let result = self.blocking(move |p| p.save_index(index)).await;
        self.record_save(INDEX_KEY, result).await;
    }

    pub async fn persist_index(&self) {
        let _saving = self.save_lock.lock().await;
        let index = self.store.read().await.current_index();

        let result = self.blocking(move |p| p.save_index(index)).await;
        self.record_save(INDEX_KEY, result).await;
    }

    /// One countdown step; None once the timer has run out
    pub async fn tick_countdown(&self) -> Option<u64> {
        let remaining = {
            let mut countdown = self.countdown.write().await;
            if !countdown.tick() {
                return None;
            }
            countdown.remaining()
        };

        let _saving = self.save_lock.lock().await;
        let result = self.blocking(move |p| p.save_time_left(remaining)).await;
        self.record_save(TIME_LEFT_KEY, result).await;
        Some(remaining)
    }

    /// Run a persistence call off the async workers
    async fn blocking<F>(&self, save: F) -> Result<(), StorageError>
    where
        F: FnOnce(&Persistence) -> Result<(), StorageError> + Send + 'static,
    {
        let persistence = self.persistence.clone();
        tokio::task::spawn_blocking(move || save(&persistence)).await?
    }

    /// Track a save per record; the notice clears once every record saved again
    async fn record_save(&self, record: &'static str, result: Result<(), StorageError>) {
        let mut notices = self.notices.write().await;

        match result {
            Ok(()) => {
                if notices.failed_records.remove(record) && notices.failed_records.is_empty() {
                    notices.storage_notice = None;
                }
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", record, e);
                notices.failed_records.insert(record);
                notices.storage_notice = Some(format!("Progress could not be saved: {e}"));
            }
        }
    }
}
