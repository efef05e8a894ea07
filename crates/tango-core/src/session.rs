use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-process flags shared by the fetcher and navigation
#[derive(Default)]
pub struct SessionState {
    fetch_lock: Arc<Mutex<()>>,
    fetch_started: AtomicBool,
    image_quota_exhausted: AtomicBool,
}

/// Held for the whole duration of one fetch
pub struct FetchGuard {
    _guard: OwnedMutexGuard<()>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// None while another fetch is in flight
    pub fn try_begin_fetch(&self) -> Option<FetchGuard> {
        let guard = self.fetch_lock.clone().try_lock_owned().ok()?;
        self.fetch_started.store(true, Ordering::SeqCst);
        Some(FetchGuard { _guard: guard })
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_lock.try_lock().is_err()
    }

    /// Whether any fetch was started since launch
    pub fn fetch_started(&self) -> bool {
        self.fetch_started.load(Ordering::SeqCst)
    }

    pub fn image_quota_exhausted(&self) -> bool {
        self.image_quota_exhausted.load(Ordering::SeqCst)
    }

    /// Returns true only for the call that flipped the flag
    pub fn mark_image_quota_exhausted(&self) -> bool {
        !self.image_quota_exhausted.swap(true, Ordering::SeqCst)
    }
}
