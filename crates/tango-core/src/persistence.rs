use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tango_types::VocabularyEntry;

use crate::error::StorageError;

pub const WORDS_KEY: &str = "words";
pub const INDEX_KEY: &str = "currentIndex";
pub const TIME_LEFT_KEY: &str = "timeLeft";

/// String records addressed by key
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record as a whole
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

fn check_quota(quota: Option<u64>, others: u64, value: &str) -> Result<(), StorageError> {
    if let Some(quota) = quota {
        let needed = others + value.len() as u64;
        if needed > quota {
            return Err(StorageError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// One JSON file per record under a directory
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>, quota_bytes: Option<u64>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!("Opened file store at {}", dir.display());
        Ok(Self { dir, quota_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Bytes used by every record except `key`
    fn usage_without(&self, key: &str) -> Result<u64, StorageError> {
        let skip = self.record_path(key);
        let mut total = 0;

        for item in fs::read_dir(&self.dir)? {
            let item = item?;
            let path = item.path();
            if path == skip || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            total += item.metadata()?.len();
        }

        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.quota_bytes.is_some() {
            check_quota(self.quota_bytes, self.usage_without(key)?, value)?;
        }

        let path = self.record_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process records, mostly for tests
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records();
        let others: u64 = records
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(self.quota_bytes, others, value)?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.records().remove(key);
        Ok(())
    }
}

/// Everything restored at startup
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<VocabularyEntry>,
    pub current_index: Option<usize>,
    pub seconds_left: Option<u64>,
}

/// Drop image payloads of every card outside the last `window` ones
pub fn trim_images(entries: &[VocabularyEntry], window: usize) -> Vec<VocabularyEntry> {
    let len = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if len - i > window {
                entry.without_image()
            } else {
                entry.clone()
            }
        })
        .collect()
}

/// Reads and writes the three persisted records
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    image_window: usize,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static, image_window: usize) -> Self {
        Self {
            store: Box::new(store),
            image_window,
        }
    }

    /// Never fails: unreadable records are discarded and treated as absent
    pub fn load(&self) -> Snapshot {
        let entries = self.load_words();

        let current_index = if entries.is_empty() {
            None
        } else {
            let stored = self.read_number(INDEX_KEY).unwrap_or(0) as usize;
            Some(stored.min(entries.len() - 1))
        };

        let seconds_left = self.read_number(TIME_LEFT_KEY);

        tracing::info!(
            "Loaded {} cards (index {:?}, time left {:?})",
            entries.len(),
            current_index,
            seconds_left
        );

        Snapshot {
            entries,
            current_index,
            seconds_left,
        }
    }

    pub fn save_words(&self, entries: &[VocabularyEntry]) -> Result<(), StorageError> {
        let trimmed = trim_images(entries, self.image_window);
        let json = serde_json::to_string(&trimmed)?;
        self.store.set(WORDS_KEY, &json)
    }

    pub fn save_index(&self, index: Option<usize>) -> Result<(), StorageError> {
        match index {
            Some(index) => self.store.set(INDEX_KEY, &index.to_string()),
            None => self.store.remove(INDEX_KEY),
        }
    }

    pub fn save_time_left(&self, seconds: u64) -> Result<(), StorageError> {
        self.store.set(TIME_LEFT_KEY, &seconds.to_string())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        for key in [WORDS_KEY, INDEX_KEY, TIME_LEFT_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn load_words(&self) -> Vec<VocabularyEntry> {
        let raw = match self.store.get(WORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved words: {}", e);
                return Vec::new();
            }
        };

        match parse_words(&raw) {
            Ok(entries) => entries,
            Err(reason) => {
                tracing::warn!("Discarding saved words: {}", reason);
                if let Err(e) = self.store.remove(WORDS_KEY) {
                    tracing::warn!("Failed to clear saved words: {}", e);
                }
                Vec::new()
            }
        }
    }

    fn read_number(&self, key: &str) -> Option<u64> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Discarding malformed {} record: {:?}", key, raw);
                if let Err(e) = self.store.remove(key) {
                    tracing::warn!("Failed to clear {}: {}", key, e);
                }
                None
            }
        }
    }
}

fn parse_words(raw: &str) -> Result<Vec<VocabularyEntry>, String> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    if !value.is_array() {
        return Err("not an array".to_string());
    }

    serde_json::from_value(value).map_err(|e| e.to_string())
}
