use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_image_window() -> usize {
    20
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the per-user data directory
    pub data_dir: Option<PathBuf>,
    /// How many of the most recent cards keep their image on disk
    #[serde(default = "default_image_window")]
    pub image_window: usize,
    /// Upper bound on the total size of all records, unbounded if unset
    pub quota_bytes: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            image_window: default_image_window(),
            quota_bytes: None,
        }
    }
}
