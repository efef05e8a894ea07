use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// Enable the `anki` command
    pub enabled: bool,
    /// AnkiConnect URL
    pub url: String,
    pub deck: String,
    /// Note type name
    pub model: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://localhost:8765".to_string(),
            deck: "Tango".to_string(),
            model: "Basic".to_string(),
        }
    }
}
