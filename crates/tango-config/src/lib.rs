use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::generator::GeneratorConfig;
use self::storage::StorageConfig;
use self::timer::TimerConfig;
use self::ui::UiConfig;

pub mod anki;
pub mod generator;
pub mod storage;
pub mod timer;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API key is missing: set GEMINI_API_KEY or generator.api_key in the profile")]
    MissingApiKey,
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub storage: StorageConfig,
    pub timer: TimerConfig,
    pub anki: AnkiConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Environment values win over whatever the profile holds
    pub fn apply_env(&mut self) {
        if let Some(key) = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
        {
            self.generator.api_key = key;
        }

        if let Ok(model) = env::var("TANGO_TEXT_MODEL") {
            self.generator.text_model = model;
        }

        if let Ok(model) = env::var("TANGO_IMAGE_MODEL") {
            self.generator.image_model = model;
        }

        if let Ok(lang) = env::var("TANGO_LEARNING_LANGUAGE") {
            self.generator.learning_language = lang;
        }

        if let Ok(lang) = env::var("TANGO_NATIVE_LANGUAGE") {
            self.generator.native_language = lang;
        }

        if let Some(seconds) = env::var("TANGO_TIMER_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timer.initial_seconds = seconds;
        }
    }

    /// Fails when the generator has nothing to authenticate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
