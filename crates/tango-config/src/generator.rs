use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_learning_language() -> String {
    "English".to_string()
}

fn default_native_language() -> String {
    "Russian".to_string()
}

fn default_image_mime_type() -> String {
    "image/jpeg".to_string()
}

fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

fn default_recent_words_limit() -> usize {
    50
}

fn default_images_enabled() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Language of the word on the front of the card
    #[serde(default = "default_learning_language")]
    pub learning_language: String,
    /// Language of the translation
    #[serde(default = "default_native_language")]
    pub native_language: String,
    #[serde(default = "default_image_mime_type")]
    pub image_mime_type: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// Known words sent along so the model avoids repeats
    #[serde(default = "default_recent_words_limit")]
    pub recent_words_limit: usize,
    #[serde(default = "default_images_enabled")]
    pub images_enabled: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            learning_language: default_learning_language(),
            native_language: default_native_language(),
            image_mime_type: default_image_mime_type(),
            aspect_ratio: default_aspect_ratio(),
            recent_words_limit: default_recent_words_limit(),
            images_enabled: default_images_enabled(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
