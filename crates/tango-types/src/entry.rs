use serde::{Deserialize, Serialize};

const FAILED_SENTINEL: &str = "failed";

/// Image attached to a card, persisted as a plain string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageRef {
    /// Not generated yet, or trimmed out of storage
    #[default]
    Pending,
    /// Generation was attempted and failed
    Failed,
    /// Renderable `data:` URL
    Data(String),
}

impl ImageRef {
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        ImageRef::Data(format!("data:{mime_type};base64,{payload}"))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ImageRef::Failed)
    }

    pub fn as_data(&self) -> Option<&str> {
        match self {
            ImageRef::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Mime type and base64 payload of a `data:` URL
    pub fn split_data_url(&self) -> Option<(&str, &str)> {
        let rest = self.as_data()?.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        Some((mime_type, payload))
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => ImageRef::Pending,
            FAILED_SENTINEL => ImageRef::Failed,
            _ => ImageRef::Data(value),
        }
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        match value {
            ImageRef::Pending => String::new(),
            ImageRef::Failed => FAILED_SENTINEL.to_string(),
            ImageRef::Data(data) => data,
        }
    }
}

/// One flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    /// Creation timestamp in milliseconds, strictly increasing within a store
    pub id: u64,
    /// Word in the language being learned
    pub word: String,
    pub phonetic: String,
    /// Word in the learner's native language
    pub translation: String,
    pub example: String,
    pub example_translation: String,
    #[serde(default)]
    pub image: ImageRef,
}

impl VocabularyEntry {
    /// Copy with the image payload dropped, failure markers kept
    pub fn without_image(&self) -> Self {
        let image = if self.image.is_failed() {
            ImageRef::Failed
        } else {
            ImageRef::Pending
        };

        Self {
            image,
            ..self.clone()
        }
    }
}
