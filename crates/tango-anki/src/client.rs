use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tango_types::VocabularyEntry;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

/// Image attached to a note field
#[derive(Debug, Clone, Serialize)]
pub struct NotePicture {
    pub data: String,
    pub filename: String,
    pub fields: Vec<String>,
}

impl NotePicture {
    pub fn from_entry(entry: &VocabularyEntry, field: &str) -> Option<Self> {
        let (mime_type, payload) = entry.image.split_data_url()?;
        let extension = mime_type.strip_prefix("image/").unwrap_or("jpg");

        Some(Self {
            data: payload.to_string(),
            filename: format!("tango-{}.{}", entry.id, extension),
            fields: vec![field.to_string()],
        })
    }
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Check if AnkiConnect is available
    pub async fn check_connection(&self) -> Result<u32> {
        let response: AnkiResponse<u32> = self.invoke("version", json!({})).await?;
        response.into_result()
    }

    pub async fn deck_names(&self) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self.invoke("deckNames", json!({})).await?;
        response.into_result()
    }

    /// Add a note, returning its id
    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        front: &str,
        back: &str,
        picture: Option<NotePicture>,
    ) -> Result<u64> {
        let mut note = json!({
            "deckName": deck,
            "modelName": model,
            "fields": {
                "Front": front,
                "Back": back
            },
            "tags": ["tango"]
        });

        if let Some(picture) = picture {
            note["picture"] = json!([picture]);
        }

        let response: AnkiResponse<u64> = self.invoke("addNote", json!({ "note": note })).await?;
        response.into_result()
    }

    async fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<AnkiResponse<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to AnkiConnect")?;

        response
            .json::<AnkiResponse<T>>()
            .await
            .context("Failed to parse AnkiConnect response")
    }
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }

        self.result.context("AnkiConnect returned null result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tango_types::ImageRef;

    #[test]
    fn picture_comes_from_data_url() {
        let entry = VocabularyEntry {
            id: 42,
            word: "kite".into(),
            phonetic: String::new(),
            translation: String::new(),
            example: String::new(),
            example_translation: String::new(),
            image: ImageRef::from_base64("image/png", "QUJD"),
        };

        let picture = NotePicture::from_entry(&entry, "Back").unwrap();
        assert_eq!(picture.data, "QUJD");
        assert_eq!(picture.filename, "tango-42.png");
        assert_eq!(picture.fields, vec!["Back"]);

        let failed = VocabularyEntry {
            image: ImageRef::Failed,
            ..entry
        };
        assert!(NotePicture::from_entry(&failed, "Back").is_none());
    }

    #[test]
    fn anki_error_wins_over_result() {
        let response: AnkiResponse<u64> =
            serde_json::from_str(r#"{"result": null, "error": "deck not found"}"#).unwrap();
        assert_eq!(
            response.into_result().unwrap_err().to_string(),
            "AnkiConnect error: deck not found"
        );
    }
}
