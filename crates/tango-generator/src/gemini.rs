use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tango_config::generator::GeneratorConfig;

use crate::prompt::build_word_prompt;
use crate::schema::{GeneratedWord, parse_generated_word, response_schema};
use crate::{GenerateError, GeneratedImage, ImageGenerator, WordGenerator, WordRequest};

/// Gemini text model plus Imagen, sharing one HTTP client and key
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
    image_mime_type: String,
    aspect_ratio: String,
}

impl GeminiClient {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerateError::AuthenticationError("no API key".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            image_mime_type: config.image_mime_type.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, GenerateError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!("Gemini returned HTTP {}: {}", status, text);
            return Err(status_error(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| GenerateError::ApiError(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl WordGenerator for GeminiClient {
    async fn generate_word(&self, request: &WordRequest) -> Result<GeneratedWord, GenerateError> {
        let body = word_request_body(&build_word_prompt(request));
        let url = self.model_url(&self.text_model, "generateContent");

        tracing::debug!(
            "Requesting word from {} ({} excluded)",
            self.text_model,
            request.exclude.len()
        );
        let json = self.post(&url, &body).await?;
        let text = extract_text(&json)?;

        parse_generated_word(&text)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, GenerateError> {
        let body = image_request_body(prompt, &self.image_mime_type, &self.aspect_ratio);
        let url = self.model_url(&self.image_model, "predict");

        tracing::debug!("Requesting image from {}", self.image_model);
        let json = self.post(&url, &body).await?;

        Ok(extract_image(&json, &self.image_mime_type))
    }
}

pub fn word_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

pub fn image_request_body(prompt: &str, mime_type: &str, aspect_ratio: &str) -> Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": 1,
            "outputMimeType": mime_type,
            "aspectRatio": aspect_ratio,
        }
    })
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a failed response to an error, keeping the provider's message
pub fn status_error(status: StatusCode, body: &str) -> GenerateError {
    let message = error_message(body).unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerateError::AuthenticationError(message)
        }
        StatusCode::TOO_MANY_REQUESTS => GenerateError::RateLimitExceeded(message),
        _ => GenerateError::ApiError(format!("HTTP {status}: {message}")),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}

/// Concatenated text parts of the first candidate
pub fn extract_text(json: &Value) -> Result<String, GenerateError> {
    if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
        return Err(GenerateError::ApiError(format!("Prompt blocked: {reason}")));
    }

    let text: String = json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerateError::InvalidFormat("empty response".to_string()));
    }

    Ok(text)
}

/// First returned image, if any
pub fn extract_image(json: &Value, default_mime_type: &str) -> Option<GeneratedImage> {
    json["predictions"].as_array()?.iter().find_map(|prediction| {
        let base64 = prediction["bytesBase64Encoded"].as_str()?;
        if base64.is_empty() {
            return None;
        }
        let mime_type = prediction["mimeType"].as_str().unwrap_or(default_mime_type);

        Some(GeneratedImage {
            mime_type: mime_type.to_string(),
            base64: base64.to_string(),
        })
    })
}
