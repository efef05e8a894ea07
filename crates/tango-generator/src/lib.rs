pub mod gemini;
pub mod prompt;
pub mod schema;

pub use gemini::GeminiClient;
pub use schema::GeneratedWord;

/// What the fetcher asks the text model for
#[derive(Debug, Clone)]
pub struct WordRequest {
    pub learning_language: String,
    pub native_language: String,
    /// Recently shown words the model should not repeat
    pub exclude: Vec<String>,
}

/// Raw image as returned by the provider
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64: String,
}

/// Structured vocabulary generation
#[async_trait::async_trait]
pub trait WordGenerator: Send + Sync {
    async fn generate_word(&self, request: &WordRequest) -> Result<GeneratedWord, GenerateError>;
}

/// Illustration generation, `None` when the provider returned nothing
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, GenerateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl GenerateError {
    /// Provider says the account ran out of quota
    pub fn is_quota(&self) -> bool {
        self.to_string().to_lowercase().contains("quota")
    }
}
