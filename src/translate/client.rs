use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the translation backend
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Could not connect to the translation service ({0}). Check your network connection.")]
    Connectivity(String),

    #[error("The translation service rejected the API key. Check that DEEPL_API_KEY is valid.")]
    Authorization,

    #[error("Translation API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid translation response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Translates a batch of strings into a fixed target language.
///
/// Output has the same length as the input and position `i` of the output
/// is the translation of position `i` of the input.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, texts: &[String]) -> Result<Vec<String>, TranslateError>;
}
