use crate::translate::client::{TranslateError, Translator};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
pub const DEEPL_PRO_API_URL: &str = "https://api.deepl.com/v2/translate";
/// Every translation goes to Japanese
pub const TARGET_LANG: &str = "JA";

// DeepL answers 456 when the account's character quota is used up
const QUOTA_EXCEEDED_STATUS: u16 = 456;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: Vec<&'a str>,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// DeepL REST API client
pub struct DeepLClient {
    api_key: String,
    endpoint: String,
    http_client: Client,
}

impl DeepLClient {
    pub fn new(api_key: String) -> Self {
        let endpoint = Self::default_endpoint(&api_key).to_string();
        Self {
            api_key,
            endpoint,
            http_client: Client::new(),
        }
    }

    /// Point the client at a different URL (proxy, self-hosted mock, ...)
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Free-plan keys end in `:fx` and must use the free API host
    pub fn default_endpoint(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            DEEPL_FREE_API_URL
        } else {
            DEEPL_PRO_API_URL
        }
    }

    async fn call_api(&self, texts: &[&str]) -> Result<Vec<String>, TranslateError> {
        let request_body = TranslateRequest {
            text: texts.to_vec(),
            target_lang: TARGET_LANG,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(Self::classify_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let api_response: TranslateResponse = response
                .json()
                .await
                .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

            if api_response.translations.len() != texts.len() {
                return Err(TranslateError::InvalidResponse(format!(
                    "sent {} texts but received {} translations",
                    texts.len(),
                    api_response.translations.len()
                )));
            }

            return Ok(api_response
                .translations
                .into_iter()
                .map(|translation| {
                    if let Some(lang) = &translation.detected_source_language {
                        debug!(source_lang = %lang, "translated text");
                    }
                    translation.text
                })
                .collect());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TranslateError::Authorization);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(Self::status_error(status.as_u16(), &error_text))
    }

    fn classify_transport_error(error: reqwest::Error) -> TranslateError {
        if error.is_connect() || error.is_timeout() {
            TranslateError::Connectivity(error.to_string())
        } else {
            TranslateError::Http(error)
        }
    }

    fn status_error(status: u16, body: &str) -> TranslateError {
        if status == QUOTA_EXCEEDED_STATUS {
            return TranslateError::Api {
                status,
                message: "translation quota exceeded".to_string(),
            };
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.message)
            .unwrap_or_else(|_| body.trim().to_string());

        TranslateError::Api { status, message }
    }
}

#[async_trait]
impl Translator for DeepLClient {
    async fn translate(&self, texts: &[String]) -> Result<Vec<String>, TranslateError> {
        let (positions, pending) = non_empty_texts(texts);

        if pending.is_empty() {
            debug!(total = texts.len(), "nothing to translate");
            return Ok(texts.to_vec());
        }

        debug!(
            total = texts.len(),
            sent = pending.len(),
            endpoint = %self.endpoint,
            "sending translation request"
        );
        let translated = self.call_api(&pending).await?;

        Ok(scatter(texts, &positions, translated))
    }
}

/// Indices and contents of the texts that actually need translating
fn non_empty_texts(texts: &[String]) -> (Vec<usize>, Vec<&str>) {
    texts
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| (index, text.as_str()))
        .unzip()
}

/// Put translations back at their original positions; blanks pass through
fn scatter(texts: &[String], positions: &[usize], translated: Vec<String>) -> Vec<String> {
    let mut output = texts.to_vec();
    for (&index, text) in positions.iter().zip(translated) {
        output[index] = text;
    }
    output
}
