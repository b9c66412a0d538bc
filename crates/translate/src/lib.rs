//! Google Cloud Translation v2 client.
//!
//! Single-string-in, single-string-out. Billed per call and subject to
//! quota errors, so there is no internal retry: a failed call degrades
//! the affected item and the hourly cycle is the retry loop.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use gibi_core::catalog::Translator;
use gibi_core::errors::TranslationError;

pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationItem {
    translated_text: String,
}

/// Client for the remote translation service.
pub struct GoogleTranslateClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GoogleTranslateClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

fn first_translation(response: TranslateResponse) -> Result<String, TranslationError> {
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| TranslationError::Decode("empty translations array".to_string()))
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let url = format!("{}?key={}", self.api_url, self.api_key);
        // format=text keeps HTML entities out of the translated output.
        let body = json!({
            "q": text,
            "target": target_lang,
            "format": "text",
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::Network(format!("HTTP request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TranslationError::api(status.as_u16(), message));
        }

        let parsed: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| TranslationError::Decode(format!("JSON parse error: {e}")))?;
        first_translation(parsed)
    }
}
