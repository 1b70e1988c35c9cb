use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Translator;
use crate::errors::ProviderError;

/// HTTP client for the translation service
#[derive(Debug)]
pub struct TranslateClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the translation service
    endpoint: String,
    /// API key for authentication, empty if the deployment is unauthenticated
    api_key: String,
}

/// Translation request body
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    /// Language code of the input text
    #[serde(rename = "sourceLanguageCode")]
    source_language_code: &'a str,

    /// Language code to translate into
    #[serde(rename = "targetLanguageCode")]
    target_language_code: &'a str,

    /// The text to translate
    text: &'a str,
}

/// Translation response body
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl TranslateClient {
    /// Create a new translation client with a bounded per-call timeout
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Translator for TranslateClient {
    async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let api_url = format!("{}/translate", self.endpoint.trim_end_matches('/'));

        let request = TranslateRequest {
            source_language_code: source_lang,
            target_language_code: target_lang,
            text,
        };

        let mut builder = self.client.post(&api_url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translator API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let translate_response = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(translate_response.translated_text)
    }
}
