use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Analyzer, EntityMention, SentimentAnalysis};
use crate::errors::ProviderError;

/// HTTP client for the text analysis service
#[derive(Debug)]
pub struct AnalyzeClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the analysis service
    endpoint: String,
    /// API key for authentication, empty if the deployment is unauthenticated
    api_key: String,
}

/// Analysis request body, shared by both capabilities
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    /// The text to analyze
    text: &'a str,

    /// Language code of the text
    #[serde(rename = "languageCode")]
    language_code: &'a str,
}

/// Entity extraction response body
#[derive(Debug, Deserialize)]
pub struct EntitiesResponse {
    /// Detected entities, possibly empty
    pub entities: Vec<EntityMention>,
}

impl AnalyzeClient {
    /// Create a new analysis client with a bounded per-call timeout
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

    /// POST a request to one of the analysis endpoints and decode the response
    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        text: &str,
        lang: &str,
    ) -> Result<T, ProviderError> {
        let api_url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);

        let request = AnalyzeRequest {
            text,
            language_code: lang,
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
            error!("Analyzer API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl Analyzer for AnalyzeClient {
    async fn detect_sentiment(
        &self,
        text: &str,
        lang: &str,
    ) -> Result<SentimentAnalysis, ProviderError> {
        self.call("detect-sentiment", text, lang).await
    }

    async fn detect_entities(
        &self,
        text: &str,
        lang: &str,
    ) -> Result<Vec<EntityMention>, ProviderError> {
        let response: EntitiesResponse = self.call("detect-entities", text, lang).await?;
        Ok(response.entities)
    }
}
