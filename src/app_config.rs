use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Stream names accepted by the sink service
static STREAM_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.-]{1,64}$").expect("stream name pattern is valid"));

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Canonical language every record is normalized to before analysis
    #[serde(default = "default_canonical_language")]
    pub canonical_language: String,

    /// Output stream sink settings
    pub sinks: SinkConfig,

    /// Translator service settings
    pub translator: ServiceConfig,

    /// Text analyzer service settings
    pub analyzer: ServiceConfig,

    /// Object store settings for notification-triggered batches
    #[serde(default)]
    pub blob_store: BlobStoreConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Connection settings for one collaborator service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    // @field: Service URL
    pub endpoint: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Per-call timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for the two derived record streams
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SinkConfig {
    // @field: Stream service URL
    pub endpoint: String,

    // @field: Sentiment stream name
    #[serde(default = "default_sentiment_stream")]
    pub sentiment_stream: String,

    // @field: Entity stream name
    #[serde(default = "default_entity_stream")]
    pub entity_stream: String,

    // @field: Per-call timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for the object store batches are fetched from
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlobStoreConfig {
    // @field: Object store URL, empty means local filesystem
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Per-call timeout seconds
    #[serde(default = "default_blob_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_blob_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_canonical_language() -> String {
    "en".to_string()
}

fn default_sentiment_stream() -> String {
    "sentiment-records".to_string()
}

fn default_entity_stream() -> String {
    "entity-records".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_blob_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canonical_language: default_canonical_language(),
            sinks: SinkConfig {
                endpoint: "http://localhost:4573".to_string(),
                sentiment_stream: default_sentiment_stream(),
                entity_stream: default_entity_stream(),
                timeout_secs: default_timeout_secs(),
            },
            translator: ServiceConfig {
                endpoint: "http://localhost:4571".to_string(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            analyzer: ServiceConfig {
                endpoint: "http://localhost:4572".to_string(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            blob_store: BlobStoreConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<()> {
    if endpoint.is_empty() {
        return Ok(());
    }
    Url::parse(endpoint).map_err(|e| anyhow!("Invalid {} endpoint '{}': {}", name, endpoint, e))?;
    Ok(())
}

fn validate_stream_name(name: &str, value: &str) -> Result<()> {
    if !STREAM_NAME_RE.is_match(value) {
        return Err(anyhow!(
            "Invalid {} name '{}': must be 1-64 characters of [a-zA-Z0-9_.-]",
            name,
            value
        ));
    }
    Ok(())
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.canonical_language)?;

        if self.translator.endpoint.is_empty() {
            return Err(anyhow!("Translator endpoint must be set"));
        }
        if self.analyzer.endpoint.is_empty() {
            return Err(anyhow!("Analyzer endpoint must be set"));
        }
        if self.sinks.endpoint.is_empty() {
            return Err(anyhow!("Sink endpoint must be set"));
        }

        validate_endpoint("translator", &self.translator.endpoint)?;
        validate_endpoint("analyzer", &self.analyzer.endpoint)?;
        validate_endpoint("sink", &self.sinks.endpoint)?;
        validate_endpoint("blob store", &self.blob_store.endpoint)?;

        validate_stream_name("sentiment stream", &self.sinks.sentiment_stream)?;
        validate_stream_name("entity stream", &self.sinks.entity_stream)?;

        if self.sinks.sentiment_stream == self.sinks.entity_stream {
            return Err(anyhow!(
                "Sentiment and entity streams must be two distinct sinks"
            ));
        }

        Ok(())
    }
}
