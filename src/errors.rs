/*!
 * Error types for the sentistream application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a collaborator service API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection, including timeouts
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while normalizing a record's language
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the translator API
    #[error("Translator error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur during sentiment or entity analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Error from the analyzer API
    #[error("Analyzer error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur delivering a record to a stream sink
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Record could not be serialized to its wire form
    #[error("Failed to serialize record: {0}")]
    Serialize(String),

    /// Error when sending the record fails
    #[error("Delivery request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the sink itself
    #[error("Sink responded with error: {status_code} - {message}")]
    SinkError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the sink
        message: String,
    },
}

/// Errors that can occur retrieving the batch input blob
#[derive(Error, Debug)]
pub enum BlobError {
    /// The object could not be retrieved from the store
    #[error("Failed to retrieve object: {0}")]
    RetrieveFailed(String),

    /// The notification's object key could not be decoded
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// Per-record failure: which stage of the pipeline failed and why.
///
/// A `StageError` is always isolated to one record; the orchestrator logs it
/// and moves on to the next record.
#[derive(Error, Debug)]
pub enum StageError {
    /// The line was not a structurally valid record
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Language normalization failed
    #[error("Normalize stage failed: {0}")]
    Normalize(#[from] TranslationError),

    /// Sentiment classification or its emission failed
    #[error("Sentiment stage failed: {0}")]
    Sentiment(#[from] AnalysisError),

    /// Entity extraction failed (the analyzer call itself, not a single send)
    #[error("Entity stage failed: {0}")]
    Entities(AnalysisError),

    /// A required record delivery failed
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error reading the batch input
    #[error("Input error: {0}")]
    Input(String),

    /// Error retrieving the input blob
    #[error("Blob error: {0}")]
    Blob(#[from] BlobError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Input(error.to_string())
    }
}
