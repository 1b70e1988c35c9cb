/*!
 * Collaborator service clients.
 *
 * This module defines the narrow interfaces the pipeline calls through:
 * - `Translator`: language translation of record text
 * - `Analyzer`: sentiment classification and entity extraction
 *
 * HTTP-backed implementations live in `translate` and `analyze`; `mock`
 * provides scriptable in-process implementations for tests and dry runs.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Categorical sentiment label produced by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
        };
        write!(f, "{}", name)
    }
}

/// Per-class confidence scores for a sentiment classification.
///
/// The analyzer produces a probability-like distribution; the four values do
/// not have to sum to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

/// Result of a sentiment classification call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// The winning label
    pub sentiment: SentimentLabel,

    /// Per-class confidence scores
    #[serde(rename = "sentimentScore")]
    pub scores: SentimentScores,
}

/// One entity detected in a record's text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityMention {
    /// The extracted text span
    pub text: String,

    /// Entity category. The tag set is owned by the analyzer (PERSON,
    /// LOCATION, ORGANIZATION, ...), so this stays an open string.
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Detection confidence in [0,1]
    pub score: f64,
}

/// Translation service interface
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate text between two languages
    ///
    /// # Arguments
    /// * `source_lang` - Language code of the input text
    /// * `target_lang` - Language code to translate into
    /// * `text` - The text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> Result<String, ProviderError>;
}

/// Text analysis service interface
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// Classify the sentiment of a text in the given language
    async fn detect_sentiment(
        &self,
        text: &str,
        lang: &str,
    ) -> Result<SentimentAnalysis, ProviderError>;

    /// Extract named entities from a text in the given language
    async fn detect_entities(
        &self,
        text: &str,
        lang: &str,
    ) -> Result<Vec<EntityMention>, ProviderError>;
}

pub mod analyze;
pub mod mock;
pub mod translate;
