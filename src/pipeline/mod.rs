/*!
 * The per-record processing pipeline.
 *
 * Each record moves through three stages in a fixed order:
 * - `normalize`: bring the text into the canonical language
 * - `sentiment`: classify and emit one sentiment record
 * - `entities`: extract and emit one record per detected entity
 *
 * `orchestrator` sequences the stages and isolates failures to the record
 * that caused them. This module also defines the working state carried
 * between stages and the wire shapes of the two derived record streams.
 */

use serde::Serialize;

use crate::providers::{SentimentAnalysis, SentimentLabel};

pub mod entities;
pub mod normalize;
pub mod orchestrator;
pub mod sentiment;

pub use entities::EntityStage;
pub use normalize::LanguageNormalizer;
pub use orchestrator::{Orchestrator, RecordOutcome, RecordState};
pub use sentiment::SentimentStage;

/// Per-record state carried through the pipeline.
///
/// Owned by the orchestrator for the duration of one record and discarded
/// when the record completes, successfully or not.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRecord {
    /// Identifier of the source record
    pub id: String,

    /// Current working text; replaced by the translation when one ran
    pub text: String,

    /// The pre-translation text, present only if translation ran
    pub original_text: Option<String>,

    /// Language of `text`; the canonical language once normalized
    pub lang: String,
}

/// Round a confidence score to 3 decimal places
pub fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Derived sentiment record, one per successfully classified input record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentimentRecord {
    /// Identifier of the source record
    pub tweetid: String,

    /// The text the classification ran on
    pub text: String,

    /// Pre-translation text, omitted when the record was not translated
    #[serde(rename = "originalText", skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,

    /// Winning sentiment label
    pub sentiment: SentimentLabel,

    /// Positive-class confidence, rounded to 3 decimals
    #[serde(rename = "sentimentPosScore")]
    pub pos_score: f64,

    /// Negative-class confidence, rounded to 3 decimals
    #[serde(rename = "sentimentNegScore")]
    pub neg_score: f64,

    /// Neutral-class confidence, rounded to 3 decimals
    #[serde(rename = "sentimentNeuScore")]
    pub neu_score: f64,

    /// Mixed-class confidence, rounded to 3 decimals
    #[serde(rename = "sentimentMixedScore")]
    pub mixed_score: f64,
}

impl SentimentRecord {
    /// Build the derived record from a working record and its classification
    pub fn build(record: &WorkingRecord, analysis: &SentimentAnalysis) -> Self {
        Self {
            tweetid: record.id.clone(),
            text: record.text.clone(),
            original_text: record.original_text.clone(),
            sentiment: analysis.sentiment,
            pos_score: round3(analysis.scores.positive),
            neg_score: round3(analysis.scores.negative),
            neu_score: round3(analysis.scores.neutral),
            mixed_score: round3(analysis.scores.mixed),
        }
    }
}

/// Derived entity record, one per entity detected in an input record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntityRecord {
    /// Identifier of the source record
    pub tweetid: String,

    /// The extracted text span
    pub entity: String,

    /// Analyzer-defined entity category
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Detection confidence, not rounded
    pub score: f64,
}
