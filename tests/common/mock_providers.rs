/*!
 * Mock collaborator implementations for testing
 *
 * This module provides scriptable stand-ins for the translator, the analyzer,
 * and the stream sinks, so tests can drive the pipeline without any external
 * calls and assert on exactly what was requested and delivered.
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sentistream::errors::{DeliveryError, ProviderError};
use sentistream::providers::{
    Analyzer, EntityMention, SentimentAnalysis, SentimentLabel, SentimentScores, Translator,
};
use sentistream::sink::RecordSink;

/// Tracks calls made against a mock collaborator
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Count of mock API calls made
    pub call_count: usize,
    /// Last request received, formatted for assertions
    pub last_request: Option<String>,
}

/// Prefix the mock translator puts on every translation
pub const TRANSLATED_PREFIX: &str = "TRANSLATED: ";

/// Mock translator that prefixes the input text
///
/// Configure `fail_for_lang` to make every request with that source language
/// fail, which lets a test fail specific records of a batch.
#[derive(Debug)]
pub struct TrackedTranslator {
    tracker: Arc<Mutex<ApiCallTracker>>,
    fail_for_lang: Option<String>,
    fail_all: bool,
}

impl TrackedTranslator {
    /// Create a translator that always succeeds
    pub fn working() -> Self {
        TrackedTranslator {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            fail_for_lang: None,
            fail_all: false,
        }
    }

    /// Create a translator that always fails
    pub fn failing() -> Self {
        TrackedTranslator {
            fail_all: true,
            ..Self::working()
        }
    }

    /// Fail every request whose source language matches
    pub fn fail_for_lang(mut self, lang: impl Into<String>) -> Self {
        self.fail_for_lang = Some(lang.into());
        self
    }

    /// Get the API call tracker
    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }

    /// Number of translate calls made
    pub fn call_count(&self) -> usize {
        self.tracker.lock().unwrap().call_count
    }
}

#[async_trait]
impl Translator for TrackedTranslator {
    async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.last_request = Some(format!("{}->{}: {}", source_lang, target_lang, text));
        }

        if self.fail_all || self.fail_for_lang.as_deref() == Some(source_lang) {
            return Err(ProviderError::RequestFailed(
                "mock translation failure".into(),
            ));
        }

        Ok(format!("{}{}", TRANSLATED_PREFIX, text))
    }
}

/// Default scores the scripted analyzer answers with
pub fn default_analysis() -> SentimentAnalysis {
    SentimentAnalysis {
        sentiment: SentimentLabel::Positive,
        scores: SentimentScores {
            positive: 0.93817,
            negative: 0.01279,
            neutral: 0.03913,
            mixed: 0.00991,
        },
    }
}

/// Scripted analyzer with configurable output and per-capability failures
#[derive(Debug)]
pub struct ScriptedAnalyzer {
    sentiment_tracker: Arc<Mutex<ApiCallTracker>>,
    entity_tracker: Arc<Mutex<ApiCallTracker>>,
    analysis: SentimentAnalysis,
    entities: Vec<EntityMention>,
    /// Sentiment calls fail when the text contains this marker
    fail_sentiment_marker: Option<String>,
    /// Entity calls fail when the text contains this marker
    fail_entities_marker: Option<String>,
}

impl ScriptedAnalyzer {
    /// Create an analyzer that always succeeds with default output
    pub fn working() -> Self {
        ScriptedAnalyzer {
            sentiment_tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            entity_tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            analysis: default_analysis(),
            entities: vec![
                EntityMention {
                    text: "Seattle".to_string(),
                    entity_type: "LOCATION".to_string(),
                    score: 0.9871,
                },
                EntityMention {
                    text: "Acme".to_string(),
                    entity_type: "ORGANIZATION".to_string(),
                    score: 0.8123,
                },
            ],
            fail_sentiment_marker: None,
            fail_entities_marker: None,
        }
    }

    /// Replace the scripted sentiment analysis
    pub fn with_analysis(mut self, analysis: SentimentAnalysis) -> Self {
        self.analysis = analysis;
        self
    }

    /// Replace the scripted entities
    pub fn with_entities(mut self, entities: Vec<EntityMention>) -> Self {
        self.entities = entities;
        self
    }

    /// Fail sentiment calls whose text contains the marker
    pub fn fail_sentiment_when(mut self, marker: impl Into<String>) -> Self {
        self.fail_sentiment_marker = Some(marker.into());
        self
    }

    /// Fail entity calls whose text contains the marker
    pub fn fail_entities_when(mut self, marker: impl Into<String>) -> Self {
        self.fail_entities_marker = Some(marker.into());
        self
    }

    /// Number of sentiment calls made
    pub fn sentiment_call_count(&self) -> usize {
        self.sentiment_tracker.lock().unwrap().call_count
    }

    /// Number of entity calls made
    pub fn entity_call_count(&self) -> usize {
        self.entity_tracker.lock().unwrap().call_count
    }

    /// Text the last sentiment call ran on
    pub fn last_sentiment_text(&self) -> Option<String> {
        self.sentiment_tracker.lock().unwrap().last_request.clone()
    }
}

impl Default for ScriptedAnalyzer {
    fn default() -> Self {
        Self::working()
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn detect_sentiment(
        &self,
        text: &str,
        _lang: &str,
    ) -> Result<SentimentAnalysis, ProviderError> {
        {
            let mut tracker = self.sentiment_tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.last_request = Some(text.to_string());
        }

        if let Some(marker) = &self.fail_sentiment_marker {
            if text.contains(marker.as_str()) {
                return Err(ProviderError::RequestFailed(
                    "mock sentiment failure".into(),
                ));
            }
        }
        Ok(self.analysis.clone())
    }

    async fn detect_entities(
        &self,
        text: &str,
        _lang: &str,
    ) -> Result<Vec<EntityMention>, ProviderError> {
        {
            let mut tracker = self.entity_tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.last_request = Some(text.to_string());
        }

        if let Some(marker) = &self.fail_entities_marker {
            if text.contains(marker.as_str()) {
                return Err(ProviderError::RequestFailed("mock entity failure".into()));
            }
        }
        Ok(self.entities.clone())
    }
}

/// Recording sink that keeps every delivered line and can fail on demand
#[derive(Debug)]
pub struct RecordingSink {
    name: String,
    records: Arc<Mutex<Vec<String>>>,
    /// 0-based put_record call indices that fail
    fail_calls: Arc<Mutex<HashSet<usize>>>,
    /// Total put_record calls, including failed ones
    calls: Arc<Mutex<usize>>,
    fail_all: bool,
}

impl RecordingSink {
    /// Create a recording sink that accepts everything
    pub fn new(name: impl Into<String>) -> Self {
        RecordingSink {
            name: name.into(),
            records: Arc::new(Mutex::new(Vec::new())),
            fail_calls: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(0)),
            fail_all: false,
        }
    }

    /// Create a sink that rejects everything
    pub fn failing(name: impl Into<String>) -> Self {
        RecordingSink {
            fail_all: true,
            ..Self::new(name)
        }
    }

    /// Make the nth put_record call (0-based, counted across the sink's
    /// lifetime) fail
    pub fn fail_call(self, index: usize) -> Self {
        self.fail_calls.lock().unwrap().insert(index);
        self
    }

    /// Lines delivered so far, in order, without their trailing newline
    pub fn delivered(&self) -> Vec<String> {
        self.records.lock().unwrap().clone()
    }

    /// Lines delivered so far, parsed as JSON
    pub fn delivered_json(&self) -> Vec<serde_json::Value> {
        self.delivered()
            .iter()
            .map(|line| serde_json::from_str(line).expect("delivered line should be JSON"))
            .collect()
    }

    /// Total put_record calls, including failed ones
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl RecordSink for RecordingSink {
    async fn put_record(&self, data: Bytes) -> Result<(), DeliveryError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            let index = *calls;
            *calls += 1;
            index
        };

        if self.fail_all || self.fail_calls.lock().unwrap().contains(&index) {
            return Err(DeliveryError::RequestFailed("mock delivery failure".into()));
        }

        let line = String::from_utf8(data.to_vec())
            .map_err(|e| DeliveryError::Serialize(e.to_string()))?;
        assert!(
            line.ends_with('\n'),
            "sink records must be newline-terminated"
        );
        self.records
            .lock()
            .unwrap()
            .push(line.trim_end_matches('\n').to_string());
        Ok(())
    }

    fn stream_name(&self) -> &str {
        &self.name
    }
}
