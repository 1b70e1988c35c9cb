/*!
 * Mock collaborator implementations.
 *
 * Scriptable in-process stand-ins for the translator and analyzer services:
 * - `working()` - always succeeds with deterministic output
 * - `intermittent(n)` - fails every nth request
 * - `failing()` - always fails
 *
 * These back the CLI's dry-run mode and the unit tests, so a batch can be
 * exercised end to end without any network.
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Analyzer, EntityMention, SentimentAnalysis, SentimentLabel, SentimentScores, Translator};
use crate::errors::ProviderError;

/// Behavior mode for mock collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails every nth request
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

fn should_fail(behavior: MockBehavior, request_count: &AtomicUsize) -> bool {
    let count = request_count.fetch_add(1, Ordering::SeqCst) + 1;
    match behavior {
        MockBehavior::Working => false,
        MockBehavior::Intermittent { fail_every } => fail_every > 0 && count % fail_every == 0,
        MockBehavior::Failing => true,
    }
}

/// Mock translator that wraps the input text instead of translating it
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared so callers can assert on it
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock translator
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Number of translate calls made so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Handle to the shared call counter
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.request_count.clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        if should_fail(self.behavior, &self.request_count) {
            return Err(ProviderError::RequestFailed(
                "mock translator failure".to_string(),
            ));
        }
        Ok(format!("[{}->{}] {}", source_lang, target_lang, text))
    }
}

/// Mock analyzer with deterministic sentiment and entity output
#[derive(Debug)]
pub struct MockAnalyzer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter across both capabilities
    request_count: Arc<AtomicUsize>,
    /// Entities returned from every detect_entities call
    entities: Vec<EntityMention>,
}

impl MockAnalyzer {
    /// Create a new mock analyzer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            entities: vec![EntityMention {
                text: "Acme".to_string(),
                entity_type: "ORGANIZATION".to_string(),
                score: 0.9317,
            }],
        }
    }

    /// Create a working mock analyzer
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock analyzer
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock analyzer
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Replace the entities returned from detect_entities
    pub fn with_entities(mut self, entities: Vec<EntityMention>) -> Self {
        self.entities = entities;
        self
    }

    /// Number of analyzer calls made so far, across both capabilities
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Classify text by crude keyword matching, good enough for dry runs
    fn classify(text: &str) -> SentimentAnalysis {
        let lowered = text.to_lowercase();
        let positive = ["love", "great", "good", "happy", "excellent"]
            .iter()
            .any(|w| lowered.contains(w));
        let negative = ["hate", "bad", "awful", "terrible", "angry"]
            .iter()
            .any(|w| lowered.contains(w));

        let (sentiment, scores) = match (positive, negative) {
            (true, false) => (
                SentimentLabel::Positive,
                SentimentScores { positive: 0.9231, negative: 0.0123, neutral: 0.0522, mixed: 0.0124 },
            ),
            (false, true) => (
                SentimentLabel::Negative,
                SentimentScores { positive: 0.0087, negative: 0.9455, neutral: 0.0312, mixed: 0.0146 },
            ),
            (true, true) => (
                SentimentLabel::Mixed,
                SentimentScores { positive: 0.3612, negative: 0.3488, neutral: 0.0455, mixed: 0.2445 },
            ),
            (false, false) => (
                SentimentLabel::Neutral,
                SentimentScores { positive: 0.0533, negative: 0.0214, neutral: 0.9118, mixed: 0.0135 },
            ),
        };

        SentimentAnalysis { sentiment, scores }
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn detect_sentiment(
        &self,
        text: &str,
        _lang: &str,
    ) -> Result<SentimentAnalysis, ProviderError> {
        if should_fail(self.behavior, &self.request_count) {
            return Err(ProviderError::RequestFailed(
                "mock sentiment failure".to_string(),
            ));
        }
        Ok(Self::classify(text))
    }

    async fn detect_entities(
        &self,
        _text: &str,
        _lang: &str,
    ) -> Result<Vec<EntityMention>, ProviderError> {
        if should_fail(self.behavior, &self.request_count) {
            return Err(ProviderError::RequestFailed(
                "mock entity failure".to_string(),
            ));
        }
        Ok(self.entities.clone())
    }
}
