use log::error;

use super::{EntityStage, LanguageNormalizer, SentimentStage};
use crate::errors::StageError;
use crate::record_parser::ParsedLine;

/// Processing state of one record as it moves through the pipeline.
///
/// `EntityDone` and `Failed` are terminal; a stage runs only if the previous
/// stage reached its success state, and any stage error moves the record
/// straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Parsed, nothing run yet
    Pending,
    /// Text is in the canonical language
    Normalized,
    /// Sentiment record classified and delivered
    SentimentDone,
    /// Entity records delivered, terminal success
    EntityDone,
    /// A stage failed, terminal failure
    Failed,
}

/// What happened to one attempted record
#[derive(Debug)]
pub struct RecordOutcome {
    /// 1-based input line the record came from
    pub line_no: usize,

    /// Record identifier, if the line parsed far enough to have one
    pub id: Option<String>,

    /// Terminal state the record reached
    pub state: RecordState,

    /// The isolating failure, when `state` is `Failed`
    pub error: Option<StageError>,

    /// Entity records actually delivered for this record
    pub entities_delivered: usize,
}

impl RecordOutcome {
    /// Whether the record completed every stage
    pub fn is_success(&self) -> bool {
        self.state == RecordState::EntityDone
    }
}

/// Sequences the three stages for each record and isolates failures.
///
/// This is the swallow boundary of the pipeline: whatever a stage returns,
/// `process` logs failures once (with the offending record's raw text) and
/// hands back an outcome, never an error. The caller always advances to the
/// next record.
#[derive(Debug)]
pub struct Orchestrator {
    /// Normalize stage
    normalizer: LanguageNormalizer,
    /// Sentiment stage
    sentiment: SentimentStage,
    /// Entity stage
    entities: EntityStage,
}

impl Orchestrator {
    /// Create a new orchestrator over the three stages
    pub fn new(
        normalizer: LanguageNormalizer,
        sentiment: SentimentStage,
        entities: EntityStage,
    ) -> Self {
        Self {
            normalizer,
            sentiment,
            entities,
        }
    }

    /// Run one attempted line through the pipeline.
    ///
    /// A malformed line fails immediately; a parsed record walks
    /// `Pending -> Normalized -> SentimentDone -> EntityDone`, stopping at
    /// the first stage error.
    pub async fn process(&self, line: &ParsedLine) -> RecordOutcome {
        let line_no = line.line_no();

        let record = match line {
            ParsedLine::Record { record, .. } => record,
            ParsedLine::Malformed { reason, .. } => {
                let err = StageError::Malformed(reason.clone());
                error!("exception processing '{}': {}", line.raw_for_diagnostics(), err);
                return RecordOutcome {
                    line_no,
                    id: None,
                    state: RecordState::Failed,
                    error: Some(err),
                    entities_delivered: 0,
                };
            }
        };

        let mut state = RecordState::Pending;
        let result = self.run_stages(record, &mut state).await;

        match result {
            Ok(entities_delivered) => RecordOutcome {
                line_no,
                id: Some(record.id.clone()),
                state,
                error: None,
                entities_delivered,
            },
            Err(err) => {
                error!("exception processing '{}': {}", line.raw_for_diagnostics(), err);
                RecordOutcome {
                    line_no,
                    id: Some(record.id.clone()),
                    state: RecordState::Failed,
                    error: Some(err),
                    entities_delivered: 0,
                }
            }
        }
    }

    /// The ordered stage chain; `?` at any stage short-circuits the rest
    async fn run_stages(
        &self,
        record: &crate::record_parser::RawRecord,
        state: &mut RecordState,
    ) -> Result<usize, StageError> {
        let working = self.normalizer.normalize(record).await?;
        *state = RecordState::Normalized;

        self.sentiment.run(&working).await?;
        *state = RecordState::SentimentDone;

        let delivered = self.entities.run(&working).await?;
        *state = RecordState::EntityDone;

        Ok(delivered)
    }
}
