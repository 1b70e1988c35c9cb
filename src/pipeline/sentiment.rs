use log::debug;
use std::sync::Arc;

use super::{SentimentRecord, WorkingRecord};
use crate::errors::StageError;
use crate::providers::Analyzer;
use crate::sink::{RecordSink, frame_record};

/// Classifies a record's sentiment and emits the derived record.
///
/// Classification and emission form one unit: if either fails, the stage
/// fails and the record's remaining stages are skipped. Partial output for a
/// record is acceptable loss; out-of-order stage output is not.
#[derive(Debug)]
pub struct SentimentStage {
    /// Analysis service handle
    analyzer: Arc<dyn Analyzer>,
    /// Sink receiving the derived sentiment records
    sink: Arc<dyn RecordSink>,
}

impl SentimentStage {
    /// Create a new sentiment stage
    pub fn new(analyzer: Arc<dyn Analyzer>, sink: Arc<dyn RecordSink>) -> Self {
        Self { analyzer, sink }
    }

    /// Classify one normalized record and deliver its sentiment record
    pub async fn run(&self, record: &WorkingRecord) -> Result<SentimentRecord, StageError> {
        let analysis = self
            .analyzer
            .detect_sentiment(&record.text, &record.lang)
            .await
            .map_err(crate::errors::AnalysisError::from)?;

        let derived = SentimentRecord::build(record, &analysis);
        debug!(
            "Record {} classified {} (pos {:.3}, neg {:.3})",
            record.id, derived.sentiment, derived.pos_score, derived.neg_score
        );

        let framed = frame_record(&derived)?;
        self.sink.put_record(framed).await?;

        Ok(derived)
    }
}
