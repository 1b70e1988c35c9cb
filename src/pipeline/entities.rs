use log::{debug, warn};
use std::sync::Arc;

use super::{EntityRecord, WorkingRecord};
use crate::errors::{AnalysisError, StageError};
use crate::providers::Analyzer;
use crate::sink::{RecordSink, frame_record};

/// Extracts entities from a record and emits one derived record per entity.
///
/// Failure granularity differs from the sentiment stage: the extraction call
/// failing fails the whole stage, but each entity's send is independent - a
/// failed send is logged and the remaining entities are still attempted.
#[derive(Debug)]
pub struct EntityStage {
    /// Analysis service handle
    analyzer: Arc<dyn Analyzer>,
    /// Sink receiving the derived entity records
    sink: Arc<dyn RecordSink>,
}

impl EntityStage {
    /// Create a new entity stage
    pub fn new(analyzer: Arc<dyn Analyzer>, sink: Arc<dyn RecordSink>) -> Self {
        Self { analyzer, sink }
    }

    /// Extract entities from one normalized record and deliver each.
    ///
    /// Returns the number of entity records actually delivered.
    pub async fn run(&self, record: &WorkingRecord) -> Result<usize, StageError> {
        let mentions = self
            .analyzer
            .detect_entities(&record.text, &record.lang)
            .await
            .map_err(|e| StageError::Entities(AnalysisError::from(e)))?;

        debug!("Record {}: {} entities detected", record.id, mentions.len());

        let mut delivered = 0;
        for mention in &mentions {
            let derived = EntityRecord {
                tweetid: record.id.clone(),
                entity: mention.text.clone(),
                entity_type: mention.entity_type.clone(),
                score: mention.score,
            };

            let framed = match frame_record(&derived) {
                Ok(framed) => framed,
                Err(e) => {
                    warn!(
                        "Record {}: skipping entity '{}': {}",
                        record.id, derived.entity, e
                    );
                    continue;
                }
            };

            match self.sink.put_record(framed).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    // One entity failing to send must not take the rest down
                    warn!(
                        "Record {}: failed to deliver entity '{}': {}",
                        record.id, derived.entity, e
                    );
                }
            }
        }

        Ok(delivered)
    }
}
