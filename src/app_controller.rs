use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::blob_source::{BatchNotification, BlobSource, FsBlobSource, ObjectStoreClient};
use crate::errors::AppError;
use crate::language_utils;
use crate::pipeline::{EntityStage, LanguageNormalizer, Orchestrator, SentimentStage};
use crate::providers::analyze::AnalyzeClient;
use crate::providers::mock::{MockAnalyzer, MockTranslator};
use crate::providers::translate::TranslateClient;
use crate::providers::{Analyzer, Translator};
use crate::record_parser;
use crate::sink::{LogSink, RecordSink, StreamSinkClient};

// @module: Batch driver sequencing the pipeline across a whole blob

/// Result of one batch run.
///
/// `attempted` is the externally reported figure: every non-empty input line
/// counts, whatever happened to it afterwards. `failed` is informational;
/// per-record failures never fail the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-empty input lines that entered the pipeline
    pub attempted: usize,

    /// Attempted records that did not reach terminal success
    pub failed: usize,
}

/// Main application controller driving batches through the record pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Per-record stage sequencer
    orchestrator: Orchestrator,
}

impl Controller {
    // @method: Create a controller with HTTP-backed collaborators from the config
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let translator: Arc<dyn Translator> = Arc::new(TranslateClient::new(
            &config.translator.endpoint,
            &config.translator.api_key,
            config.translator.timeout_secs,
        ));
        let analyzer: Arc<dyn Analyzer> = Arc::new(AnalyzeClient::new(
            &config.analyzer.endpoint,
            &config.analyzer.api_key,
            config.analyzer.timeout_secs,
        ));
        let sentiment_sink: Arc<dyn RecordSink> = Arc::new(StreamSinkClient::new(
            &config.sinks.endpoint,
            &config.sinks.sentiment_stream,
            config.sinks.timeout_secs,
        ));
        let entity_sink: Arc<dyn RecordSink> = Arc::new(StreamSinkClient::new(
            &config.sinks.endpoint,
            &config.sinks.entity_stream,
            config.sinks.timeout_secs,
        ));

        Ok(Self::with_collaborators(
            config,
            translator,
            analyzer,
            sentiment_sink,
            entity_sink,
        ))
    }

    /// Create a controller over explicit collaborator handles.
    ///
    /// The handles are read-only and shared by every record in every batch
    /// this controller runs.
    pub fn with_collaborators(
        config: Config,
        translator: Arc<dyn Translator>,
        analyzer: Arc<dyn Analyzer>,
        sentiment_sink: Arc<dyn RecordSink>,
        entity_sink: Arc<dyn RecordSink>,
    ) -> Self {
        // Service APIs take the 2-letter code form; the config may carry any
        // valid ISO 639 variant
        let canonical = language_utils::normalize_for_api(&config.canonical_language)
            .unwrap_or_else(|_| config.canonical_language.clone());
        let normalizer = LanguageNormalizer::new(translator, canonical);
        let sentiment = SentimentStage::new(analyzer.clone(), sentiment_sink);
        let entities = EntityStage::new(analyzer, entity_sink);

        Self {
            config,
            orchestrator: Orchestrator::new(normalizer, sentiment, entities),
        }
    }

    /// Create a controller wired to mock collaborators and logging sinks,
    /// so a batch can be exercised without any network
    pub fn dry_run(config: Config) -> Self {
        let translator: Arc<dyn Translator> = Arc::new(MockTranslator::working());
        let analyzer: Arc<dyn Analyzer> = Arc::new(MockAnalyzer::working());
        let sentiment_sink: Arc<dyn RecordSink> =
            Arc::new(LogSink::new(&config.sinks.sentiment_stream));
        let entity_sink: Arc<dyn RecordSink> = Arc::new(LogSink::new(&config.sinks.entity_stream));

        Self::with_collaborators(config, translator, analyzer, sentiment_sink, entity_sink)
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the blob source the configuration points at: an object store
    /// when an endpoint is configured, the local filesystem otherwise
    pub fn blob_source(&self) -> Arc<dyn BlobSource> {
        if self.config.blob_store.endpoint.is_empty() {
            Arc::new(FsBlobSource::new("."))
        } else {
            Arc::new(ObjectStoreClient::new(
                &self.config.blob_store.endpoint,
                self.config.blob_store.timeout_secs,
            ))
        }
    }

    /// Run one batch blob through the pipeline.
    ///
    /// Records are processed strictly one at a time in input order; each
    /// stage of a record completes before the next starts, and each record
    /// completes (or fails) before the next is touched. Only a blob that is
    /// not valid UTF-8 fails the batch.
    pub async fn run_blob(&self, blob: &[u8]) -> Result<BatchSummary, AppError> {
        let batch_id = Uuid::new_v4();
        let text = std::str::from_utf8(blob)
            .map_err(|e| AppError::Input(format!("batch is not valid UTF-8: {}", e)))?;

        let lines = record_parser::parse_records(text);
        info!("Batch {}: {} records to process", batch_id, lines.len());

        let progress = ProgressBar::new(lines.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style);

        let mut failed = 0;
        for line in &lines {
            let outcome = self.orchestrator.process(line).await;
            if !outcome.is_success() {
                failed += 1;
                warn!(
                    "Batch {}: record at line {} ended {:?}",
                    batch_id, outcome.line_no, outcome.state
                );
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        let attempted = lines.len();
        info!("Batch {}: processed {} records", batch_id, attempted);
        if failed > 0 {
            warn!("Batch {}: {} of {} records failed", batch_id, failed, attempted);
        }

        Ok(BatchSummary { attempted, failed })
    }

    /// Run the batch named by a trigger notification.
    ///
    /// The object key is decoded before the fetch; a retrieval failure is
    /// fatal and surfaces to the caller.
    pub async fn run_notification(
        &self,
        source: &dyn BlobSource,
        notification: &BatchNotification,
    ) -> Result<BatchSummary, AppError> {
        let key = notification.decoded_key()?;
        info!(
            "Fetching batch object {}/{}",
            notification.container, key
        );

        let blob = source.fetch(&notification.container, &key).await?;
        self.run_blob(&blob).await
    }

    /// Run one local batch file through the pipeline
    pub async fn run_file(&self, input_file: &Path) -> Result<BatchSummary, AppError> {
        if !input_file.is_file() {
            return Err(AppError::Input(format!(
                "Input file does not exist: {:?}",
                input_file
            )));
        }

        info!("Processing batch file: {:?}", input_file);
        let blob = tokio::fs::read(input_file).await?;
        self.run_blob(&blob).await
    }

    /// Run every batch file in a directory, continuing past per-file errors.
    ///
    /// Returns the summed summary of the files that could be read.
    pub async fn run_folder(&self, input_dir: &Path) -> Result<BatchSummary, AppError> {
        let batch_files = find_batch_files(input_dir);
        if batch_files.is_empty() {
            warn!("No batch files found in {:?}", input_dir);
            return Ok(BatchSummary {
                attempted: 0,
                failed: 0,
            });
        }

        let mut total = BatchSummary {
            attempted: 0,
            failed: 0,
        };
        for path in batch_files {
            match self.run_file(&path).await {
                Ok(summary) => {
                    total.attempted += summary.attempted;
                    total.failed += summary.failed;
                }
                Err(e) => {
                    error!("Error processing file {:?}: {}", path, e);
                }
            }
        }

        info!("Finished folder: processed {} records", total.attempted);
        Ok(total)
    }
}

/// Find newline-delimited JSON batch files under a directory
fn find_batch_files(input_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| {
                    ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson")
                })
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}
