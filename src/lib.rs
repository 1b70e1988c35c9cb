/*!
 * # sentistream
 *
 * A Rust library for batch enrichment of social-media text records.
 *
 * ## Features
 *
 * - Ingest newline-delimited JSON record batches, local or from an object store
 * - Normalize multilingual records to a canonical language via a translation service
 * - Classify sentiment with per-class confidence scores
 * - Extract named entities with per-entity confidence scores
 * - Fan derived records out to two independent stream sinks
 * - Per-record failure isolation: one bad record never stops the batch
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `record_parser`: Batch blob decoding into raw records
 * - `pipeline`: The per-record processing pipeline:
 *   - `pipeline::normalize`: Language normalization
 *   - `pipeline::sentiment`: Sentiment classification and emission
 *   - `pipeline::entities`: Entity extraction and emission
 *   - `pipeline::orchestrator`: Stage sequencing and failure isolation
 * - `blob_source`: Batch input retrieval
 * - `sink`: Derived record delivery
 * - `app_controller`: Batch driver
 * - `language_utils`: ISO language code utilities
 * - `providers`: Clients for the translator and analyzer services
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod blob_source;
pub mod errors;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod record_parser;
pub mod sink;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchSummary, Controller};
pub use errors::{AppError, ProviderError, StageError};
pub use pipeline::{EntityRecord, SentimentRecord, WorkingRecord};
pub use record_parser::{ParsedLine, RawRecord, parse_records};
