/*!
 * Stream sink delivery.
 *
 * Derived records leave the pipeline through a `RecordSink`: one
 * newline-terminated JSON record per call. Durability, buffering, and
 * batching are the sink service's concern; this side only frames the record
 * and hands it over.
 */

use async_trait::async_trait;
use bytes::Bytes;
use log::{error, info};
use reqwest::Client;
use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::DeliveryError;

/// Serialize a record into its newline-terminated wire form
pub fn frame_record<T: Serialize>(record: &T) -> Result<Bytes, DeliveryError> {
    let mut data = serde_json::to_vec(record).map_err(|e| DeliveryError::Serialize(e.to_string()))?;
    data.push(b'\n');
    Ok(Bytes::from(data))
}

/// Delivery target for one derived record stream
#[async_trait]
pub trait RecordSink: Send + Sync + Debug {
    /// Deliver one framed record to the stream
    async fn put_record(&self, data: Bytes) -> Result<(), DeliveryError>;

    /// Configured name of the stream this sink delivers to
    fn stream_name(&self) -> &str;
}

/// HTTP client delivering records to a named stream endpoint
#[derive(Debug)]
pub struct StreamSinkClient {
    /// HTTP client for delivery requests
    client: Client,
    /// Base URL of the stream service
    endpoint: String,
    /// Name of the delivery stream
    stream_name: String,
}

impl StreamSinkClient {
    /// Create a new sink client with a bounded per-call timeout
    pub fn new(
        endpoint: impl Into<String>,
        stream_name: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            stream_name: stream_name.into(),
        }
    }
}

#[async_trait]
impl RecordSink for StreamSinkClient {
    async fn put_record(&self, data: Bytes) -> Result<(), DeliveryError> {
        let api_url = format!(
            "{}/streams/{}/record",
            self.endpoint.trim_end_matches('/'),
            self.stream_name
        );

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/x-ndjson")
            .body(data)
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!(
                "Sink '{}' error ({}): {}",
                self.stream_name, status, error_text
            );
            return Err(DeliveryError::SinkError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        Ok(())
    }

    fn stream_name(&self) -> &str {
        &self.stream_name
    }
}

/// Sink that logs records instead of delivering them, used by dry runs
#[derive(Debug)]
pub struct LogSink {
    /// Name the records would have been delivered under
    stream_name: String,
}

impl LogSink {
    /// Create a new logging sink
    pub fn new(stream_name: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
        }
    }
}

#[async_trait]
impl RecordSink for LogSink {
    async fn put_record(&self, data: Bytes) -> Result<(), DeliveryError> {
        let line = String::from_utf8_lossy(&data);
        info!("[dry-run] {} <- {}", self.stream_name, line.trim_end());
        Ok(())
    }

    fn stream_name(&self) -> &str {
        &self.stream_name
    }
}
