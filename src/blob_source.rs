/*!
 * Batch input retrieval.
 *
 * A batch run is triggered by a notification naming a container and an object
 * key in a durable object store. The key arrives percent-encoded with `+`
 * standing for a space and must be decoded before the fetch. Retrieval
 * failure is fatal to the whole batch - there is nothing to process without
 * the blob.
 */

use async_trait::async_trait;
use bytes::Bytes;
use log::error;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::BlobError;

/// Trigger notification for one batch run
#[derive(Debug, Clone, Deserialize)]
pub struct BatchNotification {
    /// Container holding the batch object
    pub container: String,

    /// Object key, possibly percent-encoded
    pub key: String,
}

impl BatchNotification {
    /// Decode the object key: `+` means space, then percent-unescape
    pub fn decoded_key(&self) -> Result<String, BlobError> {
        let spaced = self.key.replace('+', " ");
        percent_decode_str(&spaced)
            .decode_utf8()
            .map(|cow| cow.into_owned())
            .map_err(|e| BlobError::InvalidKey(format!("{}: {}", self.key, e)))
    }
}

/// Source of batch input blobs
#[async_trait]
pub trait BlobSource: Send + Sync + Debug {
    /// Retrieve the raw bytes of one object
    async fn fetch(&self, container: &str, key: &str) -> Result<Bytes, BlobError>;
}

/// HTTP client retrieving objects from a store endpoint
#[derive(Debug)]
pub struct ObjectStoreClient {
    /// HTTP client for retrieval requests
    client: Client,
    /// Base URL of the object store
    endpoint: String,
}

impl ObjectStoreClient {
    /// Create a new object store client with a bounded per-call timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl BlobSource for ObjectStoreClient {
    async fn fetch(&self, container: &str, key: &str) -> Result<Bytes, BlobError> {
        let url = format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            container,
            key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BlobError::RetrieveFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!("Object store error ({}) for {}/{}", status, container, key);
            return Err(BlobError::RetrieveFailed(format!(
                "{}/{} returned status {}",
                container, key, status
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| BlobError::RetrieveFailed(e.to_string()))
    }
}

/// Blob source backed by a local directory, used by the CLI and tests.
///
/// Containers map to subdirectories and keys to file paths beneath them.
#[derive(Debug)]
pub struct FsBlobSource {
    /// Root directory containing the containers
    root: PathBuf,
}

impl FsBlobSource {
    /// Create a new filesystem blob source rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobSource for FsBlobSource {
    async fn fetch(&self, container: &str, key: &str) -> Result<Bytes, BlobError> {
        let path = self.root.join(container).join(key);
        tokio::fs::read(&path)
            .await
            .map(Bytes::from)
            .map_err(|e| BlobError::RetrieveFailed(format!("{:?}: {}", path, e)))
    }
}
