//! Local dataset reader.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{BoundarySource, FetchError};

/// Reads boundary GeoJSON from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    /// `file://` URLs map to their path, anything else is taken as a path as-is.
    fn resolve(resource: &str) -> PathBuf {
        Url::parse(resource)
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(resource))
    }

    async fn read(resource: &str) -> Result<Value, FetchError> {
        let path = Self::resolve(resource);
        debug!("Reading boundaries from {}", path.display());

        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BoundarySource for FileSource {
    /// Local reads are not interruptible; the loader bounds the call.
    async fn fetch_json(&self, resource: &str, _timeout: Duration) -> Result<Value, FetchError> {
        Self::read(resource).await
    }
}
