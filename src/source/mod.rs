//! Raw boundary dataset sources.
//!
//! A source fetches one JSON document for a resource identifier within a
//! timeout. Remote URLs go through [`HttpSource`], everything else is read
//! from disk by [`FileSource`].

mod file;
mod http;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

pub use file::FileSource;
pub use http::HttpSource;

/// Default bound on a single dataset fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors raised while fetching the raw dataset
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("fetching {resource} timed out after {timeout:?}")]
    Timeout { resource: String, timeout: Duration },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{resource} returned status {status}")]
    Status {
        resource: String,
        status: reqwest::StatusCode,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid boundary payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches the JSON document behind a resource identifier.
#[async_trait]
pub trait BoundarySource: Send + Sync {
    async fn fetch_json(&self, resource: &str, timeout: Duration) -> Result<Value, FetchError>;
}

/// Pick a source for a resource: `http(s)://` URLs are fetched remotely,
/// `file://` URLs and plain paths are read locally.
pub fn source_for(
    resource: &str,
    user_agent: Option<&str>,
) -> Result<Arc<dyn BoundarySource>, FetchError> {
    match Url::parse(resource) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(Arc::new(HttpSource::new(user_agent)?))
        }
        _ => Ok(Arc::new(FileSource)),
    }
}

/// Run `fut`, failing with [`FetchError::Timeout`] once `timeout` elapses.
pub(crate) async fn with_timeout<T, F>(
    resource: &str,
    timeout: Duration,
    fut: F,
) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| FetchError::Timeout {
            resource: resource.to_string(),
            timeout,
        })?
}
