//! Remote dataset fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{BoundarySource, FetchError};

const DEFAULT_USER_AGENT: &str = concat!("limites/", env!("CARGO_PKG_VERSION"));

/// Fetches boundary GeoJSON over HTTP(S)
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(user_agent: Option<&str>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<Value, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, timeout, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                resource: url.to_string(),
                status: response.status(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| classify(url, timeout, e))
    }
}

/// Timeouts surface as [`FetchError::Timeout`] whether they hit during send or body read.
fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            resource: url.to_string(),
            timeout,
        }
    } else {
        FetchError::Http(e)
    }
}

#[async_trait]
impl BoundarySource for HttpSource {
    async fn fetch_json(&self, resource: &str, timeout: Duration) -> Result<Value, FetchError> {
        self.get(resource, timeout).await
    }
}
