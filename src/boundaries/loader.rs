//! Dataset loader with an explicit single-entry cache.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::BoundaryError;
use crate::models::{Feature, FeatureCollection};
use crate::source::{with_timeout, BoundarySource, FetchError, DEFAULT_FETCH_TIMEOUT};

/// Holds the most recently loaded collection. Readers see either nothing or a
/// complete collection.
#[derive(Debug, Default)]
pub struct BoundaryCache {
    slot: RwLock<Option<Arc<FeatureCollection>>>,
}

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Arc<FeatureCollection>> {
        self.slot.read().await.clone()
    }

    /// Replace the cached collection, returning the shared handle.
    pub async fn store(&self, collection: FeatureCollection) -> Arc<FeatureCollection> {
        let collection = Arc::new(collection);
        *self.slot.write().await = Some(Arc::clone(&collection));
        collection
    }

    pub async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}

/// Normalize a raw payload: `{ "features": [...] }` or a bare feature array.
pub fn normalize(raw: Value) -> Result<FeatureCollection, serde_json::Error> {
    let features: Vec<Feature> = match raw {
        Value::Object(mut map) if map.contains_key("features") => {
            serde_json::from_value(map.remove("features").unwrap_or_default())?
        }
        other => serde_json::from_value(other)?,
    };
    Ok(FeatureCollection::new(features))
}

/// Fetches the boundary dataset once and serves it from cache afterwards.
///
/// Concurrent first calls each fetch; the last one to finish wins the cache
/// slot. Failures are not cached.
pub struct BoundaryLoader {
    source: Arc<dyn BoundarySource>,
    resource: String,
    timeout: Duration,
    cache: BoundaryCache,
}

impl BoundaryLoader {
    pub fn new(source: Arc<dyn BoundarySource>, resource: impl Into<String>) -> Self {
        Self {
            source,
            resource: resource.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            cache: BoundaryCache::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the dataset, fetching it only if nothing is cached yet
    pub async fn load(&self) -> Result<Arc<FeatureCollection>, BoundaryError> {
        if let Some(collection) = self.cache.get().await {
            debug!("Serving {} cached boundary features", collection.len());
            return Ok(collection);
        }

        let collection = self.fetch().await.map_err(|e| {
            warn!("Failed to load boundaries from {}: {}", self.resource, e);
            BoundaryError::Load(e)
        })?;

        info!(
            "Loaded {} boundary features from {}",
            collection.len(),
            self.resource
        );

        Ok(self.cache.store(collection).await)
    }

    async fn fetch(&self) -> Result<FeatureCollection, FetchError> {
        let raw = with_timeout(
            &self.resource,
            self.timeout,
            self.source.fetch_json(&self.resource, self.timeout),
        )
        .await?;
        Ok(normalize(raw)?)
    }

    pub async fn is_loaded(&self) -> bool {
        self.cache.get().await.is_some()
    }

    /// Drop the cached collection so the next load fetches again
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}
