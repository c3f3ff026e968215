//! Province and canton pipelines over the cached dataset.

use std::sync::Arc;

use tracing::debug;

use super::cantons::list_known_canton_names;
use super::filter::filter_by_province;
use super::loader::BoundaryLoader;
use super::lookup::{find_canton, with_display_name};
use super::merge::merge_province;
use super::BoundaryError;
use crate::config::Config;
use crate::models::{FeatureCollection, PropertySchema};
use crate::source::{source_for, FetchError};

/// Boundary aggregation service
pub struct BoundaryAggregator {
    loader: BoundaryLoader,
    schema: PropertySchema,
}

impl BoundaryAggregator {
    pub fn new(loader: BoundaryLoader, schema: PropertySchema) -> Self {
        Self { loader, schema }
    }

    /// Build the source and loader described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let source = source_for(&config.source.resource, config.source.user_agent.as_deref())?;
        let loader = BoundaryLoader::new(source, config.source.resource.clone())
            .with_timeout(config.source.timeout());
        Ok(Self::new(loader, config.properties.clone()))
    }

    pub async fn load(&self) -> Result<Arc<FeatureCollection>, BoundaryError> {
        self.loader.load().await
    }

    /// Whole province as a single merged `MultiPolygon` feature
    pub async fn province(&self, province: &str) -> Result<FeatureCollection, BoundaryError> {
        let collection = self.load().await?;
        let features = filter_by_province(&collection, province, &self.schema.province);

        if features.is_empty() {
            return Err(BoundaryError::NoBoundariesFound {
                province: province.to_string(),
            });
        }

        let merged = merge_province(&features, province)?;
        Ok(FeatureCollection::single(merged))
    }

    /// Cantons of a province, each with a normalized `name` property.
    ///
    /// An unknown province yields an empty collection.
    pub async fn province_cantons(
        &self,
        province: &str,
    ) -> Result<FeatureCollection, BoundaryError> {
        let collection = self.load().await?;
        let features = filter_by_province(&collection, province, &self.schema.province)
            .into_iter()
            .map(|f| with_display_name(f, &self.schema.canton))
            .collect();

        Ok(FeatureCollection::new(features))
    }

    /// Single canton of a province, matched loosely by name
    pub async fn canton(
        &self,
        province: &str,
        name: &str,
    ) -> Result<FeatureCollection, BoundaryError> {
        let collection = self.load().await?;
        let features = filter_by_province(&collection, province, &self.schema.province);
        let found = find_canton(&features, name, &self.schema.canton)?;

        debug!("Canton query '{}' resolved in province '{}'", name, province);

        Ok(FeatureCollection::single(with_display_name(
            found,
            &self.schema.canton,
        )))
    }

    pub fn known_cantons(&self) -> &'static [&'static str] {
        list_known_canton_names()
    }

    pub async fn is_loaded(&self) -> bool {
        self.loader.is_loaded().await
    }

    pub async fn invalidate(&self) {
        self.loader.invalidate().await;
    }
}
