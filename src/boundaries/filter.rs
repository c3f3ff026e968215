//! Province filter.

use std::borrow::Cow;

use tracing::debug;

use crate::models::{Feature, FeatureCollection, PropertyKeys};

/// Province attribute of a feature, or `""` when none of the keys is set.
pub fn province_of<'a>(feature: &'a Feature, keys: &PropertyKeys) -> Cow<'a, str> {
    keys.first_text(&feature.properties).unwrap_or_default()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Features whose province attribute contains `province`, ignoring case.
///
/// Input order is preserved. An empty result is not an error here; the
/// pipeline decides what an empty province means.
pub fn filter_by_province<'a>(
    collection: &'a FeatureCollection,
    province: &str,
    keys: &PropertyKeys,
) -> Vec<&'a Feature> {
    let matched: Vec<&Feature> = collection
        .features
        .iter()
        .filter(|f| contains_ignore_case(&province_of(f, keys), province))
        .collect();

    debug!(
        "Province filter '{}': {} of {} features",
        province,
        matched.len(),
        collection.len()
    );

    matched
}
