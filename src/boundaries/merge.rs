//! Province merge: fold canton geometries into one multipolygon.

use tracing::debug;

use super::BoundaryError;
use crate::models::{Feature, Geometry, PolygonCoords, Properties};

/// Merge features into a single `MultiPolygon` feature named `label`.
///
/// A `Polygon` contributes one polygon, a `MultiPolygon` contributes each of
/// its polygons, and anything else contributes nothing. Polygons keep input
/// order; rings are neither validated nor deduplicated.
pub fn merge_province(features: &[&Feature], label: &str) -> Result<Feature, BoundaryError> {
    if features.is_empty() {
        return Err(BoundaryError::NoBoundariesFound {
            province: label.to_string(),
        });
    }

    let mut all_coords: Vec<PolygonCoords> = Vec::new();

    for feature in features {
        match &feature.geometry {
            Geometry::Polygon(rings) => all_coords.push(rings.clone()),
            Geometry::MultiPolygon(polygons) => all_coords.extend(polygons.iter().cloned()),
            Geometry::Unsupported(_) => {
                debug!(
                    "Skipping {} geometry while merging '{}'",
                    feature.geometry.type_name().unwrap_or("null"),
                    label
                );
            }
        }
    }

    debug!(
        "Merged {} features into {} polygons for '{}'",
        features.len(),
        all_coords.len(),
        label
    );

    let mut properties = Properties::new();
    properties.insert("name".to_string(), label.into());

    Ok(Feature::new(properties, Geometry::MultiPolygon(all_coords)).with_bbox())
}
