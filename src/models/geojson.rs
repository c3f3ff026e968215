//! GeoJSON value types for administrative boundaries.
//!
//! Only the shapes the aggregator consumes are modelled: feature collections,
//! features and the two polygonal geometry kinds. Any other geometry is kept
//! as raw JSON so it round-trips untouched.

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use super::properties::Properties;

/// A `[longitude, latitude]` pair. Extra dimensions (altitude) are carried but ignored.
pub type Position = Vec<f64>;

/// A closed (or not - nothing here checks) sequence of positions.
pub type Ring = Vec<Position>;

/// Coordinates of one polygon: exterior ring followed by holes.
pub type PolygonCoords = Vec<Ring>;

/// Literal `"Feature"` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// Literal `"FeatureCollection"` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

/// Geometry of a boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Geometry {
    Polygon(PolygonCoords),
    MultiPolygon(Vec<PolygonCoords>),
    /// Any other geometry type (or `null`), preserved verbatim.
    Unsupported(Value),
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Unsupported(Value::Null)
    }
}

impl TryFrom<Value> for Geometry {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = match value.get("type") {
            Some(Value::String(kind)) => Some(kind.clone()),
            Some(_) => return Err(serde_json::Error::custom("geometry type must be a string")),
            None => None,
        };

        let coordinates = || {
            value
                .get("coordinates")
                .cloned()
                .ok_or_else(|| serde_json::Error::missing_field("coordinates"))
        };

        match kind.as_deref() {
            Some("Polygon") => Ok(Geometry::Polygon(serde_json::from_value(coordinates()?)?)),
            Some("MultiPolygon") => Ok(Geometry::MultiPolygon(serde_json::from_value(
                coordinates()?,
            )?)),
            _ => Ok(Geometry::Unsupported(value)),
        }
    }
}

impl From<Geometry> for Value {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Polygon(coordinates) => json!({
                "type": "Polygon",
                "coordinates": coordinates,
            }),
            Geometry::MultiPolygon(coordinates) => json!({
                "type": "MultiPolygon",
                "coordinates": coordinates,
            }),
            Geometry::Unsupported(raw) => raw,
        }
    }
}

impl Geometry {
    /// GeoJSON type name, if known.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Geometry::Polygon(_) => Some("Polygon"),
            Geometry::MultiPolygon(_) => Some("MultiPolygon"),
            Geometry::Unsupported(raw) => raw.get("type").and_then(Value::as_str),
        }
    }

    /// Convert polygonal geometries to a `geo` multipolygon.
    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        match self {
            Geometry::Polygon(rings) => Some(MultiPolygon::new(vec![to_polygon(rings)])),
            Geometry::MultiPolygon(polygons) => {
                Some(MultiPolygon::new(polygons.iter().map(|p| to_polygon(p)).collect()))
            }
            Geometry::Unsupported(_) => None,
        }
    }

    /// Bounding box as `[min_lon, min_lat, max_lon, max_lat]`
    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.to_multi_polygon()?
            .bounding_rect()
            .map(|rect| [rect.min().x, rect.min().y, rect.max().x, rect.max().y])
    }
}

fn to_polygon(rings: &[Ring]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Polygon::new(exterior, rings.collect())
}

fn to_line_string(ring: &[Position]) -> LineString<f64> {
    ring.iter()
        .filter_map(|p| match p.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}

/// A single attributed boundary shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: FeatureType,

    /// Source identifier, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub geometry: Geometry,

    /// Computed envelope of merged output. Input `bbox` members are ignored.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl Feature {
    pub fn new(properties: Properties, geometry: Geometry) -> Self {
        Self {
            kind: FeatureType::Feature,
            id: None,
            properties,
            geometry,
            bbox: None,
        }
    }

    /// Attach the computed envelope as the GeoJSON `bbox` member
    pub fn with_bbox(mut self) -> Self {
        self.bbox = self.geometry.bbox();
        self
    }
}

/// Ordered collection of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: CollectionType,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            features,
        }
    }

    pub fn single(feature: Feature) -> Self {
        Self::new(vec![feature])
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Envelope of every polygonal feature in the collection
    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.bbox())
            .reduce(|a, b| {
                [
                    a[0].min(b[0]),
                    a[1].min(b[1]),
                    a[2].max(b[2]),
                    a[3].max(b[3]),
                ]
            })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64) -> PolygonCoords {
        vec![vec![
            vec![x, y],
            vec![x + 1.0, y],
            vec![x + 1.0, y + 1.0],
            vec![x, y + 1.0],
            vec![x, y],
        ]]
    }

    #[test]
    fn test_parse_polygon_feature() {
        let raw = json!({
            "type": "Feature",
            "properties": { "NAME_2": "Guayaquil" },
            "geometry": { "type": "Polygon", "coordinates": square(-80.0, -2.0) }
        });

        let feature: Feature = serde_json::from_value(raw).unwrap();
        assert_eq!(feature.geometry, Geometry::Polygon(square(-80.0, -2.0)));
        assert_eq!(feature.properties["NAME_2"], "Guayaquil");
    }

    #[test]
    fn test_null_properties_and_geometry() {
        let raw = json!({ "type": "Feature", "properties": null, "geometry": null });

        let feature: Feature = serde_json::from_value(raw).unwrap();
        assert!(feature.properties.is_empty());
        assert_eq!(feature.geometry, Geometry::Unsupported(Value::Null));
        assert_eq!(feature.geometry.bbox(), None);
    }

    #[test]
    fn test_input_bbox_is_ignored_and_id_kept() {
        let raw = json!({
            "type": "Feature",
            "id": "ECU.10.8_1",
            "bbox": [-80.0, -2.0, 0.0, -79.0, -1.0, 10.0],
            "properties": { "NAME_2": "Guayaquil" },
            "geometry": { "type": "Polygon", "coordinates": square(-80.0, -2.0) }
        });

        let feature: Feature = serde_json::from_value(raw).unwrap();
        assert_eq!(feature.bbox, None);
        assert_eq!(feature.id, Some(json!("ECU.10.8_1")));

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["id"], "ECU.10.8_1");
        assert!(value.get("bbox").is_none());
    }

    #[test]
    fn test_unsupported_geometry_is_preserved() {
        let point = json!({ "type": "Point", "coordinates": [-79.9, -2.1] });
        let geometry: Geometry = serde_json::from_value(point.clone()).unwrap();

        assert_eq!(geometry.type_name(), Some("Point"));
        assert_eq!(serde_json::to_value(&geometry).unwrap(), point);
    }

    #[test]
    fn test_polygon_missing_coordinates_is_an_error() {
        let raw = json!({ "type": "Polygon" });
        assert!(serde_json::from_value::<Geometry>(raw).is_err());
    }

    #[test]
    fn test_collection_serializes_type_tags() {
        let collection = FeatureCollection::single(Feature::new(
            Properties::new(),
            Geometry::Polygon(square(0.0, 0.0)),
        ));

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
        assert!(value["features"][0].get("bbox").is_none());
    }

    #[test]
    fn test_bbox_spans_all_polygons() {
        let geometry = Geometry::MultiPolygon(vec![square(-81.0, -3.0), square(-79.5, -1.5)]);
        assert_eq!(geometry.bbox(), Some([-81.0, -3.0, -78.5, -0.5]));

        let collection = FeatureCollection::new(vec![
            Feature::new(Properties::new(), Geometry::Polygon(square(0.0, 0.0))),
            Feature::new(Properties::new(), Geometry::Polygon(square(5.0, 5.0))),
            Feature::default(),
        ]);
        assert_eq!(collection.bbox(), Some([0.0, 0.0, 6.0, 6.0]));
    }
}
