//! Core data models for boundary aggregation.

pub mod geojson;
pub mod properties;

pub use geojson::{Feature, FeatureCollection, Geometry, PolygonCoords, Position, Ring};
pub use properties::{first_text, Properties, PropertyKeys, PropertySchema, UNNAMED};
