//! Limites - administrative boundary aggregation
//!
//! Loads a province/canton boundary dataset once, merges the cantons of a
//! province into a single multipolygon and resolves cantons by loose name match.

pub mod boundaries;
pub mod config;
pub mod models;
pub mod source;

pub use boundaries::{BoundaryAggregator, BoundaryError};
pub use models::{Feature, FeatureCollection, Geometry};
