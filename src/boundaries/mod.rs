//! Province aggregation and canton lookup over an administrative boundary dataset.
//!
//! The loader fetches and caches the raw feature collection; the filter,
//! merger and lookup are pure functions over it; [`BoundaryAggregator`]
//! composes them.

mod cantons;
mod error;
mod filter;
mod loader;
mod lookup;
mod merge;
mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use cantons::{list_known_canton_names, KNOWN_CANTONS};
pub use error::BoundaryError;
pub use filter::{contains_ignore_case, filter_by_province, province_of};
pub use loader::{normalize, BoundaryCache, BoundaryLoader};
pub use lookup::{display_name, find_canton, names_match, with_display_name};
pub use merge::merge_province;
pub use service::BoundaryAggregator;
