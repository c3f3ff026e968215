//! Errors raised by the boundary aggregator.

use crate::source::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// Transport or timeout failure while fetching the dataset. Nothing was cached.
    #[error("failed to load boundary dataset: {0}")]
    Load(#[from] FetchError),

    /// The province filter matched no features.
    #[error("no boundaries found for province '{province}'")]
    NoBoundariesFound { province: String },

    /// No canton name matched the query.
    #[error("canton '{name}' not found")]
    CantonNotFound { name: String },
}

impl BoundaryError {
    /// Only load failures can succeed on a later attempt with the same input
    pub fn is_retryable(&self) -> bool {
        matches!(self, BoundaryError::Load(_))
    }
}
