use thiserror::Error;

/// Domain errors surfaced to the caller. Per-cell coercion failures on the
/// read path are not represented here: they are absorbed at the store
/// adapter boundary by substituting a missing-value sentinel.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Malformed check-in input, rejected before scoring runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The collected store could not be reached or queried. Fatal for the
    /// operation; never masked as an empty result.
    #[error("collected store unavailable: {0}")]
    SourceUnavailable(String),
}
