use thiserror::Error;

/// Failures surfaced by the categorization and forecasting engine.
///
/// Sparse history and unmatched descriptions are not errors; they degrade to
/// naive forecasts and the `Other` category.
#[derive(Debug, Error)]
pub(crate) enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid keyword rule '{pattern}': {reason}")]
    InvalidKeywordRule { pattern: String, reason: String },
    /// Input that upstream layers should have rejected reached the engine.
    #[error("Upstream contract violation: {0}")]
    ContractViolation(String),
}
