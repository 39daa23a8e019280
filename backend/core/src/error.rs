use thiserror::Error;

/// Errors a caller of the orchestrator can see.
///
/// Everything else (backend outages, cache failures) is absorbed into a
/// result by routing, the fallback chain, or offline mode.
#[derive(Debug, Error)]
pub enum TritonError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Primary dispatch failed and so did the fallback.
    #[error("query failed: primary dispatch: {primary}; fallback: {fallback}")]
    DoubleFailure { primary: String, fallback: String },
}

impl TritonError {
    pub fn double_failure(primary: &anyhow::Error, fallback: &anyhow::Error) -> Self {
        TritonError::DoubleFailure {
            primary: format!("{primary:#}"),
            fallback: format!("{fallback:#}"),
        }
    }
}
