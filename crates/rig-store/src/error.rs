use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("rule not found: {0}")]
    NotFound(String),
    #[error("invalid severity: {0:?} (expected \"error\" or \"warning\")")]
    InvalidSeverity(String),
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}
