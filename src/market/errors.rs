use thiserror::Error;

/// Errors that can arise in the market layer and its file boundaries.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Wrapper around IO errors (export directory creation, file writes).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a world definition file cannot be used.
    #[error("invalid world definition: {0}")]
    WorldDefinition(String),
}
