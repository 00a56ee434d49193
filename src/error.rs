use thiserror::Error;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Unified error type for movieshelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON in data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV in data file: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("OMDb API error: {0}")]
    Api(String),
}
