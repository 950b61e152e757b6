use thiserror::Error;

#[derive(Debug, Error)]
pub enum MordorError {
    #[error("invalid bucket width: {0} (must be finite and > 0)")]
    InvalidBucketWidth(f64),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MordorError>;
