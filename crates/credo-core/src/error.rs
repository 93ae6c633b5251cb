use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredoError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CredoResult<T> = Result<T, CredoError>;
