use thiserror::Error;

#[derive(Error, Debug)]
pub enum DsvizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is empty")]
    EmptyContainer(&'static str),

    #[error("Type mismatch: {0} is not an integer sort key")]
    TypeMismatch(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unknown structure kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, DsvizError>;
