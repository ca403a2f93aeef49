use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorylineError {
    #[error("Project document is missing the '{0}' collection")]
    MissingCollection(&'static str),

    #[error("Invalid project document: {0}")]
    InvalidDocument(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorylineError>;
