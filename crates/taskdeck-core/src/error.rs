use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskdeckError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskdeckError>;
