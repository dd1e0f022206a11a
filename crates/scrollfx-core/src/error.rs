use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scroll range: end offset {end} must be greater than start offset {start}")]
    InvalidRange { start: f64, end: f64 },

    #[error("Unknown easing: {0}")]
    InvalidEasing(String),

    #[error("Invalid viewport threshold: {0}")]
    InvalidThreshold(String),

    #[error("Scenario error: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, Error>;
