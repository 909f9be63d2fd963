use thiserror::Error;

#[derive(Error, Debug)]
pub enum DpError {
    #[error("Unknown detection method: {0}")]
    UnknownMethod(String),
    #[error("Unknown representative policy: {0}")]
    UnknownPolicy(String),
    #[error("Invalid detector parameters: {0}")]
    InvalidParams(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Embedding provider error: {0}")]
    Embedding(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DpError>;
