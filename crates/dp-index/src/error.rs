use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<IndexError> for dp_core::DpError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Other(e) => dp_core::DpError::Other(e),
            e => dp_core::DpError::InvalidInput(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
