use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("No documents found in input")]
    Empty,

    #[error("Need at least 2 documents, got {0}")]
    TooFew(usize),

    #[error("Unsupported input structure: {0}")]
    UnsupportedStructure(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
