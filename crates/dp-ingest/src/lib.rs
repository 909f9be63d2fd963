//! Document ingestion for near-duplicate detection.
//!
//! Turns raw uploaded content into the ordered list of document texts the
//! detection pipeline consumes. Each [`SourceFormat`] has a dedicated
//! [`DocumentReader`]; all formats enforce the same floor of two documents.

pub mod error;
pub mod traits;

mod csv;
mod json;
mod text;

use std::str::FromStr;

pub use csv::CsvReader;
pub use error::{IngestError, Result};
pub use json::JsonReader;
pub use text::TextReader;
pub use traits::DocumentReader;


/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Csv,
    Json,
}

impl SourceFormat {
    pub fn reader(&self) -> Box<dyn DocumentReader> {
        match self {
            Self::Text => Box::new(TextReader),
            Self::Csv => Box::new(CsvReader),
            Self::Json => Box::new(JsonReader),
        }
    }

    /// Infer the format from a file extension.
    pub fn from_extension(path: &str) -> Option<Self> {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())?;
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Extract detection-ready documents from raw content.
///
/// Detection needs at least two documents, so an empty or single-document
/// input is an error here rather than downstream.
pub fn extract_texts(format: SourceFormat, content: &str) -> Result<Vec<String>> {
    enforce_minimum(format.reader().read_content(content)?)
}

/// Read a file, inferring the format from its extension.
pub fn extract_from_file(path: &str) -> Result<Vec<String>> {
    let format = SourceFormat::from_extension(path)
        .ok_or_else(|| IngestError::UnsupportedFormat(path.to_string()))?;
    enforce_minimum(format.reader().read_file(path)?)
}

fn enforce_minimum(texts: Vec<String>) -> Result<Vec<String>> {
    if texts.is_empty() {
        return Err(IngestError::Empty);
    }
    if texts.len() < 2 {
        return Err(IngestError::TooFew(texts.len()));
    }
    Ok(texts)
}
