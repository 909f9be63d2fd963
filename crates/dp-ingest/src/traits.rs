use crate::Result;

/// Trait for document readers.
pub trait DocumentReader: Send + Sync {
    /// Split raw content into one text per document.
    fn read_content(&self, content: &str) -> Result<Vec<String>>;

    /// Read documents from a file path.
    fn read_file(&self, path: &str) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        self.read_content(&content)
    }

    /// Supported file extensions.
    fn supported_extensions(&self) -> Vec<String>;

    /// Check if a file can be read by this reader.
    fn can_read(&self, path: &str) -> bool {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let ext_with_dot = format!(".{}", ext);
        self.supported_extensions().contains(&ext_with_dot)
    }
}
