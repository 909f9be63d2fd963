//! Plain text input, one document per non-blank line.

use crate::{DocumentReader, Result};

#[derive(Debug, Default)]
pub struct TextReader;

impl DocumentReader for TextReader {
    fn read_content(&self, content: &str) -> Result<Vec<String>> {
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![".txt".into(), ".text".into()]
    }
}
