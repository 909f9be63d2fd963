//! JSON input: an array of strings, an array of objects, or a single object.

use serde_json::{Map, Value};

use crate::{DocumentReader, IngestError, Result};

/// Object keys probed for document text, in priority order.
const TEXT_KEYS: &[&str] = &["content", "text", "body", "message", "data"];

#[derive(Debug, Default)]
pub struct JsonReader;

impl DocumentReader for JsonReader {
    fn read_content(&self, content: &str) -> Result<Vec<String>> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Array(items) => {
                let mut texts = Vec::with_capacity(items.len());
                for item in &items {
                    let text = match item {
                        Value::String(text) => Some(text.as_str()),
                        Value::Object(object) => object_text(object),
                        // Anything else carries no usable text.
                        _ => None,
                    };
                    if let Some(text) = text {
                        let text = text.trim();
                        if !text.is_empty() {
                            texts.push(text.to_string());
                        }
                    }
                }
                Ok(texts)
            }
            Value::Object(object) => Ok(object
                .values()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()),
            other => Err(IngestError::UnsupportedStructure(format!(
                "expected a JSON array or object at the top level, got {}",
                type_name(&other)
            ))),
        }
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![".json".into()]
    }
}

/// Value of the first text key holding a string, skipping non-string values.
fn object_text(object: &Map<String, Value>) -> Option<&str> {
    TEXT_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
