//! Header-less CSV input, one document per record.
//!
//! Fields may be double-quoted, with `""` escaping a literal quote and
//! commas or newlines allowed inside quotes. The non-empty fields of a
//! record are joined with single spaces; empty records are skipped.

use crate::{DocumentReader, Result};

#[derive(Debug, Default)]
pub struct CsvReader;

impl DocumentReader for CsvReader {
    fn read_content(&self, content: &str) -> Result<Vec<String>> {
        Ok(parse_records(content)
            .into_iter()
            .map(|record| {
                record
                    .iter()
                    .map(|field| field.trim())
                    .filter(|field| !field.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .collect())
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![".csv".into()]
    }
}

fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_record(&mut records, &mut record, &mut field);
            }
            '\n' => flush_record(&mut records, &mut record, &mut field),
            _ => field.push(c),
        }
    }
    flush_record(&mut records, &mut record, &mut field);
    records
}

fn flush_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if field.is_empty() && record.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
