use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod aliquots;
pub mod dna_rows;
pub mod metrics;
pub mod thresholds;

/// A field-level problem in an uploaded payload. `row` is 1-based; row 0
/// refers to the document as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::new(0, "json", message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "row {} {}: {}", self.row, self.field, self.message)
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what} payload: {message}")]
    MalformedPayload { what: &'static str, message: String },
    #[error("{} validation errors found:\n{}", .0.len(), render_field_errors(.0))]
    Schema(Vec<FieldError>),
}

pub fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Opens a payload file, decompressing `.gz` transparently. `-` reads stdin.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_payload(path: &Path) -> Result<String, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(text)
}

pub(crate) fn parse_json<T: DeserializeOwned>(
    text: &str,
    what: &'static str,
) -> Result<T, InputError> {
    serde_json::from_str(text).map_err(|e| InputError::MalformedPayload {
        what,
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
