use std::fmt;
use std::path::{Path, PathBuf};

use crate::input::{InputError, parse_json, read_payload};
use crate::model::thresholds::ThresholdConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdSource {
    File(PathBuf),
    Fallback,
}

impl fmt::Display for ThresholdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdSource::File(path) => write!(f, "{}", path.display()),
            ThresholdSource::Fallback => f.write_str("built-in defaults"),
        }
    }
}

/// Parses and checks a thresholds document.
pub fn parse_thresholds(text: &str) -> Result<ThresholdConfig, InputError> {
    let config: ThresholdConfig = parse_json(text, "thresholds")?;
    config
        .validate()
        .map_err(|e| InputError::MalformedPayload {
            what: "thresholds",
            message: e.to_string(),
        })?;
    Ok(config)
}

pub fn load_thresholds(path: &Path) -> Result<ThresholdConfig, InputError> {
    parse_thresholds(&read_payload(path)?)
}

/// Thresholds for this session. Any failure to obtain them falls back to the
/// built-in values.
pub fn resolve_thresholds(path: Option<&Path>) -> (ThresholdConfig, ThresholdSource) {
    let Some(path) = path else {
        return (ThresholdConfig::fallback(), ThresholdSource::Fallback);
    };
    match load_thresholds(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded QC thresholds");
            (config, ThresholdSource::File(path.to_path_buf()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not load QC thresholds; using built-in defaults");
            (ThresholdConfig::fallback(), ThresholdSource::Fallback)
        }
    }
}
