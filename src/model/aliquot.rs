use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::status::QcFlag;

/// Aliquot identifier. The backend issues string ids (`ALQ-00001`) while
/// older payloads carry bare integers; both deserialize to the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AliquotId(String);

impl AliquotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AliquotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AliquotId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for AliquotId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for AliquotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) if s.trim().is_empty() => {
                Err(serde::de::Error::custom("aliquot id must not be empty"))
            }
            Raw::Text(s) => Ok(Self(s)),
            Raw::Number(n) => Ok(Self::from(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AliquotQc {
    pub concentration: f64,
    pub a260_280: f64,
    pub a260_230: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aliquot {
    pub id: AliquotId,
    pub sample_id: String,
    #[serde(default)]
    pub qc_flag: Option<QcFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qc: Option<AliquotQc>,
}

impl Aliquot {
    pub fn is_plateable(&self) -> bool {
        self.qc_flag.is_some_and(QcFlag::is_plateable)
    }
}

/// Aliquots eligible for plating: QC flag Pass or Warn.
pub fn plateable_pool(aliquots: &[Aliquot]) -> Vec<Aliquot> {
    aliquots
        .iter()
        .filter(|a| a.is_plateable())
        .cloned()
        .collect()
}
