use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a QC classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QcStatus {
    Pass,
    Warn,
    Fail,
    Pending,
}

/// QC flag as stored by the backend on aliquots and genotype results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcFlag {
    Pass,
    Warn,
    Fail,
}

/// Per-field feedback color for measurement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldColor {
    Gray,
    Green,
    Amber,
    Red,
}

impl QcStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QcStatus::Pass => "pass",
            QcStatus::Warn => "warn",
            QcStatus::Fail => "fail",
            QcStatus::Pending => "pending",
        }
    }

    pub fn flag(self) -> Option<QcFlag> {
        match self {
            QcStatus::Pass => Some(QcFlag::Pass),
            QcStatus::Warn => Some(QcFlag::Warn),
            QcStatus::Fail => Some(QcFlag::Fail),
            QcStatus::Pending => None,
        }
    }

    pub fn is_fail(self) -> bool {
        self == QcStatus::Fail
    }
}

impl QcFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            QcFlag::Pass => "Pass",
            QcFlag::Warn => "Warn",
            QcFlag::Fail => "Fail",
        }
    }

    /// Aliquots flagged Pass or Warn may be plated.
    pub fn is_plateable(self) -> bool {
        matches!(self, QcFlag::Pass | QcFlag::Warn)
    }
}

impl fmt::Display for QcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QcFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FieldColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldColor::Gray => "gray",
            FieldColor::Green => "green",
            FieldColor::Amber => "amber",
            FieldColor::Red => "red",
        };
        f.write_str(s)
    }
}
