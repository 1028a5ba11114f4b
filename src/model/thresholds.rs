use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute call-rate floor applied to every genotyping sample regardless of
/// the configured `CALLRATE_MIN`. Samples under it always fail.
// TODO: confirm with the product owners whether this floor should move into
// ThresholdConfig next to CALLRATE_MIN.
pub const CALL_RATE_HARD_FLOOR: f64 = 0.97;

/// Width of the borderline band next to each purity-ratio bound.
pub const PURITY_BORDER_BAND: f64 = 0.1;

/// Concentrations in `[DNA_MIN_CONC, DNA_MIN_CONC * factor)` are borderline.
pub const CONC_BORDER_FACTOR: f64 = 1.5;

/// QC thresholds served by the backend `/settings` resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(rename = "DNA_MIN_CONC")]
    pub dna_min_conc: f64,
    #[serde(rename = "A260_280_MIN")]
    pub a260_280_min: f64,
    #[serde(rename = "A260_280_MAX")]
    pub a260_280_max: f64,
    #[serde(rename = "A260_230_MIN")]
    pub a260_230_min: f64,
    #[serde(rename = "CALLRATE_MIN")]
    pub callrate_min: f64,
    #[serde(rename = "DISHQC_MIN")]
    pub dishqc_min: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} is a fraction and must not exceed 1 (got {value})")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("A260_280_MIN ({min}) is greater than A260_280_MAX ({max})")]
    InvertedBand { min: f64, max: f64 },
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl ThresholdConfig {
    /// Values used when the thresholds resource cannot be read.
    pub fn fallback() -> Self {
        Self {
            dna_min_conc: 20.0,
            a260_280_min: 1.7,
            a260_280_max: 2.1,
            a260_230_min: 1.8,
            callrate_min: 0.98,
            dishqc_min: 0.82,
        }
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        let fields = [
            ("DNA_MIN_CONC", self.dna_min_conc),
            ("A260_280_MIN", self.a260_280_min),
            ("A260_280_MAX", self.a260_280_max),
            ("A260_230_MIN", self.a260_230_min),
            ("CALLRATE_MIN", self.callrate_min),
            ("DISHQC_MIN", self.dishqc_min),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThresholdError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("CALLRATE_MIN", self.callrate_min),
            ("DISHQC_MIN", self.dishqc_min),
        ] {
            if value > 1.0 {
                return Err(ThresholdError::FractionOutOfRange { field, value });
            }
        }
        if self.a260_280_min > self.a260_280_max {
            return Err(ThresholdError::InvertedBand {
                min: self.a260_280_min,
                max: self.a260_280_max,
            });
        }
        Ok(())
    }

    pub fn conc_warn_ceiling(&self) -> f64 {
        self.dna_min_conc * CONC_BORDER_FACTOR
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
