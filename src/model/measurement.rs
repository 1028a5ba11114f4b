use serde::{Deserialize, Serialize};

use crate::model::aliquot::AliquotId;

/// Nanodrop readings for one DNA aliquot. Any missing reading leaves the
/// aliquot pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DnaMeasurement {
    #[serde(default)]
    pub concentration: Option<f64>,
    #[serde(default)]
    pub a260_280: Option<f64>,
    #[serde(default)]
    pub a260_230: Option<f64>,
}

impl DnaMeasurement {
    #[cfg(test)]
    pub fn new(concentration: f64, a260_280: f64, a260_230: f64) -> Self {
        Self {
            concentration: Some(concentration),
            a260_280: Some(a260_280),
            a260_230: Some(a260_230),
        }
    }

    /// Returns all three readings when each is present and finite.
    pub fn complete(&self) -> Option<(f64, f64, f64)> {
        let conc = self.concentration.filter(|v| v.is_finite())?;
        let r280 = self.a260_280.filter(|v| v.is_finite())?;
        let r230 = self.a260_230.filter(|v| v.is_finite())?;
        Some((conc, r280, r230))
    }
}

/// One row of the DNA QC entry table, keyed by aliquot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaQcRow {
    pub aliquot_id: AliquotId,
    #[serde(flatten)]
    pub measurement: DnaMeasurement,
}

/// Per-sample genotyping array metrics from a scanner run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypeMetric {
    pub sample_id: String,
    pub call_rate: f64,
    pub dish_qc: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heterozygosity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex_call: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex_concordance: Option<String>,
}
