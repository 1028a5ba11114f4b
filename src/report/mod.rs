use serde::Serialize;

use crate::model::aliquot::AliquotId;
use crate::model::measurement::DnaQcRow;
use crate::model::status::{FieldColor, QcStatus};
use crate::model::thresholds::ThresholdConfig;
use crate::plate::layout::{PlateLayout, Well};
use crate::qc::batch::{BatchError, FlagCounts, GenotypeQcResult, SubmissionPlan, SubmitMode};
use crate::qc::dna::assess_dna;

pub mod delimited;
pub mod json;
pub mod text;

pub const TOOL_NAME: &str = "genolims-qc";

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub version: &'static str,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
    pub pending: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: QcStatus) {
        match status {
            QcStatus::Pass => self.pass += 1,
            QcStatus::Warn => self.warn += 1,
            QcStatus::Fail => self.fail += 1,
            QcStatus::Pending => self.pending += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldColors {
    pub concentration: FieldColor,
    pub a260_280: FieldColor,
    pub a260_230: FieldColor,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnaRowReport {
    pub aliquot_id: AliquotId,
    pub concentration: Option<f64>,
    pub a260_280: Option<f64>,
    pub a260_230: Option<f64>,
    pub colors: FieldColors,
    pub status: QcStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    pub mode: &'static str,
    pub accepted: bool,
    pub rows: usize,
    pub skipped_failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnaBatchReport {
    pub tool: ToolMeta,
    pub thresholds: ThresholdConfig,
    pub threshold_source: String,
    pub counts: StatusCounts,
    pub rows: Vec<DnaRowReport>,
    pub submission: SubmissionSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenotypeBatchReport {
    pub tool: ToolMeta,
    pub thresholds: ThresholdConfig,
    pub threshold_source: String,
    pub counts: FlagCounts,
    pub qc_results: Vec<GenotypeQcResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlateReport {
    pub name: String,
    pub sentrix_barcode: String,
    pub well_count: usize,
    pub wells: Vec<Well>,
    pub violations: Vec<String>,
    pub ready: bool,
}

pub fn mode_name(mode: SubmitMode) -> &'static str {
    match mode {
        SubmitMode::All => "all",
        SubmitMode::ValidOnly => "valid-only",
    }
}

pub fn build_dna_report(
    rows: &[DnaQcRow],
    thresholds: &ThresholdConfig,
    threshold_source: String,
    mode: SubmitMode,
    plan: &Result<SubmissionPlan, BatchError>,
) -> DnaBatchReport {
    let mut counts = StatusCounts::default();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let a = assess_dna(&row.measurement, thresholds);
        counts.add(a.status);
        out.push(DnaRowReport {
            aliquot_id: row.aliquot_id.clone(),
            concentration: row.measurement.concentration,
            a260_280: row.measurement.a260_280,
            a260_230: row.measurement.a260_230,
            colors: FieldColors {
                concentration: a.concentration,
                a260_280: a.a260_280,
                a260_230: a.a260_230,
            },
            status: a.status,
        });
    }
    let submission = match plan {
        Ok(p) => SubmissionSummary {
            mode: mode_name(p.mode),
            accepted: true,
            rows: p.rows.len(),
            skipped_failed: p.skipped_failed,
            error: None,
        },
        Err(e) => SubmissionSummary {
            mode: mode_name(mode),
            accepted: false,
            rows: 0,
            skipped_failed: 0,
            error: Some(e.to_string()),
        },
    };
    DnaBatchReport {
        tool: ToolMeta::current(),
        thresholds: *thresholds,
        threshold_source,
        counts,
        rows: out,
        submission,
    }
}

pub fn build_plate_report(layout: &PlateLayout) -> PlateReport {
    let violations = match layout.prepare_submission() {
        Ok(_) => Vec::new(),
        Err(v) => v.iter().map(|v| v.to_string()).collect(),
    };
    PlateReport {
        name: layout.name.clone(),
        sentrix_barcode: layout.sentrix_barcode().to_string(),
        well_count: layout.len(),
        wells: layout.wells().values().cloned().collect(),
        ready: violations.is_empty(),
        violations,
    }
}

pub fn format_ratio(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn format_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
