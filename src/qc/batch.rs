use serde::Serialize;
use thiserror::Error;

use crate::model::aliquot::AliquotId;
use crate::model::measurement::{DnaQcRow, GenotypeMetric};
use crate::model::status::{QcFlag, QcStatus};
use crate::model::thresholds::ThresholdConfig;
use crate::qc::dna::classify_dna;
use crate::qc::genotype::classify_genotype;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Submit every complete row; any hard fail rejects the batch.
    All,
    /// Submit pass/warn rows and skip the failed ones.
    ValidOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("no aliquot has a complete set of QC readings")]
    NoRows,
    #[error("{count} rows have hard-fail values; fix them or submit valid rows only")]
    HardFails { count: usize },
    #[error("no valid rows to submit ({failed} failed rows skipped)")]
    NoValidRows { failed: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub aliquot_id: AliquotId,
    pub concentration: f64,
    pub a260_280: f64,
    pub a260_230: f64,
    pub status: QcStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnaPartition {
    pub valid: Vec<ClassifiedRow>,
    pub failed: Vec<ClassifiedRow>,
    /// Rows left out because a reading is missing.
    pub pending: Vec<AliquotId>,
}

/// Payload row for `/extractions/qc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnaQcSubmission {
    pub aliquot_id: AliquotId,
    pub concentration: f64,
    pub a260_280: f64,
    pub a260_230: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub mode: SubmitMode,
    pub rows: Vec<DnaQcSubmission>,
    pub skipped_failed: usize,
}

pub fn partition_dna_rows(rows: &[DnaQcRow], t: &ThresholdConfig) -> DnaPartition {
    let mut out = DnaPartition::default();
    for row in rows {
        let Some((concentration, a260_280, a260_230)) = row.measurement.complete() else {
            out.pending.push(row.aliquot_id.clone());
            continue;
        };
        let status = classify_dna(&row.measurement, t);
        let classified = ClassifiedRow {
            aliquot_id: row.aliquot_id.clone(),
            concentration,
            a260_280,
            a260_230,
            status,
        };
        if status.is_fail() {
            out.failed.push(classified);
        } else {
            out.valid.push(classified);
        }
    }
    out
}

pub fn plan_dna_submission(
    rows: &[DnaQcRow],
    t: &ThresholdConfig,
    mode: SubmitMode,
) -> Result<SubmissionPlan, BatchError> {
    let partition = partition_dna_rows(rows, t);
    if !partition.pending.is_empty() {
        tracing::debug!(
            pending = partition.pending.len(),
            "rows with missing readings left out of submission"
        );
    }
    if partition.valid.is_empty() && partition.failed.is_empty() {
        return Err(BatchError::NoRows);
    }
    let failed = partition.failed.len();
    let selected: Vec<&ClassifiedRow> = match mode {
        SubmitMode::All => {
            if failed > 0 {
                return Err(BatchError::HardFails { count: failed });
            }
            partition.valid.iter().collect()
        }
        SubmitMode::ValidOnly => {
            if partition.valid.is_empty() {
                return Err(BatchError::NoValidRows { failed });
            }
            partition.valid.iter().collect()
        }
    };
    let rows = selected
        .into_iter()
        .map(|r| DnaQcSubmission {
            aliquot_id: r.aliquot_id.clone(),
            concentration: r.concentration,
            a260_280: r.a260_280,
            a260_230: r.a260_230,
        })
        .collect();
    Ok(SubmissionPlan {
        mode,
        rows,
        skipped_failed: if mode == SubmitMode::ValidOnly { failed } else { 0 },
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenotypeQcResult {
    pub sample_id: String,
    pub qc_flag: QcFlag,
    pub call_rate: f64,
    pub dish_qc: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlagCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

impl FlagCounts {
    pub fn add(&mut self, flag: QcFlag) {
        match flag {
            QcFlag::Pass => self.pass += 1,
            QcFlag::Warn => self.warn += 1,
            QcFlag::Fail => self.fail += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.warn + self.fail
    }
}

pub fn classify_genotype_batch(
    metrics: &[GenotypeMetric],
    t: &ThresholdConfig,
) -> (Vec<GenotypeQcResult>, FlagCounts) {
    let mut counts = FlagCounts::default();
    let mut results = Vec::with_capacity(metrics.len());
    for m in metrics {
        // Genotype classification never yields pending.
        let qc_flag = classify_genotype(m.call_rate, m.dish_qc, t)
            .flag()
            .unwrap_or(QcFlag::Fail);
        counts.add(qc_flag);
        results.push(GenotypeQcResult {
            sample_id: m.sample_id.clone(),
            qc_flag,
            call_rate: m.call_rate,
            dish_qc: m.dish_qc,
        });
    }
    (results, counts)
}

#[cfg(test)]
#[path = "../../tests/src_inline/qc/batch.rs"]
mod tests;
