use crate::model::status::QcStatus;
use crate::model::thresholds::{CALL_RATE_HARD_FLOOR, ThresholdConfig};

/// Band a genotyped sample by call rate and dish QC.
///
/// The hard call-rate floor applies before the configured `CALLRATE_MIN`;
/// a sample between the two is a warning as long as dish QC holds. Inputs
/// that fall through every band (NaN) fail.
pub fn classify_genotype(call_rate: f64, dish_qc: f64, t: &ThresholdConfig) -> QcStatus {
    let dish_ok = dish_qc >= t.dishqc_min;
    if call_rate < CALL_RATE_HARD_FLOOR || dish_qc < t.dishqc_min {
        QcStatus::Fail
    } else if call_rate >= CALL_RATE_HARD_FLOOR && call_rate < t.callrate_min && dish_ok {
        QcStatus::Warn
    } else if call_rate >= t.callrate_min && dish_ok {
        QcStatus::Pass
    } else {
        QcStatus::Fail
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/qc/genotype.rs"]
mod tests;
