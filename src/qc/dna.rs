use crate::model::measurement::DnaMeasurement;
use crate::model::status::{FieldColor, QcStatus};
use crate::model::thresholds::{PURITY_BORDER_BAND, ThresholdConfig};

// A few ULPs at the edge; absorbs the rounding in `min + 0.1` style sums.
fn edge_tolerance(edge: f64) -> f64 {
    4.0 * f64::EPSILON * edge.abs()
}

fn below_edge(v: f64, edge: f64) -> bool {
    v < edge - edge_tolerance(edge)
}

fn above_edge(v: f64, edge: f64) -> bool {
    v > edge + edge_tolerance(edge)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnaField {
    Concentration,
    A260_280,
    A260_230,
}

/// Field colors and the aggregate status for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnaAssessment {
    pub concentration: FieldColor,
    pub a260_280: FieldColor,
    pub a260_230: FieldColor,
    pub status: QcStatus,
}

/// Color a single reading against its bounds. Missing or non-finite values
/// are gray.
pub fn evaluate_field(field: DnaField, value: Option<f64>, t: &ThresholdConfig) -> FieldColor {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return FieldColor::Gray;
    };
    match field {
        DnaField::Concentration => {
            if v < t.dna_min_conc {
                FieldColor::Red
            } else if v < t.conc_warn_ceiling() {
                FieldColor::Amber
            } else {
                FieldColor::Green
            }
        }
        DnaField::A260_280 => {
            if v < t.a260_280_min || v > t.a260_280_max {
                FieldColor::Red
            } else if below_edge(v, t.a260_280_min + PURITY_BORDER_BAND)
                || above_edge(v, t.a260_280_max - PURITY_BORDER_BAND)
            {
                FieldColor::Amber
            } else {
                FieldColor::Green
            }
        }
        DnaField::A260_230 => {
            if v < t.a260_230_min {
                FieldColor::Red
            } else if below_edge(v, t.a260_230_min + PURITY_BORDER_BAND) {
                FieldColor::Amber
            } else {
                FieldColor::Green
            }
        }
    }
}

pub fn assess_dna(m: &DnaMeasurement, t: &ThresholdConfig) -> DnaAssessment {
    let concentration = evaluate_field(DnaField::Concentration, m.concentration, t);
    let a260_280 = evaluate_field(DnaField::A260_280, m.a260_280, t);
    let a260_230 = evaluate_field(DnaField::A260_230, m.a260_230, t);
    let status = aggregate([concentration, a260_280, a260_230]);
    DnaAssessment {
        concentration,
        a260_280,
        a260_230,
        status,
    }
}

pub fn classify_dna(m: &DnaMeasurement, t: &ThresholdConfig) -> QcStatus {
    assess_dna(m, t).status
}

fn aggregate(colors: [FieldColor; 3]) -> QcStatus {
    if colors.contains(&FieldColor::Gray) {
        return QcStatus::Pending;
    }
    match colors.iter().max() {
        Some(FieldColor::Red) => QcStatus::Fail,
        Some(FieldColor::Amber) => QcStatus::Warn,
        _ => QcStatus::Pass,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/qc/dna.rs"]
mod tests;
