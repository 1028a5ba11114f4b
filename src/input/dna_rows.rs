use std::collections::BTreeSet;

use crate::input::{FieldError, InputError, parse_json};
use crate::model::measurement::DnaQcRow;

/// Parses DNA QC entry rows. Each aliquot may appear once; negative
/// readings are rejected.
pub fn parse_dna_rows(text: &str) -> Result<Vec<DnaQcRow>, InputError> {
    let rows: Vec<DnaQcRow> = parse_json(text, "DNA QC")?;
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();
    for (idx, row) in rows.iter().enumerate() {
        let n = idx + 1;
        if !seen.insert(row.aliquot_id.clone()) {
            errors.push(FieldError::new(
                n,
                "aliquot_id",
                format!("aliquot {} appears more than once", row.aliquot_id),
            ));
        }
        let m = &row.measurement;
        for (field, value) in [
            ("concentration", m.concentration),
            ("a260_280", m.a260_280),
            ("a260_230", m.a260_230),
        ] {
            if value.is_some_and(|v| v < 0.0) {
                errors.push(FieldError::new(
                    n,
                    field,
                    format!("{field} must not be negative"),
                ));
            }
        }
    }
    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(InputError::Schema(errors))
    }
}
