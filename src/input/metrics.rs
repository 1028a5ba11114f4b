use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::input::{FieldError, InputError};
use crate::model::measurement::GenotypeMetric;

/// Checks a genotype metrics upload and converts it to typed rows. All
/// problems are collected; nothing is returned unless the whole document is
/// clean.
pub fn validate_metrics_json(text: &str) -> Result<Vec<GenotypeMetric>, Vec<FieldError>> {
    if text.trim().is_empty() {
        return Err(vec![FieldError::document("JSON data is required")]);
    }
    let value: Value = serde_json::from_str(text)
        .map_err(|_| vec![FieldError::document("Invalid JSON format")])?;
    let Value::Array(items) = value else {
        return Err(vec![FieldError::document("JSON must be an array")]);
    };
    if items.is_empty() {
        return Err(vec![FieldError::document("Array cannot be empty")]);
    }

    let mut errors = Vec::new();
    let mut metrics = Vec::with_capacity(items.len());
    let mut first_row: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;
        let Value::Object(obj) = item else {
            errors.push(FieldError::new(row, "row", "each entry must be an object"));
            continue;
        };
        let before = errors.len();

        let sample_id = match obj.get("sample_id") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => {
                errors.push(FieldError::new(
                    row,
                    "sample_id",
                    "sample_id is required and must be a string",
                ));
                None
            }
        };
        if let Some(id) = &sample_id {
            if let Some(first) = first_row.get(id) {
                errors.push(FieldError::new(
                    row,
                    "sample_id",
                    format!("sample_id {id} duplicates row {first}"),
                ));
            } else {
                first_row.insert(id.clone(), row);
            }
        }

        let call_rate = required_fraction(obj, "call_rate", row, &mut errors);
        let dish_qc = required_fraction(obj, "dish_qc", row, &mut errors);
        let heterozygosity = optional_fraction(obj, "heterozygosity", row, &mut errors);
        let sex_call = optional_string(obj, "sex_call", row, &mut errors);
        let sex_concordance = optional_string(obj, "sex_concordance", row, &mut errors);

        if errors.len() != before {
            continue;
        }
        if let (Some(sample_id), Some(call_rate), Some(dish_qc)) = (sample_id, call_rate, dish_qc)
        {
            metrics.push(GenotypeMetric {
                sample_id,
                call_rate,
                dish_qc,
                heterozygosity,
                sex_call,
                sex_concordance,
            });
        }
    }

    if errors.is_empty() {
        Ok(metrics)
    } else {
        Err(errors)
    }
}

pub fn parse_metrics(text: &str) -> Result<Vec<GenotypeMetric>, InputError> {
    validate_metrics_json(text).map_err(InputError::Schema)
}

fn as_fraction(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| (0.0..=1.0).contains(v))
}

fn required_fraction(
    obj: &Map<String, Value>,
    field: &str,
    row: usize,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(row, field, format!("{field} is required")));
            None
        }
        Some(v) => {
            let parsed = as_fraction(v);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    row,
                    field,
                    format!("{field} must be a number between 0 and 1"),
                ));
            }
            parsed
        }
    }
}

fn optional_fraction(
    obj: &Map<String, Value>,
    field: &str,
    row: usize,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let v = obj.get(field).filter(|v| !v.is_null())?;
    let parsed = as_fraction(v);
    if parsed.is_none() {
        errors.push(FieldError::new(
            row,
            field,
            format!("{field} must be a number between 0 and 1"),
        ));
    }
    parsed
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
    row: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(row, field, format!("{field} must be a string")));
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/metrics.rs"]
mod tests;
