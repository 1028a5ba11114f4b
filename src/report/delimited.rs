use std::io;

use csv::{Terminator, WriterBuilder};

use crate::model::aliquot::Aliquot;

pub const QC_EXPORT_HEADER: [&str; 6] = [
    "Aliquot ID",
    "Sample ID",
    "Concentration (ng/µL)",
    "A260/280",
    "A260/230",
    "QC Flag",
];

/// Writes records as comma-separated lines, quoting fields only where needed.
/// Records may differ in length.
pub fn write_csv<I, R, F>(records: I) -> Result<String, csv::Error>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// QC results table, one row per aliquot. Missing readings and flags are
/// empty cells.
pub fn render_qc_export(aliquots: &[Aliquot]) -> Result<String, csv::Error> {
    let mut records = vec![QC_EXPORT_HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    for a in aliquots {
        records.push(vec![
            a.id.to_string(),
            a.sample_id.clone(),
            reading(a.qc.map(|q| q.concentration)),
            reading(a.qc.map(|q| q.a260_280)),
            reading(a.qc.map(|q| q.a260_230)),
            a.qc_flag.map(|f| f.as_str().to_string()).unwrap_or_default(),
        ]);
    }
    write_csv(records)
}

fn reading(v: Option<f64>) -> String {
    v.filter(|v| v.is_finite()).map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/delimited.rs"]
mod tests;
