use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::model::aliquot::{Aliquot, AliquotId};
use crate::plate::layout::PlateSubmission;
use crate::report::delimited::write_csv;

pub const ASSAY: &str = "Infinium Global Screening Array-24 v3.0";
pub const MANIFEST: &str = "GSA-24v3-0_A1.bpm";

/// Date layout used in the sheet header.
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Illumina iScan sample sheet for a plate. Wells whose aliquot has no known
/// sample are left out. `date` is written as given (MM/DD/YYYY); fields that
/// contain commas or quotes are quoted.
pub fn render_sample_sheet(
    plate: &PlateSubmission,
    sample_ids: &BTreeMap<AliquotId, String>,
    date: &str,
) -> Result<String, csv::Error> {
    let header = write_csv([
        ["Date", date],
        ["Workflow", "GenerateFASTQ"],
        ["Application", "FASTQ Only"],
        ["Instrument Type", "iScan"],
        ["Assay", ASSAY],
        ["Index Adapters", "Illumina Infinium"],
    ])?;
    let manifests = write_csv([["A", MANIFEST]])?;

    let mut data = vec![
        [
            "Sample_ID",
            "SentrixBarcode_A",
            "SentrixPosition_A",
            "Sample_Plate",
            "Sample_Well",
        ]
        .map(String::from),
    ];
    for well in &plate.wells {
        let Some(sample_id) = sample_ids.get(&well.aliquot_id) else {
            tracing::warn!(
                aliquot = %well.aliquot_id,
                well = %well.well,
                "no sample for aliquot; well left out of sample sheet"
            );
            continue;
        };
        data.push([
            sample_id.clone(),
            well.sentrix_barcode.clone(),
            well.sentrix_position.clone(),
            plate.name.clone(),
            well.well.to_string(),
        ]);
    }
    let data = write_csv(data)?;

    Ok(format!(
        "[Header]\n{header}\n[Manifests]\n{manifests}\n[Data]\n{data}"
    ))
}

pub fn sample_index(aliquots: &[Aliquot]) -> BTreeMap<AliquotId, String> {
    aliquots
        .iter()
        .map(|a| (a.id.clone(), a.sample_id.clone()))
        .collect()
}

pub fn format_us_date(at: DateTime<Utc>) -> String {
    at.format(US_DATE_FORMAT).to_string()
}

/// Today's date (UTC) for the sheet header.
pub fn today_us_date() -> String {
    format_us_date(Utc::now())
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/samplesheet.rs"]
mod tests;
