use crate::model::thresholds::{CALL_RATE_HARD_FLOOR, ThresholdConfig};
use crate::plate::layout::PlateLayout;
use crate::plate::well::{PLATE_COLS, PLATE_WELLS, WellPosition};
use crate::report::{
    DnaBatchReport, GenotypeBatchReport, PlateReport, format_opt, format_ratio,
};

pub fn render_thresholds_text(t: &ThresholdConfig, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("QC thresholds ({source})\n"));
    out.push_str(&format!("DNA_MIN_CONC: {}\n", t.dna_min_conc));
    out.push_str(&format!("A260_280_MIN: {}\n", t.a260_280_min));
    out.push_str(&format!("A260_280_MAX: {}\n", t.a260_280_max));
    out.push_str(&format!("A260_230_MIN: {}\n", t.a260_230_min));
    out.push_str(&format!("CALLRATE_MIN: {}\n", t.callrate_min));
    out.push_str(&format!("DISHQC_MIN: {}\n", t.dishqc_min));
    out.push_str(&format!("Call rate hard floor: {}\n", CALL_RATE_HARD_FLOOR));
    out
}

pub fn render_dna_text(report: &DnaBatchReport) -> String {
    let mut out = String::new();
    out.push_str("DNA QC Report\n");
    out.push_str("=============\n\n");
    out.push_str(&format!("Thresholds: {}\n", report.threshold_source));
    out.push_str(&format!(
        "Rows: {} (pass {}, warn {}, fail {}, pending {})\n\n",
        report.rows.len(),
        report.counts.pass,
        report.counts.warn,
        report.counts.fail,
        report.counts.pending
    ));

    out.push_str("aliquot_id\tconcentration\ta260_280\ta260_230\tstatus\n");
    for row in &report.rows {
        out.push_str(&format!(
            "{}\t{} ({})\t{} ({})\t{} ({})\t{}\n",
            row.aliquot_id,
            format_opt(row.concentration),
            row.colors.concentration,
            format_opt(row.a260_280),
            row.colors.a260_280,
            format_opt(row.a260_230),
            row.colors.a260_230,
            row.status
        ));
    }
    out.push('\n');

    let s = &report.submission;
    if s.accepted {
        if s.skipped_failed > 0 {
            out.push_str(&format!(
                "Submission ({}): {} valid rows ({} failed rows skipped)\n",
                s.mode, s.rows, s.skipped_failed
            ));
        } else {
            out.push_str(&format!("Submission ({}): {} rows\n", s.mode, s.rows));
        }
    } else {
        out.push_str(&format!(
            "Submission ({}) blocked: {}\n",
            s.mode,
            s.error.as_deref().unwrap_or("unknown error")
        ));
    }
    out
}

pub fn render_genotype_text(report: &GenotypeBatchReport) -> String {
    let mut out = String::new();
    out.push_str("Genotyping QC Report\n");
    out.push_str("====================\n\n");
    out.push_str(&format!("Thresholds: {}\n", report.threshold_source));
    out.push_str(&format!(
        "Samples: {} (Pass {}, Warn {}, Fail {})\n\n",
        report.counts.total(),
        report.counts.pass,
        report.counts.warn,
        report.counts.fail
    ));
    out.push_str("sample_id\tcall_rate\tdish_qc\tqc_flag\n");
    for r in &report.qc_results {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            r.sample_id,
            format_ratio(r.call_rate),
            format_ratio(r.dish_qc),
            r.qc_flag
        ));
    }
    if report.counts.fail > 0 {
        out.push_str(&format!(
            "\n{} sample(s) failed QC thresholds\n",
            report.counts.fail
        ));
    }
    out
}

/// 8x12 map of the plate; `#` marks a filled well.
pub fn render_plate_grid(layout: &PlateLayout) -> String {
    let mut out = String::from("  ");
    for col in 1..=PLATE_COLS {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');
    for p in WellPosition::all() {
        if p.col() == 1 {
            out.push(p.row_letter());
            out.push(' ');
        }
        out.push_str(if layout.well(p).is_some() { "  #" } else { "  ." });
        if p.col() == PLATE_COLS {
            out.push('\n');
        }
    }
    out
}

pub fn render_plate_text(report: &PlateReport, layout: &PlateLayout) -> String {
    let mut out = String::new();
    let name = if report.name.is_empty() {
        "(unnamed)"
    } else {
        report.name.as_str()
    };
    out.push_str(&format!("Plate: {name}\n"));
    out.push_str(&format!(
        "Sentrix barcode: {}\n",
        if report.sentrix_barcode.is_empty() {
            "(not set)"
        } else {
            report.sentrix_barcode.as_str()
        }
    ));
    out.push_str(&format!(
        "Wells filled: {}/{}\n\n",
        report.well_count, PLATE_WELLS
    ));
    out.push_str(&render_plate_grid(layout));
    if !report.wells.is_empty() {
        out.push_str("\nwell\taliquot_id\tsentrix_barcode\tsentrix_position\n");
        for w in &report.wells {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                w.position, w.aliquot_id, w.sentrix_barcode, w.sentrix_position
            ));
        }
    }
    out.push('\n');
    if report.ready {
        out.push_str("Ready for submission\n");
    } else {
        out.push_str(&format!("Validation errors ({}):\n", report.violations.len()));
        for v in &report.violations {
            out.push_str(&format!("  - {v}\n"));
        }
    }
    out
}
