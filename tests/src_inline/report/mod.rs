use super::*;
use crate::model::measurement::DnaMeasurement;
use crate::plate::well::WellPosition;
use crate::qc::batch::plan_dna_submission;
use crate::report::text::{render_dna_text, render_plate_grid, render_plate_text};

fn rows() -> Vec<DnaQcRow> {
    vec![
        DnaQcRow {
            aliquot_id: AliquotId::from("ALQ-1"),
            measurement: DnaMeasurement::new(50.0, 1.9, 2.0),
        },
        DnaQcRow {
            aliquot_id: AliquotId::from("ALQ-2"),
            measurement: DnaMeasurement::new(5.0, 1.9, 2.0),
        },
        DnaQcRow {
            aliquot_id: AliquotId::from("ALQ-3"),
            measurement: DnaMeasurement::default(),
        },
    ]
}

#[test]
fn test_dna_report_counts_and_blocked_submission() {
    let t = ThresholdConfig::fallback();
    let rows = rows();
    let plan = plan_dna_submission(&rows, &t, SubmitMode::All);
    let report = build_dna_report(&rows, &t, "built-in defaults".to_string(), SubmitMode::All, &plan);
    assert_eq!(report.counts, StatusCounts { pass: 1, warn: 0, fail: 1, pending: 1 });
    assert!(!report.submission.accepted);
    assert_eq!(report.submission.mode, "all");

    let text = render_dna_text(&report);
    assert!(text.contains("Submission (all) blocked: 1 rows have hard-fail values"));
    assert!(text.contains("ALQ-2\t5.00 (red)"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tool"]["name"], TOOL_NAME);
    assert_eq!(json["rows"][2]["status"], "pending");
    assert_eq!(json["rows"][0]["colors"]["a260_280"], "green");
    assert_eq!(json["thresholds"]["DNA_MIN_CONC"], 20.0);
}

#[test]
fn test_dna_report_valid_only() {
    let t = ThresholdConfig::fallback();
    let rows = rows();
    let plan = plan_dna_submission(&rows, &t, SubmitMode::ValidOnly);
    let report = build_dna_report(&rows, &t, String::new(), SubmitMode::ValidOnly, &plan);
    assert!(report.submission.accepted);
    assert_eq!(report.submission.rows, 1);
    assert_eq!(report.submission.skipped_failed, 1);
    assert!(render_dna_text(&report).contains("1 valid rows (1 failed rows skipped)"));
}

#[test]
fn test_plate_report_and_grid() {
    let mut layout = PlateLayout::new("PLT", "204123456789");
    let a1: WellPosition = "A1".parse().unwrap();
    let h12: WellPosition = "H12".parse().unwrap();
    layout.assign_aliquot(a1, AliquotId::from("1"));
    layout.assign_aliquot(h12, AliquotId::from("1"));

    let report = build_plate_report(&layout);
    assert!(!report.ready);
    assert_eq!(report.well_count, 2);
    assert_eq!(report.violations.len(), 1);

    let grid = render_plate_grid(&layout);
    let lines: Vec<&str> = grid.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[1].starts_with("A   #  ."));
    assert!(lines[8].ends_with(".  #"));

    let text = render_plate_text(&report, &layout);
    assert!(text.contains("Wells filled: 2/96"));
    assert!(text.contains("Validation errors (1):"));
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_ratio(0.98765), "0.988");
    assert_eq!(format_opt(None), "-");
    assert_eq!(format_opt(Some(1.9)), "1.90");
}
