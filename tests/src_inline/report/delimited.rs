use super::*;
use crate::model::aliquot::{AliquotId, AliquotQc};
use crate::model::status::QcFlag;

#[test]
fn test_qc_export_rows_with_and_without_readings() {
    let aliquots = vec![
        Aliquot {
            id: AliquotId::from(12u64),
            sample_id: "SAMP-00012".to_string(),
            qc_flag: Some(QcFlag::Warn),
            qc: Some(AliquotQc {
                concentration: 25.5,
                a260_280: 1.85,
                a260_230: 2.0,
            }),
        },
        Aliquot {
            id: AliquotId::from("ALQ-13"),
            sample_id: "SAMP-00013".to_string(),
            qc_flag: None,
            qc: None,
        },
    ];
    let csv = render_qc_export(&aliquots).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Aliquot ID,Sample ID,Concentration (ng/µL),A260/280,A260/230,QC Flag",
            "12,SAMP-00012,25.5,1.85,2,Warn",
            "ALQ-13,SAMP-00013,,,,",
        ]
    );
    assert!(csv.ends_with('\n'));
}

#[test]
fn test_qc_export_of_no_aliquots_is_header_only() {
    let csv = render_qc_export(&[]).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_write_csv_quotes_only_when_needed() {
    let out = write_csv([vec!["a", "b,c"], vec!["say \"hi\""]]).unwrap();
    assert_eq!(out, "a,\"b,c\"\n\"say \"\"hi\"\"\"\n");
}
