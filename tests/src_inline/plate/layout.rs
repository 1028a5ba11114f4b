use super::*;
use crate::model::status::QcFlag;

const BARCODE: &str = "204123456789";

fn pos(label: &str) -> WellPosition {
    label.parse().unwrap()
}

fn plate() -> PlateLayout {
    PlateLayout::new("PLT-A", BARCODE)
}

fn aliquot(id: &str, flag: Option<QcFlag>) -> Aliquot {
    Aliquot {
        id: AliquotId::from(id),
        sample_id: format!("SAMP-{id}"),
        qc_flag: flag,
        qc: None,
    }
}

#[test]
fn test_assign_sets_defaults() {
    let mut p = plate();
    assert!(p.assign_aliquot(pos("B3"), AliquotId::from("5")));
    let w = p.well(pos("B3")).unwrap();
    assert_eq!(w.aliquot_id.as_str(), "5");
    assert_eq!(w.sentrix_barcode, BARCODE);
    assert_eq!(w.sentrix_position, "R02C03");
}

#[test]
fn test_assign_without_barcode_is_ignored() {
    let mut p = PlateLayout::new("PLT-A", "");
    assert!(!p.assign_aliquot(pos("A1"), AliquotId::from("5")));
    assert!(p.is_empty());
}

#[test]
fn test_assign_overwrites_and_remove() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("5"));
    p.assign_aliquot(pos("A1"), AliquotId::from("6"));
    assert_eq!(p.len(), 1);
    assert_eq!(p.well(pos("A1")).unwrap().aliquot_id.as_str(), "6");

    let removed = p.remove_aliquot(pos("A1")).unwrap();
    assert_eq!(removed.aliquot_id.as_str(), "6");
    assert!(p.remove_aliquot(pos("A1")).is_none());
    assert!(p.is_empty());
}

#[test]
fn test_set_sentrix_position_format() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("5"));

    let err = p.set_sentrix_position(pos("A1"), "R1C1").unwrap_err();
    assert_eq!(err, PlateError::InvalidSentrixPosition("R1C1".to_string()));
    assert_eq!(p.well(pos("A1")).unwrap().sentrix_position, "R01C01");

    p.set_sentrix_position(pos("A1"), "R05C07").unwrap();
    assert_eq!(p.well(pos("A1")).unwrap().sentrix_position, "R05C07");

    assert_eq!(
        p.set_sentrix_position(pos("H1"), "R01C01"),
        Err(PlateError::EmptyWell(pos("H1")))
    );
    assert!(p.well(pos("H1")).is_none());
}

#[test]
fn test_duplicate_aliquot_is_reported_with_id() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("5"));
    p.assign_aliquot(pos("B2"), AliquotId::from("5"));
    let v = p.validate_for_submission();
    assert_eq!(
        v,
        vec![PlateViolation::DuplicateAliquot {
            aliquot_id: AliquotId::from("5"),
            wells: vec![pos("A1"), pos("B2")],
        }]
    );
    assert!(v[0].to_string().contains("aliquot 5"));
    assert!(p.prepare_submission().is_err());

    p.remove_aliquot(pos("B2"));
    assert!(p.validate_for_submission().is_empty());
    assert!(p.prepare_submission().is_ok());
}

#[test]
fn test_all_violations_reported_together() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("5"));
    p.assign_aliquot(pos("A2"), AliquotId::from("5"));
    p.assign_aliquot(pos("A3"), AliquotId::from("7"));
    p.set_sentrix_position(pos("A3"), "R01C02").unwrap();
    p.assign_aliquot(pos("A4"), AliquotId::from("8"));
    // Bypass the setter to simulate a draft restored with a bad value.
    p.wells.get_mut(&pos("A4")).unwrap().sentrix_position = "R1C4".to_string();

    let v = p.validate_for_submission();
    assert_eq!(v.len(), 3);
    assert!(matches!(&v[0], PlateViolation::DuplicateAliquot { aliquot_id, .. } if aliquot_id.as_str() == "5"));
    assert!(matches!(
        &v[1],
        PlateViolation::DuplicateSentrixPosition { position, wells, .. }
            if position == "R01C02" && wells == &vec![pos("A2"), pos("A3")]
    ));
    assert!(matches!(&v[2], PlateViolation::MalformedSentrixPosition { well, .. } if *well == pos("A4")));
}

#[test]
fn test_prepare_submission_checks_plate_fields() {
    let p = PlateLayout::new("  ", "12345");
    let v = p.prepare_submission().unwrap_err();
    assert_eq!(
        v,
        vec![
            PlateViolation::MissingName,
            PlateViolation::InvalidBarcode("12345".to_string()),
            PlateViolation::NoWells,
        ]
    );

    let p = PlateLayout::new("PLT", "");
    let v = p.prepare_submission().unwrap_err();
    assert!(v.contains(&PlateViolation::MissingBarcode));
}

#[test]
fn test_prepare_submission_payload() {
    let mut p = plate();
    p.assign_aliquot(pos("B1"), AliquotId::from("ALQ-2"));
    p.assign_aliquot(pos("A12"), AliquotId::from("ALQ-1"));
    let s = p.prepare_submission().unwrap();
    assert_eq!(s.name, "PLT-A");
    let wells: Vec<String> = s.wells.iter().map(|w| w.well.to_string()).collect();
    assert_eq!(wells, vec!["A12", "B1"]);

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["wells"][0]["well"], "A12");
    assert_eq!(json["wells"][0]["aliquot_id"], "ALQ-1");
    assert_eq!(json["wells"][0]["sentrix_barcode"], BARCODE);
    assert_eq!(json["wells"][1]["sentrix_position"], "R02C01");
}

#[test]
fn test_auto_fill_is_idempotent() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("1"));
    p.assign_aliquot(pos("D6"), AliquotId::from("2"));
    p.set_sentrix_position(pos("D6"), "R09C09").unwrap();

    p.auto_fill_positions();
    let once = p.clone();
    p.auto_fill_positions();
    assert_eq!(p, once);
    assert_eq!(p.well(pos("D6")).unwrap().sentrix_position, "R04C06");
}

#[test]
fn test_barcode_change_applies_to_all_wells() {
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("1"));
    p.assign_aliquot(pos("A2"), AliquotId::from("2"));
    p.set_sentrix_barcode("2041234567");
    assert!(p.wells().values().all(|w| w.sentrix_barcode == "2041234567"));
}

#[test]
fn test_available_aliquots() {
    let pool = vec![
        aliquot("1", Some(QcFlag::Pass)),
        aliquot("2", Some(QcFlag::Warn)),
        aliquot("3", Some(QcFlag::Fail)),
        aliquot("4", None),
        aliquot("5", Some(QcFlag::Pass)),
    ];
    let mut p = plate();
    p.assign_aliquot(pos("A1"), AliquotId::from("1"));
    let ids: Vec<&str> = p.available_aliquots(&pool).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "5"]);

    p.remove_aliquot(pos("A1"));
    assert_eq!(p.available_aliquots(&pool).len(), 3);
}

#[test]
fn test_clear_and_blank() {
    let mut p = plate();
    assert!(!p.is_blank());
    p.assign_aliquot(pos("A1"), AliquotId::from("1"));
    p.clear();
    assert!(p.is_blank());
    assert_eq!(p, PlateLayout::default());
}
