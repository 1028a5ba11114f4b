use super::*;

#[test]
fn test_parse_labels() {
    let a1: WellPosition = "A1".parse().unwrap();
    assert_eq!((a1.row(), a1.col()), (1, 1));
    let h12: WellPosition = "H12".parse().unwrap();
    assert_eq!((h12.row(), h12.col()), (8, 12));
    assert_eq!("c7".parse::<WellPosition>().unwrap().to_string(), "C7");
}

#[test]
fn test_reject_off_grid() {
    for bad in ["", "A", "A0", "A13", "I1", "A01", "1A", "AA1", "A1x", "Z99"] {
        assert!(bad.parse::<WellPosition>().is_err(), "{bad}");
    }
    assert!(matches!(
        "I1".parse::<WellPosition>(),
        Err(PlateError::InvalidWell(s)) if s == "I1"
    ));
}

#[test]
fn test_all_positions_row_major() {
    let all: Vec<String> = WellPosition::all().map(|p| p.to_string()).collect();
    assert_eq!(all.len(), PLATE_WELLS);
    assert_eq!(all[0], "A1");
    assert_eq!(all[11], "A12");
    assert_eq!(all[12], "B1");
    assert_eq!(all[95], "H12");

    let mut sorted: Vec<WellPosition> = WellPosition::all().collect();
    sorted.reverse();
    sorted.sort();
    assert_eq!(sorted[1].to_string(), "A2");
}

#[test]
fn test_default_sentrix_position() {
    let p: WellPosition = "A1".parse().unwrap();
    assert_eq!(p.default_sentrix_position(), "R01C01");
    let p: WellPosition = "H12".parse().unwrap();
    assert_eq!(p.default_sentrix_position(), "R08C12");
    let p: WellPosition = "C5".parse().unwrap();
    assert_eq!(p.default_sentrix_position(), "R03C05");
}

#[test]
fn test_serde_as_label() {
    let p: WellPosition = "B2".parse().unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), "\"B2\"");
    let back: WellPosition = serde_json::from_str("\"B2\"").unwrap();
    assert_eq!(back, p);
    assert!(serde_json::from_str::<WellPosition>("\"Q2\"").is_err());
}
