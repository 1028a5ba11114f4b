use std::time::{Duration, Instant};

use super::*;
use crate::model::aliquot::AliquotId;
use crate::plate::draft::MemoryDraftStore;
use crate::plate::well::WellPosition;

fn pos(label: &str) -> WellPosition {
    label.parse().unwrap()
}

fn layout_with(n: usize) -> PlateLayout {
    let mut layout = PlateLayout::new("PLT", "204123456789");
    for (i, p) in WellPosition::all().take(n).enumerate() {
        layout.assign_aliquot(p, AliquotId::from(i as u64 + 1));
    }
    layout
}

#[test]
fn test_waits_for_quiet_period() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::new(MemoryDraftStore::new());
    saver.on_change(&layout_with(1), t0);
    assert!(saver.is_pending());
    assert!(!saver.poll(t0 + Duration::from_millis(999)).unwrap());
    assert_eq!(saver.store().writes(), 0);
    assert!(saver.poll(t0 + AUTOSAVE_DELAY).unwrap());
    assert_eq!(saver.store().writes(), 1);
    assert!(!saver.is_pending());
    assert!(!saver.poll(t0 + Duration::from_secs(10)).unwrap());
    assert_eq!(saver.store().writes(), 1);
}

#[test]
fn test_changes_reset_the_timer_and_write_once() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::new(MemoryDraftStore::new());
    for i in 0..5u64 {
        let now = t0 + Duration::from_millis(i * 500);
        saver.on_change(&layout_with(i as usize + 1), now);
        assert!(!saver.poll(now + Duration::from_millis(400)).unwrap());
    }
    let last = t0 + Duration::from_millis(2_000);
    assert!(saver.poll(last + AUTOSAVE_DELAY).unwrap());
    assert_eq!(saver.store().writes(), 1);
    let saved = saver.store().load().unwrap();
    assert_eq!(saved.wells.len(), 5);
    assert!(saved.timestamp > 0);
}

#[test]
fn test_cancel_drops_pending_write() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::new(MemoryDraftStore::new());
    saver.on_change(&layout_with(2), t0);
    assert!(saver.cancel());
    assert!(!saver.cancel());
    assert!(!saver.poll(t0 + Duration::from_secs(5)).unwrap());
    assert!(saver.store().load().is_none());
}

#[test]
fn test_blank_layout_is_not_saved() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::new(MemoryDraftStore::new());
    saver.on_change(&layout_with(1), t0);
    saver.on_change(&PlateLayout::default(), t0);
    assert!(!saver.is_pending());
    assert!(!saver.flush().unwrap());
}

#[test]
fn test_discard_removes_saved_draft() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::with_delay(MemoryDraftStore::new(), Duration::ZERO);
    let mut layout = layout_with(1);
    layout.remove_aliquot(pos("A1"));
    layout.assign_aliquot(pos("H12"), AliquotId::from("9"));
    saver.on_change(&layout, t0);
    assert!(saver.poll(t0).unwrap());
    assert!(saver.store().load().is_some());
    saver.discard().unwrap();
    assert!(saver.store().load().is_none());
}

#[test]
fn test_recording_a_blank_layout_drops_the_stored_draft() {
    let t0 = Instant::now();
    let mut saver = DraftAutosaver::new(MemoryDraftStore::new());
    saver.record_change(&layout_with(3), t0).unwrap();
    assert!(saver.flush().unwrap());
    assert!(saver.store().load().is_some());

    let mut layout = PlateLayout::new("", "");
    assert!(layout.is_blank());
    saver.record_change(&layout, t0 + AUTOSAVE_DELAY).unwrap();
    assert!(!saver.is_pending());
    assert!(saver.store().load().is_none());

    layout.name = "PLT-2".to_string();
    saver.record_change(&layout, t0 + AUTOSAVE_DELAY).unwrap();
    assert!(saver.is_pending());
}
