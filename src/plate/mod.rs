use thiserror::Error;

use crate::model::aliquot::AliquotId;
use crate::plate::well::WellPosition;

pub mod autosave;
pub mod draft;
pub mod layout;
pub mod samplesheet;
pub mod sentrix;
pub mod well;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateError {
    #[error("invalid well position '{0}' (expected A1..H12)")]
    InvalidWell(String),
    #[error("invalid sentrix position format '{0}'; use R##C## (e.g. R01C01)")]
    InvalidSentrixPosition(String),
    #[error("well {0} has no aliquot assigned")]
    EmptyWell(WellPosition),
}

/// A problem that blocks plate creation. Reported together, never one at a
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateViolation {
    #[error("plate name is required")]
    MissingName,
    #[error("sentrix barcode is required")]
    MissingBarcode,
    #[error("invalid sentrix barcode '{0}'; must be 10-12 digits")]
    InvalidBarcode(String),
    #[error("add at least one well to the plate")]
    NoWells,
    #[error("aliquot {aliquot_id} used multiple times (wells {})", join_wells(.wells))]
    DuplicateAliquot {
        aliquot_id: AliquotId,
        wells: Vec<WellPosition>,
    },
    #[error("duplicate sentrix position {barcode}_{position} (wells {})", join_wells(.wells))]
    DuplicateSentrixPosition {
        barcode: String,
        position: String,
        wells: Vec<WellPosition>,
    },
    #[error("invalid sentrix position format in well {well}: '{position}'")]
    MalformedSentrixPosition { well: WellPosition, position: String },
}

fn join_wells(wells: &[WellPosition]) -> String {
    wells
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
