use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::aliquot::{Aliquot, AliquotId};
use crate::plate::sentrix::{is_valid_barcode, is_valid_position};
use crate::plate::well::WellPosition;
use crate::plate::{PlateError, PlateViolation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Well {
    pub position: WellPosition,
    pub aliquot_id: AliquotId,
    pub sentrix_barcode: String,
    pub sentrix_position: String,
}

/// In-progress 96-well plate: sparse map of well position to assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateLayout {
    pub name: String,
    sentrix_barcode: String,
    wells: BTreeMap<WellPosition, Well>,
}

/// Well row of the plate creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellSubmission {
    pub well: WellPosition,
    pub aliquot_id: AliquotId,
    pub sentrix_barcode: String,
    pub sentrix_position: String,
}

/// Body of the plate creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateSubmission {
    pub name: String,
    pub wells: Vec<WellSubmission>,
}

/// Response of the plate creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateCreated {
    pub id: String,
    pub well_count: usize,
}

impl PlateLayout {
    pub fn new(name: impl Into<String>, sentrix_barcode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sentrix_barcode: sentrix_barcode.into(),
            wells: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        name: String,
        sentrix_barcode: String,
        wells: BTreeMap<WellPosition, Well>,
    ) -> Self {
        Self {
            name,
            sentrix_barcode,
            wells,
        }
    }

    pub fn sentrix_barcode(&self) -> &str {
        &self.sentrix_barcode
    }

    /// Sets the plate-wide barcode and stamps it on every assigned well.
    pub fn set_sentrix_barcode(&mut self, barcode: impl Into<String>) {
        self.sentrix_barcode = barcode.into();
        for well in self.wells.values_mut() {
            well.sentrix_barcode = self.sentrix_barcode.clone();
        }
    }

    pub fn wells(&self) -> &BTreeMap<WellPosition, Well> {
        &self.wells
    }

    pub fn well(&self, position: WellPosition) -> Option<&Well> {
        self.wells.get(&position)
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// True when there is nothing worth keeping as a draft.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.sentrix_barcode.is_empty() && self.is_empty()
    }

    /// Places an aliquot in a well, replacing any previous occupant, with the
    /// default sentrix position for that well. Does nothing and returns
    /// `false` while the plate has no sentrix barcode.
    pub fn assign_aliquot(&mut self, position: WellPosition, aliquot_id: AliquotId) -> bool {
        if self.sentrix_barcode.trim().is_empty() {
            tracing::debug!(well = %position, "ignoring assignment: plate has no sentrix barcode");
            return false;
        }
        self.wells.insert(
            position,
            Well {
                position,
                aliquot_id,
                sentrix_barcode: self.sentrix_barcode.clone(),
                sentrix_position: position.default_sentrix_position(),
            },
        );
        true
    }

    pub fn remove_aliquot(&mut self, position: WellPosition) -> Option<Well> {
        self.wells.remove(&position)
    }

    pub fn set_sentrix_position(
        &mut self,
        position: WellPosition,
        value: &str,
    ) -> Result<(), PlateError> {
        if !is_valid_position(value) {
            return Err(PlateError::InvalidSentrixPosition(value.to_string()));
        }
        let well = self
            .wells
            .get_mut(&position)
            .ok_or(PlateError::EmptyWell(position))?;
        well.sentrix_position = value.to_string();
        Ok(())
    }

    /// Resets every assigned well to its default sentrix position.
    pub fn auto_fill_positions(&mut self) {
        for (position, well) in self.wells.iter_mut() {
            well.sentrix_position = position.default_sentrix_position();
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.sentrix_barcode.clear();
        self.wells.clear();
    }

    /// Well-level checks: duplicate aliquots, duplicate sentrix coordinates
    /// and malformed sentrix positions. Every violation is returned.
    pub fn validate_for_submission(&self) -> Vec<PlateViolation> {
        let mut by_aliquot: BTreeMap<&AliquotId, Vec<WellPosition>> = BTreeMap::new();
        let mut by_sentrix: BTreeMap<(&str, &str), Vec<WellPosition>> = BTreeMap::new();
        let mut malformed = Vec::new();

        for (position, well) in &self.wells {
            by_aliquot.entry(&well.aliquot_id).or_default().push(*position);
            by_sentrix
                .entry((well.sentrix_barcode.as_str(), well.sentrix_position.as_str()))
                .or_default()
                .push(*position);
            if !is_valid_position(&well.sentrix_position) {
                malformed.push(PlateViolation::MalformedSentrixPosition {
                    well: *position,
                    position: well.sentrix_position.clone(),
                });
            }
        }

        let mut violations = Vec::new();
        for (aliquot_id, wells) in by_aliquot {
            if wells.len() > 1 {
                violations.push(PlateViolation::DuplicateAliquot {
                    aliquot_id: aliquot_id.clone(),
                    wells,
                });
            }
        }
        for ((barcode, position), wells) in by_sentrix {
            if wells.len() > 1 {
                violations.push(PlateViolation::DuplicateSentrixPosition {
                    barcode: barcode.to_string(),
                    position: position.to_string(),
                    wells,
                });
            }
        }
        violations.extend(malformed);
        violations
    }

    /// Full plate creation check. On success returns the request body with
    /// wells in row-major order.
    pub fn prepare_submission(&self) -> Result<PlateSubmission, Vec<PlateViolation>> {
        let mut violations = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            violations.push(PlateViolation::MissingName);
        }
        let barcode = self.sentrix_barcode.trim();
        if barcode.is_empty() {
            violations.push(PlateViolation::MissingBarcode);
        } else if !is_valid_barcode(barcode) {
            violations.push(PlateViolation::InvalidBarcode(barcode.to_string()));
        }
        if self.wells.is_empty() {
            violations.push(PlateViolation::NoWells);
        }
        violations.extend(self.validate_for_submission());
        if !violations.is_empty() {
            return Err(violations);
        }

        let wells = self
            .wells
            .values()
            .map(|w| WellSubmission {
                well: w.position,
                aliquot_id: w.aliquot_id.clone(),
                sentrix_barcode: w.sentrix_barcode.clone(),
                sentrix_position: w.sentrix_position.clone(),
            })
            .collect();
        Ok(PlateSubmission {
            name: name.to_string(),
            wells,
        })
    }

    pub fn placed_aliquots(&self) -> BTreeSet<&AliquotId> {
        self.wells.values().map(|w| &w.aliquot_id).collect()
    }

    /// Plateable aliquots from `pool` that are not already on this plate.
    pub fn available_aliquots<'a>(&self, pool: &'a [Aliquot]) -> Vec<&'a Aliquot> {
        let placed = self.placed_aliquots();
        pool.iter()
            .filter(|a| a.is_plateable() && !placed.contains(&a.id))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/layout.rs"]
mod tests;
