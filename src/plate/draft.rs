use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plate::layout::{PlateLayout, Well};
use crate::plate::well::WellPosition;

pub const DRAFT_FILE_NAME: &str = "plate_draft.json";

/// Uncommitted plate builder state as persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateDraft {
    #[serde(default)]
    pub plate_name: String,
    #[serde(default)]
    pub sentrix_barcode: String,
    #[serde(default)]
    pub wells: BTreeMap<WellPosition, Well>,
    /// Unix milliseconds at capture.
    #[serde(default)]
    pub timestamp: u64,
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PlateDraft {
    pub fn capture(layout: &PlateLayout, timestamp: u64) -> Self {
        Self {
            plate_name: layout.name.clone(),
            sentrix_barcode: layout.sentrix_barcode().to_string(),
            wells: layout.wells().clone(),
            timestamp,
        }
    }

    pub fn into_layout(self) -> PlateLayout {
        // The map key is authoritative for the well position.
        let wells = self
            .wells
            .into_iter()
            .map(|(position, mut well)| {
                well.position = position;
                (position, well)
            })
            .collect();
        PlateLayout::from_parts(self.plate_name, self.sentrix_barcode, wells)
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Persistence port for the single plate draft.
pub trait DraftStore {
    fn save(&self, draft: &PlateDraft) -> Result<(), DraftError>;
    /// Returns `None` when no draft exists or the stored one is unreadable.
    fn load(&self) -> Option<PlateDraft>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// Draft kept as JSON in a fixed file under a directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(DRAFT_FILE_NAME)
    }

    fn io_err(path: &Path, source: std::io::Error) -> DraftError {
        DraftError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, draft: &PlateDraft) -> Result<(), DraftError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_err(&self.dir, e))?;
        let path = self.path();
        let tmp = self.dir.join(format!("{DRAFT_FILE_NAME}.tmp"));
        let json = serde_json::to_vec_pretty(draft)?;
        fs::write(&tmp, json).map_err(|e| Self::io_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_err(&path, e))?;
        tracing::debug!(path = %path.display(), wells = draft.wells.len(), "plate draft saved");
        Ok(())
    }

    fn load(&self) -> Option<PlateDraft> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "plate draft unreadable; ignoring");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "plate draft corrupt; ignoring");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), DraftError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "plate draft cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(&path, e)),
        }
    }
}

/// Draft held as encoded JSON in memory, the way a browser store holds it.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: std::cell::RefCell<Option<String>>,
    writes: std::cell::RefCell<usize>,
}

#[cfg(test)]
impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text as the draft, bypassing encoding.
    pub fn put_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }

    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

#[cfg(test)]
impl DraftStore for MemoryDraftStore {
    fn save(&self, draft: &PlateDraft) -> Result<(), DraftError> {
        let json = serde_json::to_string(draft)?;
        *self.slot.borrow_mut() = Some(json);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> Option<PlateDraft> {
        let slot = self.slot.borrow();
        let raw = slot.as_deref()?;
        serde_json::from_str(raw)
            .map_err(|e| tracing::warn!(error = %e, "plate draft corrupt; ignoring"))
            .ok()
    }

    fn clear(&self) -> Result<(), DraftError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// Restores the stored draft into a layout, or an empty layout when none.
pub fn restore_layout(store: &dyn DraftStore) -> PlateLayout {
    match store.load() {
        Some(draft) => {
            tracing::info!(
                plate = %draft.plate_name,
                wells = draft.wells.len(),
                "draft loaded from previous session"
            );
            draft.into_layout()
        }
        None => PlateLayout::default(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/draft.rs"]
mod tests;
