use std::time::{Duration, Instant};

use crate::plate::draft::{DraftError, DraftStore, PlateDraft, now_millis};
use crate::plate::layout::PlateLayout;

/// Quiet period before a changed draft is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(1);

/// Debounced draft writer. Each change replaces the pending snapshot and
/// restarts the quiet period; at most one write happens per quiet period.
/// Time is supplied by the caller.
#[derive(Debug)]
pub struct DraftAutosaver<S: DraftStore> {
    store: S,
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    draft: PlateDraft,
    due: Instant,
}

impl<S: DraftStore> DraftAutosaver<S> {
    pub fn new(store: S) -> Self {
        Self::with_delay(store, AUTOSAVE_DELAY)
    }

    pub fn with_delay(store: S, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a state change. A blank layout cancels any pending write.
    pub fn on_change(&mut self, layout: &PlateLayout, now: Instant) {
        if layout.is_blank() {
            self.pending = None;
            return;
        }
        self.pending = Some(Pending {
            draft: PlateDraft::capture(layout, 0),
            due: now + self.delay,
        });
    }

    /// Like `on_change`, but a blank layout also removes the stored draft so
    /// that the next restore does not bring the old plate back.
    pub fn record_change(&mut self, layout: &PlateLayout, now: Instant) -> Result<(), DraftError> {
        if layout.is_blank() {
            return self.discard();
        }
        self.on_change(layout, now);
        Ok(())
    }

    /// Writes the pending draft if its quiet period has elapsed. Returns
    /// whether a write happened.
    pub fn poll(&mut self, now: Instant) -> Result<bool, DraftError> {
        match &self.pending {
            Some(p) if p.due <= now => self.flush(),
            _ => Ok(false),
        }
    }

    /// Writes the pending draft immediately.
    pub fn flush(&mut self) -> Result<bool, DraftError> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(false);
        };
        pending.draft.timestamp = now_millis();
        if let Err(e) = self.store.save(&pending.draft) {
            // Keep the snapshot so the next poll retries.
            self.pending = Some(pending);
            return Err(e);
        }
        Ok(true)
    }

    /// Drops the pending write without saving.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancels any pending write and removes the stored draft; used after a
    /// successful plate creation or an explicit clear.
    pub fn discard(&mut self) -> Result<(), DraftError> {
        self.cancel();
        self.store.clear()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/autosave.rs"]
mod tests;
