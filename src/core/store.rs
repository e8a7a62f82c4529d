//! Subject state store: latest-known state per tracked subject
//!
//! Two fixed slots, last-write-wins per slot. One writer timeline (the
//! event-delivery task) and an arbitrary-rate reader timeline share the
//! store by handle; a short rwlock around the slot array keeps every
//! per-frame update atomic, so readers never observe a torn write. Neither
//! path blocks for more than a few field copies.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::types::{DetectionFrame, SubjectId, SubjectState};
use crate::SUBJECT_SLOTS;

/// Shared store of per-subject state. Cheap to clone; clones share slots.
#[derive(Debug, Clone, Default)]
pub struct SubjectStore {
    slots: Arc<RwLock<[SubjectState; SUBJECT_SLOTS]>>,
}

impl SubjectStore {
    /// Create a store with both slots zeroed
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a decoded frame. Frames for unknown subject ids are a no-op;
    /// position fields are always overwritten, the happy score only when
    /// the frame carries one (preserving the last-known expression across
    /// frames that omit it).
    pub fn apply(&self, frame: &DetectionFrame) {
        let Some(subject) = SubjectId::from_player(frame.player) else {
            return;
        };

        let mut slots = self.slots.write();
        let slot = &mut slots[subject.index()];
        slot.position_x = frame.x;
        slot.position_y = frame.y;
        if let Some(happy) = frame.happy {
            slot.happy_score = happy;
        }
    }

    /// Zero both slots
    pub fn reset(&self) {
        *self.slots.write() = [SubjectState::default(); SUBJECT_SLOTS];
    }

    // =========================================================================
    // READER SURFACE
    // Pure, non-blocking, infallible. Zero before the first valid event.
    // =========================================================================

    /// Stored position x for a subject
    pub fn position_x(&self, subject: SubjectId) -> f64 {
        self.slots.read()[subject.index()].position_x
    }

    /// Stored position y for a subject
    pub fn position_y(&self, subject: SubjectId) -> f64 {
        self.slots.read()[subject.index()].position_y
    }

    /// Stored happy score for a subject
    pub fn happy_score(&self, subject: SubjectId) -> f64 {
        self.slots.read()[subject.index()].happy_score
    }

    /// Copy of both slots, captured under one lock
    pub fn snapshot(&self) -> [SubjectState; SUBJECT_SLOTS] {
        *self.slots.read()
    }
}
