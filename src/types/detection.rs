//! Normalized detection frame
//!
//! One frame = one observation of one subject from the external detector.
//! Frames are transient: decoded, applied to the store, discarded.

use serde::{Deserialize, Serialize};

/// A validated detection event, ready to be applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    /// Wire-level subject id. Kept raw here; the store decides whether a
    /// slot exists for it.
    pub player: i64,
    /// Bounding box top-left x
    pub x: f64,
    /// Bounding box top-left y
    pub y: f64,
    /// `happy` expression confidence, absent when the detector omitted
    /// expressions for this frame
    pub happy: Option<f64>,
}

impl DetectionFrame {
    /// Create a frame with an expression score
    pub fn new(player: i64, x: f64, y: f64, happy: f64) -> Self {
        Self {
            player,
            x,
            y,
            happy: Some(happy),
        }
    }

    /// Create a position-only frame (detector sent no expressions)
    pub fn position_only(player: i64, x: f64, y: f64) -> Self {
        Self {
            player,
            x,
            y,
            happy: None,
        }
    }
}
