//! Facefeed: real-time face-detection event ingestion
//!
//! Pipeline: websocket client → event decoder → subject state store → readers.
//! The store is the only shared mutable state; everything upstream of it is
//! stateless per frame.

pub mod core;
pub mod types;

// =============================================================================
// DOMAIN CONSTANTS
// =============================================================================

/// Number of subject slots the store holds.
/// The detector assigns subject ids 1 and 2; anything else is ignored.
pub const SUBJECT_SLOTS: usize = 2;

/// Name of the inbound event carrying one detection frame
pub const DETECTION_EVENT: &str = "detection";

/// Default address of the face-tracking service
pub const DEFAULT_ENDPOINT: &str = "ws://192.168.42.143:3000/";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
