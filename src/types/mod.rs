//! Core types for Facefeed

mod detection;
mod report;
mod subject;

pub use detection::DetectionFrame;
pub use report::{SlotReport, StoreReport};
pub use subject::{SubjectId, SubjectState};
