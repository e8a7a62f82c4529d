//! Report structures for terminal display
//!
//! A report is a point-in-time copy of the store, formatted for the
//! presentation side of the CLI.

use serde::{Deserialize, Serialize};

use crate::types::{SubjectId, SubjectState};
use crate::SUBJECT_SLOTS;

/// One slot's current values
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotReport {
    /// Which subject this row describes
    pub subject: SubjectId,
    /// Stored position x
    pub x: f64,
    /// Stored position y
    pub y: f64,
    /// Stored happy score
    pub happy: f64,
}

/// Both slots, captured together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreReport {
    pub slots: [SlotReport; SUBJECT_SLOTS],
}

impl StoreReport {
    /// Build a report from a store snapshot
    pub fn new(snapshot: [SubjectState; SUBJECT_SLOTS]) -> Self {
        let mut slots = [SlotReport {
            subject: SubjectId::One,
            x: 0.0,
            y: 0.0,
            happy: 0.0,
        }; SUBJECT_SLOTS];

        for subject in SubjectId::all() {
            let state = snapshot[subject.index()];
            slots[subject.index()] = SlotReport {
                subject,
                x: state.position_x,
                y: state.position_y,
                happy: state.happy_score,
            };
        }

        Self { slots }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mut out = String::new();
        for slot in &self.slots {
            // Green once an expression has been seen, gray before
            let color = if slot.happy > 0.0 {
                "\x1b[32m"
            } else {
                "\x1b[90m"
            };
            out.push_str(&format!(
                "{}face {} | x={:.1} y={:.1} | happy={:.3}\x1b[0m\n",
                color, slot.subject, slot.x, slot.y, slot.happy
            ));
        }
        out.pop();
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        self.slots
            .iter()
            .map(|slot| {
                format!(
                    "face={} | x={:.1} | y={:.1} | happy={:.3}",
                    slot.subject, slot.x, slot.y, slot.happy
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_copies_slot_values() {
        let mut snapshot = [SubjectState::default(); SUBJECT_SLOTS];
        snapshot[0].position_x = 12.0;
        snapshot[1].happy_score = 0.4;

        let report = StoreReport::new(snapshot);
        assert_eq!(report.slots[0].x, 12.0);
        assert_eq!(report.slots[0].subject, SubjectId::One);
        assert_eq!(report.slots[1].happy, 0.4);
        assert_eq!(report.slots[1].subject, SubjectId::Two);
    }

    #[test]
    fn test_parseable_format_contains_fields() {
        let report = StoreReport::new([SubjectState::default(); SUBJECT_SLOTS]);
        let text = report.to_parseable_string();
        assert!(text.contains("face=1"));
        assert!(text.contains("face=2"));
        assert!(text.contains("x="));
        assert!(text.contains("happy="));
    }
}
