//! Subject identity and per-slot state

use serde::{Deserialize, Serialize};

/// Identity of a tracked subject. The external detector assigns small integer
/// ids; the domain defines exactly two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectId {
    One,
    Two,
}

impl SubjectId {
    /// Map a wire-level `player` id to a slot. Unknown ids have no slot.
    pub fn from_player(player: i64) -> Option<Self> {
        match player {
            1 => Some(SubjectId::One),
            2 => Some(SubjectId::Two),
            _ => None,
        }
    }

    /// The wire-level id for this subject
    pub fn player(&self) -> i64 {
        match self {
            SubjectId::One => 1,
            SubjectId::Two => 2,
        }
    }

    /// Zero-based index into the slot array
    pub fn index(&self) -> usize {
        match self {
            SubjectId::One => 0,
            SubjectId::Two => 1,
        }
    }

    /// Both subjects, in slot order
    pub fn all() -> [SubjectId; crate::SUBJECT_SLOTS] {
        [SubjectId::One, SubjectId::Two]
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.player())
    }
}

/// Latest-known state for one subject slot. Zeroed at construction,
/// overwritten in place, never destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectState {
    /// x of the bounding box top-left corner, as delivered
    pub position_x: f64,
    /// y of the bounding box top-left corner, as delivered
    pub position_y: f64,
    /// Confidence for the `happy` expression, in [0, 1] per the detector
    pub happy_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_players_map_to_slots() {
        assert_eq!(SubjectId::from_player(1), Some(SubjectId::One));
        assert_eq!(SubjectId::from_player(2), Some(SubjectId::Two));
    }

    #[test]
    fn test_unknown_players_have_no_slot() {
        assert_eq!(SubjectId::from_player(0), None);
        assert_eq!(SubjectId::from_player(3), None);
        assert_eq!(SubjectId::from_player(-1), None);
    }

    #[test]
    fn test_default_state_is_zeroed() {
        let state = SubjectState::default();
        assert_eq!(state.position_x, 0.0);
        assert_eq!(state.position_y, 0.0);
        assert_eq!(state.happy_score, 0.0);
    }
}
