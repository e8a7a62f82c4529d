//! Event decoder: raw detection payloads → normalized frames
//!
//! The upstream detector is untrusted and sends partial frames during
//! subject acquisition and loss. Frames missing required fields are
//! rejected here so they never reach the store.
//!
//! Wire shape of one payload (object, or a JSON string of the same):
//! `{ detection: { _box: { _x, _y } }, player: 1|2, expressions?: { happy } }`

use serde_json::Value;
use thiserror::Error;

use crate::types::DetectionFrame;

/// Why a payload did not produce a frame
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is absent. Non-fatal: the event is dropped and
    /// nothing is mutated.
    #[error("payload missing required field `{0}`")]
    Missing(&'static str),

    /// A text payload was not valid JSON. Fatal to this single event only.
    #[error("unparseable text payload: {0}")]
    Unparseable(#[from] serde_json::Error),
}

impl DecodeError {
    /// True for the silently-dropped case, false for the fatal one
    pub fn is_drop(&self) -> bool {
        matches!(self, DecodeError::Missing(_))
    }
}

/// Decoder for `detection` payloads
#[derive(Debug, Default)]
pub struct EventDecoder;

impl EventDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode one raw payload into a frame
    pub fn decode(&self, raw: &Value) -> Result<DetectionFrame, DecodeError> {
        // Text-encoded payloads are parsed first; a parse failure is fatal
        // to this invocation
        let parsed;
        let payload = match raw {
            Value::String(text) => {
                parsed = serde_json::from_str::<Value>(text)?;
                &parsed
            }
            other => other,
        };

        // Presence checks, in order: payload, detection, _box, player
        let object = payload.as_object().ok_or(DecodeError::Missing("payload"))?;
        let detection = object
            .get("detection")
            .and_then(Value::as_object)
            .ok_or(DecodeError::Missing("detection"))?;
        let bounding_box = detection
            .get("_box")
            .and_then(Value::as_object)
            .ok_or(DecodeError::Missing("detection._box"))?;
        let player = object
            .get("player")
            .and_then(Value::as_i64)
            .ok_or(DecodeError::Missing("player"))?;

        let x = bounding_box.get("_x").and_then(Value::as_f64).unwrap_or(0.0);
        let y = bounding_box.get("_y").and_then(Value::as_f64).unwrap_or(0.0);

        // A missing expressions map invalidates nothing; the happy score is
        // simply unavailable for this frame
        let happy = object
            .get("expressions")
            .and_then(Value::as_object)
            .and_then(|e| e.get("happy"))
            .and_then(Value::as_f64);

        Ok(DetectionFrame { player, x, y, happy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let decoder = EventDecoder::new();
        let payload = json!({
            "detection": { "_box": { "_x": 10.0, "_y": 20.0 } },
            "player": 1,
            "expressions": { "happy": 0.9, "angry": 0.1 }
        });

        let frame = decoder.decode(&payload).unwrap();
        assert_eq!(frame.player, 1);
        assert_eq!(frame.x, 10.0);
        assert_eq!(frame.y, 20.0);
        assert_eq!(frame.happy, Some(0.9));
    }

    #[test]
    fn test_decode_text_encoded_payload() {
        let decoder = EventDecoder::new();
        let text = r#"{"detection":{"_box":{"_x":5,"_y":7}},"player":2,"expressions":{"happy":0.3}}"#;
        let raw = Value::String(text.to_string());

        let frame = decoder.decode(&raw).unwrap();
        assert_eq!(frame.player, 2);
        assert_eq!(frame.x, 5.0);
        assert_eq!(frame.y, 7.0);
        assert_eq!(frame.happy, Some(0.3));
    }

    #[test]
    fn test_missing_expressions_keeps_position() {
        let decoder = EventDecoder::new();
        let payload = json!({
            "detection": { "_box": { "_x": 15.0, "_y": 25.0 } },
            "player": 1
        });

        let frame = decoder.decode(&payload).unwrap();
        assert_eq!(frame.x, 15.0);
        assert_eq!(frame.y, 25.0);
        assert_eq!(frame.happy, None);
    }

    #[test]
    fn test_missing_detection_is_dropped() {
        let decoder = EventDecoder::new();
        let payload = json!({ "player": 1 });

        let err = decoder.decode(&payload).unwrap_err();
        assert!(err.is_drop());
    }

    #[test]
    fn test_missing_box_is_dropped() {
        let decoder = EventDecoder::new();
        let payload = json!({ "detection": {}, "player": 1 });

        let err = decoder.decode(&payload).unwrap_err();
        assert!(err.is_drop());
    }

    #[test]
    fn test_missing_player_is_dropped() {
        let decoder = EventDecoder::new();
        let payload = json!({ "detection": { "_box": { "_x": 1.0, "_y": 2.0 } } });

        let err = decoder.decode(&payload).unwrap_err();
        assert!(err.is_drop());
    }

    #[test]
    fn test_non_object_payload_is_dropped() {
        let decoder = EventDecoder::new();

        let err = decoder.decode(&json!(42)).unwrap_err();
        assert!(err.is_drop());
    }

    #[test]
    fn test_unparseable_text_is_fatal_not_drop() {
        let decoder = EventDecoder::new();
        let raw = Value::String("{not json".to_string());

        let err = decoder.decode(&raw).unwrap_err();
        assert!(!err.is_drop());
        assert!(matches!(err, DecodeError::Unparseable(_)));
    }
}
