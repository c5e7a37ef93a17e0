//! Client -> server records.
//!
//! The first record of a session is the raw display name, not JSON;
//! everything after that is a movement intent.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, Vec2D};

/// The four headings a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit cardinal for this direction (Y grows down).
    pub fn as_vector(self) -> Vec2D {
        match self {
            Direction::Up => Vec2D::UP,
            Direction::Down => Vec2D::DOWN,
            Direction::Left => Vec2D::LEFT,
            Direction::Right => Vec2D::RIGHT,
        }
    }
}

/// A movement intent: `{"moving":"up"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub moving: Direction,
}

impl MoveCommand {
    /// Decode one framed intent record.
    pub fn decode(line: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(line)?;
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_intent() {
        let cmd = MoveCommand::decode(br#"{"moving":"left"}"#).unwrap();
        assert_eq!(cmd.moving, Direction::Left);
        assert_eq!(cmd.moving.as_vector(), Vec2D::LEFT);
    }

    #[test]
    fn test_decode_rejects_unknown_direction() {
        assert!(MoveCommand::decode(br#"{"moving":"diagonal"}"#).is_err());
        assert!(MoveCommand::decode(b"not json").is_err());
    }

    #[test]
    fn test_encode_matches_wire_shape() {
        let json = serde_json::to_string(&MoveCommand {
            moving: Direction::Up,
        })
        .unwrap();
        assert_eq!(json, r#"{"moving":"up"}"#);
    }
}
