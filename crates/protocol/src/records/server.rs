//! Server -> client state records.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, Vec2D};

/// One wall, sent once per wall during the handshake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    #[serde(rename = "wall")]
    pub id: u64,
    pub p1: Vec2D,
    pub p2: Vec2D,
}

/// One snake, sent every tick.
///
/// `body` lists vertices tail first, head last; consecutive vertices
/// always share one coordinate. `died` and `join` are transient: true
/// only in the broadcast of the tick the event happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeRecord {
    #[serde(rename = "snake")]
    pub id: u64,
    pub name: String,
    pub body: Vec<Vec2D>,
    pub dir: Vec2D,
    pub score: u64,
    pub died: bool,
    pub alive: bool,
    pub dc: bool,
    pub join: bool,
}

/// One powerup, sent every tick. `died` marks a collection this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupRecord {
    #[serde(rename = "power")]
    pub id: u64,
    pub loc: Vec2D,
    pub died: bool,
}

/// Any state record the server may send after the handshake lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerRecord {
    Snake(SnakeRecord),
    Wall(WallRecord),
    Powerup(PowerupRecord),
}

impl ServerRecord {
    /// Decode one framed record, trying each shape in fixed priority
    /// order: snake, then wall, then powerup. A record matching none of
    /// them is an error, never an implicit powerup.
    pub fn decode(line: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(line)?;
        if let Ok(snake) = serde_json::from_str::<SnakeRecord>(text) {
            return Ok(ServerRecord::Snake(snake));
        }
        if let Ok(wall) = serde_json::from_str::<WallRecord>(text) {
            return Ok(ServerRecord::Wall(wall));
        }
        if let Ok(powerup) = serde_json::from_str::<PowerupRecord>(text) {
            return Ok(ServerRecord::Powerup(powerup));
        }
        Err(ProtocolError::UnknownShape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::encode_record;

    fn sample_snake() -> SnakeRecord {
        SnakeRecord {
            id: 4,
            name: "alice".into(),
            body: vec![Vec2D::new(0.0, 120.0), Vec2D::new(0.0, 0.0)],
            dir: Vec2D::UP,
            score: 3,
            died: false,
            alive: true,
            dc: false,
            join: false,
        }
    }

    #[test]
    fn test_wall_roundtrip() {
        let wall = WallRecord {
            id: 3,
            p1: Vec2D::new(0.0, -50.0),
            p2: Vec2D::new(0.0, 50.0),
        };
        let line = encode_record(&wall).unwrap();
        match ServerRecord::decode(&line[..line.len() - 1]).unwrap() {
            ServerRecord::Wall(back) => assert_eq!(back, wall),
            other => panic!("decoded as {other:?}"),
        }
    }

    #[test]
    fn test_snake_roundtrip() {
        let snake = sample_snake();
        let line = encode_record(&snake).unwrap();
        match ServerRecord::decode(&line[..line.len() - 1]).unwrap() {
            ServerRecord::Snake(back) => assert_eq!(back, snake),
            other => panic!("decoded as {other:?}"),
        }
    }

    #[test]
    fn test_powerup_roundtrip() {
        let powerup = PowerupRecord {
            id: 12,
            loc: Vec2D::new(-960.0, 340.0),
            died: true,
        };
        let line = encode_record(&powerup).unwrap();
        match ServerRecord::decode(&line[..line.len() - 1]).unwrap() {
            ServerRecord::Powerup(back) => assert_eq!(back, powerup),
            other => panic!("decoded as {other:?}"),
        }
    }

    #[test]
    fn test_unknown_shape_is_an_error_not_a_powerup() {
        assert!(matches!(
            ServerRecord::decode(br#"{"mystery":1}"#),
            Err(ProtocolError::UnknownShape)
        ));
    }

    #[test]
    fn test_decode_expected_wire_keys() {
        // Field names exactly as they appear on the wire.
        let line = br#"{"snake":1,"name":"bob","body":[{"X":10.0,"Y":0.0},{"X":130.0,"Y":0.0}],"dir":{"X":1.0,"Y":0.0},"score":0,"died":false,"alive":true,"dc":false,"join":true}"#;
        match ServerRecord::decode(line).unwrap() {
            ServerRecord::Snake(snake) => {
                assert_eq!(snake.id, 1);
                assert_eq!(snake.body.len(), 2);
                assert!(snake.join);
            }
            other => panic!("decoded as {other:?}"),
        }
    }
}
