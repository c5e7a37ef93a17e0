//! Static wall segments.

use protocol::records::WallRecord;
use protocol::Vec2D;

/// A static wall segment. Endpoints share an axis.
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub id: u64,
    pub p1: Vec2D,
    pub p2: Vec2D,
}

impl Wall {
    pub fn new(id: u64, p1: Vec2D, p2: Vec2D) -> Self {
        Self { id, p1, p2 }
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.p1.x == self.p2.x || self.p1.y == self.p2.y
    }

    pub fn to_record(&self) -> WallRecord {
        WallRecord {
            id: self.id,
            p1: self.p1,
            p2: self.p2,
        }
    }
}
