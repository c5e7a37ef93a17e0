//! Collectible powerups.

use protocol::records::PowerupRecord;
use protocol::Vec2D;

/// Ticks a collected powerup stays off the board before reviving.
pub const POWERUP_RESPAWN_TICKS: u64 = 75;

/// A collectible powerup. Collected powerups are relocated immediately
/// but broadcast as dead until their cooldown expires.
#[derive(Debug, Clone, Copy)]
pub struct Powerup {
    pub id: u64,
    pub loc: Vec2D,
    collected: bool,
    collected_at: u64,
}

impl Powerup {
    pub fn new(id: u64, loc: Vec2D) -> Self {
        Self {
            id,
            loc,
            collected: false,
            collected_at: 0,
        }
    }

    /// Take the powerup off the board and move it to its next location.
    pub fn collect(&mut self, tick: u64, next_loc: Vec2D) {
        self.collected = true;
        self.collected_at = tick;
        self.loc = next_loc;
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn ready_to_revive(&self, tick: u64) -> bool {
        self.collected && tick.saturating_sub(self.collected_at) >= POWERUP_RESPAWN_TICKS
    }

    pub fn revive(&mut self) {
        self.collected = false;
    }

    pub fn to_record(&self) -> PowerupRecord {
        PowerupRecord {
            id: self.id,
            loc: self.loc,
            died: self.collected,
        }
    }
}
