//! The player snake and its movement rules.

use protocol::records::SnakeRecord;
use protocol::Vec2D;

/// Distance a living snake's head travels per tick.
pub const DEFAULT_SPEED: f64 = 6.0;

/// Ticks the tail stays frozen after eating a powerup.
pub const GROWTH_TICKS: u64 = 24;

/// Distance from tail to head at spawn.
pub const SPAWN_LENGTH: f64 = 120.0;

/// Where a snake is in its life cycle. Disconnected snakes stay in the
/// world and are broadcast every tick, but never move or respawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Dead { since: u64 },
    Disconnected,
}

/// A player's snake.
///
/// The body is a polyline of vertices ordered tail-first, so the head is
/// always the last element. Interior vertices mark past turns; the head
/// and tail are the only vertices that move.
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: u64,
    pub name: String,
    pub body: Vec<Vec2D>,
    pub heading: Vec2D,
    /// Heading the snake actually moved with last tick. Differing from
    /// `heading` means the next advance starts a new segment.
    last_heading: Vec2D,
    pub speed: f64,
    pub score: u64,
    pub lifecycle: Lifecycle,
    /// Tick until which the tail stays frozen, if growing.
    growing_until: Option<u64>,
    pub died_this_tick: bool,
    pub joined_this_tick: bool,
}

impl Snake {
    /// Create a freshly spawned snake: a straight two-vertex body ending
    /// at `head`, pointed along `heading`.
    pub fn spawn(id: u64, name: String, head: Vec2D, heading: Vec2D) -> Self {
        let tail = head - heading * SPAWN_LENGTH;
        Self {
            id,
            name,
            body: vec![tail, head],
            heading,
            last_heading: heading,
            speed: DEFAULT_SPEED,
            score: 0,
            lifecycle: Lifecycle::Alive,
            growing_until: None,
            died_this_tick: false,
            joined_this_tick: true,
        }
    }

    pub fn head(&self) -> Vec2D {
        self.body[self.body.len() - 1]
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub fn is_disconnected(&self) -> bool {
        self.lifecycle == Lifecycle::Disconnected
    }

    /// Point the snake along `dir`. Ignored while not alive, and ignored
    /// when `dir` would reverse the current heading. Repeating the
    /// current heading is a no-op.
    pub fn steer(&mut self, dir: Vec2D) {
        if !self.is_alive() || dir.is_opposite_cardinal(&self.heading) {
            return;
        }
        self.heading = dir;
    }

    /// Move the snake one tick: advance the head, then retract the tail
    /// unless a growth window is open.
    pub fn advance(&mut self, tick: u64) {
        let step = self.heading * self.speed;
        if self.heading != self.last_heading {
            // Turn: the old head becomes a fixed corner vertex.
            self.body.push(self.head() + step);
        } else {
            let last = self.body.len() - 1;
            self.body[last] = self.body[last] + step;
        }
        self.last_heading = self.heading;

        match self.growing_until {
            Some(until) => {
                // Tail stays frozen on the expiry tick as well.
                if tick >= until {
                    self.growing_until = None;
                }
            }
            None => self.retract_tail(),
        }
    }

    /// Pull the tail vertex toward its neighbor, dropping it once the
    /// neighbor is reached. The body never shrinks below two vertices.
    fn retract_tail(&mut self) {
        let toward = self.body[1] - self.body[0];
        let remaining = toward.length();
        if remaining <= self.speed {
            if self.body.len() > 2 {
                self.body.remove(0);
            } else {
                self.body[0] = self.body[1];
            }
        } else {
            self.body[0] = self.body[0] + toward.normalized() * self.speed;
        }
    }

    /// Open (or extend) the growth window and bump the score.
    pub fn eat(&mut self, tick: u64) {
        self.growing_until = Some(tick + GROWTH_TICKS);
        self.score += 1;
    }

    /// Kill the snake. It stays in place until respawn.
    pub fn crash(&mut self, tick: u64) {
        self.lifecycle = Lifecycle::Dead { since: tick };
        self.died_this_tick = true;
        self.speed = 0.0;
    }

    /// Mark the snake's player as gone. Terminal state.
    pub fn mark_disconnected(&mut self) {
        self.lifecycle = Lifecycle::Disconnected;
        self.died_this_tick = true;
        self.speed = 0.0;
    }

    pub fn ready_to_respawn(&self, tick: u64, cooldown: u64) -> bool {
        matches!(
            self.lifecycle,
            Lifecycle::Dead { since } if tick.saturating_sub(since) >= cooldown
        )
    }

    pub fn to_record(&self) -> SnakeRecord {
        SnakeRecord {
            id: self.id,
            name: self.name.clone(),
            body: self.body.clone(),
            dir: self.heading,
            score: self.score,
            died: self.died_this_tick,
            alive: self.is_alive(),
            dc: self.is_disconnected(),
            join: self.joined_this_tick,
        }
    }

    /// Reset the one-tick event flags. Called after the tick's frame has
    /// been serialized so each event is broadcast exactly once.
    pub fn clear_transient_flags(&mut self) {
        self.died_this_tick = false;
        self.joined_this_tick = false;
    }
}
