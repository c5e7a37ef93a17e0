//! World state management.
//!
//! Holds every entity and runs the per-tick simulation: snake movement,
//! collision resolution, powerup cooldowns and snake respawns.

use crate::collision::{
    head_hits_body, head_hits_powerup, head_hits_wall, SELF_COLLISION_IMMUNE_SEGMENTS,
};
use crate::entity::{Powerup, Snake, Wall};
use protocol::records::Direction;
use protocol::Vec2D;
use rand::Rng;
use std::collections::BTreeMap;

/// Spawn coordinates are drawn from one of two corner bands, this far
/// from the origin on both axes.
pub const SPAWN_BAND_NEAR: i32 = 450;
pub const SPAWN_BAND_FAR: i32 = 850;

/// Powerups land on a grid of this pitch.
pub const POWERUP_GRID: f64 = 10.0;
/// Grid cells per axis on each side of the origin.
pub const POWERUP_GRID_RANGE: i32 = 96;

/// Powerups seeded into a fresh world.
pub const INITIAL_POWERUPS: usize = 100;

/// The game world containing all entities.
///
/// Entities live in ordered maps so every broadcast lists them in a
/// stable order. Snakes are never removed, a disconnected player's
/// snake stays as a permanent corpse.
#[derive(Debug, Default)]
pub struct World {
    /// Arena size, echoed to clients in the handshake.
    pub size: u64,
    /// Ticks between a snake's death and respawn eligibility.
    pub respawn_rate: u64,
    /// Completed tick count.
    pub time: u64,

    pub walls: BTreeMap<u64, Wall>,
    pub powerups: BTreeMap<u64, Powerup>,
    pub snakes: BTreeMap<u64, Snake>,
}

impl World {
    pub fn new(size: u64, respawn_rate: u64) -> Self {
        Self {
            size,
            respawn_rate,
            ..Default::default()
        }
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.insert(wall.id, wall);
    }

    /// Seed `count` powerups at random grid points, numbering on from
    /// the current population.
    pub fn add_powerups(&mut self, count: usize) {
        let start = self.powerups.len() as u64;
        for id in start..start + count as u64 {
            self.powerups.insert(id, Powerup::new(id, random_grid_point()));
        }
    }

    /// Place a snake for `id` at a random corner-band position with a
    /// random cardinal heading. Replaces any previous snake under that
    /// id, which is how respawns work. Spawn positions are not checked
    /// against other bodies.
    pub fn spawn_snake(&mut self, id: u64, name: &str) {
        let mut rng = rand::rng();
        // One coin flip picks the band for both coordinates, so snakes
        // start near the negative-negative or positive-positive corner.
        let band = if rng.random_bool(0.5) {
            -SPAWN_BAND_FAR..-SPAWN_BAND_NEAR
        } else {
            SPAWN_BAND_NEAR..SPAWN_BAND_FAR
        };
        let head = Vec2D::new(
            f64::from(rng.random_range(band.clone())),
            f64::from(rng.random_range(band)),
        );
        let heading = match rng.random_range(0..4) {
            0 => Vec2D::UP,
            1 => Vec2D::DOWN,
            2 => Vec2D::LEFT,
            _ => Vec2D::RIGHT,
        };
        self.snakes
            .insert(id, Snake::spawn(id, name.to_string(), head, heading));
    }

    /// Apply a client's steering intent. Takes effect on the next tick.
    pub fn apply_intent(&mut self, id: u64, dir: Direction) {
        if let Some(snake) = self.snakes.get_mut(&id) {
            snake.steer(dir.as_vector());
        }
    }

    pub fn mark_disconnected(&mut self, id: u64) {
        if let Some(snake) = self.snakes.get_mut(&id) {
            snake.mark_disconnected();
        }
    }

    /// Run one simulation tick: respawn eligible snakes, move living
    /// ones and resolve their collisions, then revive cooled-down
    /// powerups.
    pub fn update(&mut self) {
        let ids: Vec<u64> = self.snakes.keys().copied().collect();
        for id in ids {
            let Some(snake) = self.snakes.get(&id) else {
                continue;
            };
            if !snake.is_alive() {
                if snake.ready_to_respawn(self.time, self.respawn_rate) {
                    let name = snake.name.clone();
                    // The respawned snake sits out the rest of this tick.
                    self.spawn_snake(id, &name);
                }
                continue;
            }
            if let Some(snake) = self.snakes.get_mut(&id) {
                snake.advance(self.time);
            }
            self.resolve_collisions(id);
        }

        for powerup in self.powerups.values_mut() {
            if powerup.ready_to_revive(self.time) {
                powerup.revive();
            }
        }

        self.time += 1;
    }

    /// Reset every snake's one-tick event flags. Called after the
    /// tick's frame has been serialized.
    pub fn clear_transient_flags(&mut self) {
        for snake in self.snakes.values_mut() {
            snake.clear_transient_flags();
        }
    }

    /// Check one snake's head against bodies, powerups and walls. A
    /// fatal hit kills the snake and ends its checks for this tick.
    fn resolve_collisions(&mut self, id: u64) {
        let head = match self.snakes.get(&id) {
            Some(snake) if snake.is_alive() => snake.head(),
            _ => return,
        };

        // Own body skips the segments nearest the head. Enemy bodies
        // only kill while their owner is alive, corpses are passable.
        let mut fatal = false;
        for (other_id, other) in &self.snakes {
            if *other_id == id {
                if head_hits_body(head, &other.body, SELF_COLLISION_IMMUNE_SEGMENTS) {
                    fatal = true;
                    break;
                }
            } else if other.is_alive() && head_hits_body(head, &other.body, 0) {
                fatal = true;
                break;
            }
        }
        if fatal {
            let time = self.time;
            if let Some(snake) = self.snakes.get_mut(&id) {
                snake.crash(time);
            }
            return;
        }

        // Every uncollected powerup in range is taken this tick.
        let collected: Vec<u64> = self
            .powerups
            .values()
            .filter(|p| !p.is_collected() && head_hits_powerup(head, p.loc))
            .map(|p| p.id)
            .collect();
        for powerup_id in collected {
            let dest = random_grid_point();
            if let Some(powerup) = self.powerups.get_mut(&powerup_id) {
                powerup.collect(self.time, dest);
            }
            if let Some(snake) = self.snakes.get_mut(&id) {
                snake.eat(self.time);
            }
        }

        for wall in self.walls.values() {
            if head_hits_wall(head, wall.p1, wall.p2) {
                let time = self.time;
                if let Some(snake) = self.snakes.get_mut(&id) {
                    snake.crash(time);
                }
                return;
            }
        }
    }
}

/// Random point on the powerup grid.
fn random_grid_point() -> Vec2D {
    let mut rng = rand::rng();
    Vec2D::new(
        f64::from(rng.random_range(-POWERUP_GRID_RANGE..=POWERUP_GRID_RANGE)) * POWERUP_GRID,
        f64::from(rng.random_range(-POWERUP_GRID_RANGE..=POWERUP_GRID_RANGE)) * POWERUP_GRID,
    )
}
