//! Game entities.
//!
//! This module defines all entity types in the world.

mod powerup;
mod snake;
mod wall;

pub use powerup::{Powerup, POWERUP_RESPAWN_TICKS};
pub use snake::{Lifecycle, Snake, DEFAULT_SPEED, GROWTH_TICKS, SPAWN_LENGTH};
pub use wall::Wall;
