//! Arena-snake game server library.

pub mod collision;
pub mod config;
pub mod entity;
pub mod server;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use server::{run, GameState, Session, SessionRegistry};
