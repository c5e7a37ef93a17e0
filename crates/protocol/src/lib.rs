//! Shared wire protocol for the arena-snake game.
//!
//! This crate contains:
//! - Newline framing over raw socket bytes
//! - Record definitions for both directions (JSON bodies)
//! - Shared 2D geometry (`Vec2D`)

mod error;
mod framing;
mod vector;
pub mod records;

pub use error::ProtocolError;
pub use framing::LineFramer;
pub use vector::Vec2D;
