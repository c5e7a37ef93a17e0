//! 2D vector math shared by the simulation and the wire format.
//!
//! The world uses screen-style axes: X grows right, Y grows down, so
//! "up" is negative Y. On the wire coordinates serialize with uppercase
//! `X`/`Y` keys.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// An immutable 2D vector of `f64` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2D {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

impl Vec2D {
    /// Unit cardinal pointing up (negative Y).
    pub const UP: Self = Self { x: 0.0, y: -1.0 };
    /// Unit cardinal pointing down.
    pub const DOWN: Self = Self { x: 0.0, y: 1.0 };
    /// Unit cardinal pointing left.
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    /// Unit cardinal pointing right.
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// This vector scaled to unit length. The zero vector stays zero.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Angle in degrees, clockwise from straight up.
    pub fn angle(&self) -> f64 {
        self.x.atan2(-self.y).to_degrees()
    }

    /// True when `other` points exactly opposite to `self`.
    ///
    /// Both sides are expected to be unit cardinals; used to reject
    /// 180-degree reversal intents.
    pub fn is_opposite_cardinal(&self, other: &Self) -> bool {
        (self.x != 0.0 || self.y != 0.0) && *other == -*self
    }
}

impl Add for Vec2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
