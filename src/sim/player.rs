//! The player entity: a circle that only moves vertically
//!
//! The world scrolls past the player, so `pos.x` never changes within a session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{TILT_DIVISOR, TILT_MAX, TILT_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity, positive is downward
    pub vy: f32,
    /// Cosmetic tilt in radians, derived from `vy`
    pub tilt: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius,
            vy: 0.0,
            tilt: 0.0,
        }
    }

    /// Advance one step: gravity, terminal velocity, position, tilt
    pub fn integrate(&mut self, dt: f32, gravity: f32, max_fall: f32) {
        self.vy += gravity * dt;
        if self.vy > max_fall {
            self.vy = max_fall;
        }
        self.pos.y += self.vy * dt;
        self.tilt = tilt_for(self.vy);
    }

    /// Replace vertical velocity with an upward impulse (no cooldown)
    #[inline]
    pub fn flap(&mut self, impulse: f32) {
        self.vy = -impulse;
    }

    /// Top of the collision circle
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottom of the collision circle
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Left edge of the collision circle
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }
}

/// Nose-up when rising, nose-down when falling
#[inline]
pub fn tilt_for(vy: f32) -> f32 {
    (vy / TILT_DIVISOR).clamp(TILT_MIN, TILT_MAX)
}
