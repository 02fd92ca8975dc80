//! Phong Pong - two-player 3D Pong with mid-match powerups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, powerups, match state)
//! - `scene`: Pose snapshots handed to an external renderer
//! - `settings`: Match tuning with defaults and JSON loading
//! - `driver`: Frame driver, computer players and the headless runner

pub mod driver;
pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{FrameSnapshot, Pose, Renderer};
pub use settings::{ConfigError, MatchConfig};

use glam::DVec3;
use std::f64::consts::TAU;

/// Game configuration constants
pub mod consts {
    /// Frame period the reference tuning was authored against (60 Hz)
    pub const REFERENCE_DT: f64 = 1.0 / 60.0;

    /// Arena interior half extents (walls sit just outside)
    pub const ARENA_HALF_WIDTH: f64 = 13.5;
    pub const ARENA_HALF_HEIGHT: f64 = 7.5;
    /// Half thickness of every wall slab
    pub const WALL_HALF_THICKNESS: f64 = 1.0;
    /// Half size of wall slabs along their two long axes
    pub const WALL_HALF_SPAN: f64 = 20.0;

    /// Racket defaults
    pub const RACKET_X: f64 = 12.0;
    pub const RACKET_HALF_WIDTH: f64 = 1.0;
    pub const RACKET_HALF_DEPTH: f64 = 1.0;
    pub const RACKET_SIZE: f64 = 2.5;
    pub const RACKET_ACCELERATION: f64 = 0.005;
    pub const RACKET_DAMPING: f64 = 0.95;
    pub const RACKET_MAX_V: f64 = 0.0625;
    /// Smallest half height a racket may shrink to
    pub const MIN_RACKET_SIZE: f64 = 0.2;
    /// Angle added per unit of racket velocity on contact
    pub const SPIN_FACTOR: f64 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 1.0;
    pub const BALL_SPEED: f64 = 0.05;
    /// Per-frame cap; above this the ball can tunnel through a racket
    pub const MAX_BALL_SPEED: f64 = 1.0;

    /// Powerup defaults
    pub const POWERUP_RADIUS: f64 = 0.5;
    pub const MAX_POWERUPS: usize = 5;
    pub const POWERUP_SPAWN_PERIOD: f64 = 5.0;
    pub const POWERUP_SPAWN_WINDOW: f64 = 0.01;
    /// Multiplier used by every powerup effect
    pub const POWERUP_FACTOR: f64 = 1.5;
}

/// Normalize an angle into [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit direction in the play plane for a heading angle
#[inline]
pub fn direction(angle: f64) -> DVec3 {
    DVec3::new(angle.cos(), angle.sin(), 0.0)
}
