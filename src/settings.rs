//! Match tuning
//!
//! Every gameplay constant lives here so a match can be replayed or re-tuned
//! without touching the simulation. Powerups mutate `racket_size`, `max_v` and
//! `ball_speed` in place for the rest of the match.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a match configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Rackets ===
    /// Velocity gained per frame while a direction is held
    pub acceleration: f64,
    /// Velocity multiplier applied every frame before input
    pub damping: f64,
    /// Velocity ceiling (raised by IncreaseRacketSpeed)
    pub max_v: f64,
    /// Racket half height (lowered by DecreaseRacketSize)
    pub racket_size: f64,
    pub min_racket_size: f64,
    pub racket_x: f64,
    pub racket_half_width: f64,
    pub racket_half_depth: f64,
    /// Ball angle change per unit of racket velocity at contact
    pub spin_factor: f64,

    // === Ball ===
    /// Distance travelled per frame (raised by IncreaseBallSpeed)
    pub ball_speed: f64,
    pub max_ball_speed: f64,
    pub ball_radius: f64,

    // === Arena ===
    pub arena_half_width: f64,
    pub arena_half_height: f64,
    pub wall_half_thickness: f64,
    pub wall_half_span: f64,

    // === Powerups ===
    pub powerup_radius: f64,
    /// Live powerup cap; may be lowered but never raised above `MAX_POWERUPS`
    pub max_powerups: usize,
    /// Seconds between spawn windows
    pub spawn_period: f64,
    /// Width of each spawn window in seconds
    pub spawn_window: f64,

    // === Timing ===
    /// Scale kinematic deltas by `dt / reference_dt` instead of moving a
    /// fixed amount per frame. Ball travel per frame is still capped at
    /// `max_ball_speed`, so a long frame slows the ball rather than letting
    /// it skip past a racket.
    pub scale_by_dt: bool,
    pub reference_dt: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            acceleration: RACKET_ACCELERATION,
            damping: RACKET_DAMPING,
            max_v: RACKET_MAX_V,
            racket_size: RACKET_SIZE,
            min_racket_size: MIN_RACKET_SIZE,
            racket_x: RACKET_X,
            racket_half_width: RACKET_HALF_WIDTH,
            racket_half_depth: RACKET_HALF_DEPTH,
            spin_factor: SPIN_FACTOR,

            ball_speed: BALL_SPEED,
            max_ball_speed: MAX_BALL_SPEED,
            ball_radius: BALL_RADIUS,

            arena_half_width: ARENA_HALF_WIDTH,
            arena_half_height: ARENA_HALF_HEIGHT,
            wall_half_thickness: WALL_HALF_THICKNESS,
            wall_half_span: WALL_HALF_SPAN,

            powerup_radius: POWERUP_RADIUS,
            max_powerups: MAX_POWERUPS,
            spawn_period: POWERUP_SPAWN_PERIOD,
            spawn_window: POWERUP_SPAWN_WINDOW,

            scale_by_dt: false,
            reference_dt: REFERENCE_DT,
        }
    }
}

impl MatchConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would produce a degenerate match
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("acceleration", self.acceleration),
            ("max_v", self.max_v),
            ("racket_size", self.racket_size),
            ("min_racket_size", self.min_racket_size),
            ("racket_half_width", self.racket_half_width),
            ("racket_half_depth", self.racket_half_depth),
            ("ball_speed", self.ball_speed),
            ("max_ball_speed", self.max_ball_speed),
            ("ball_radius", self.ball_radius),
            ("arena_half_width", self.arena_half_width),
            ("arena_half_height", self.arena_half_height),
            ("wall_half_thickness", self.wall_half_thickness),
            ("wall_half_span", self.wall_half_span),
            ("powerup_radius", self.powerup_radius),
            ("spawn_period", self.spawn_period),
            ("reference_dt", self.reference_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::Invalid(format!(
                "damping must be within [0, 1], got {}",
                self.damping
            )));
        }
        if !(self.spin_factor.is_finite() && self.spin_factor >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spin_factor must be non-negative, got {}",
                self.spin_factor
            )));
        }
        if !(self.spawn_window >= 0.0 && self.spawn_window < self.spawn_period) {
            return Err(ConfigError::Invalid(format!(
                "spawn_window must be within [0, spawn_period), got {}",
                self.spawn_window
            )));
        }
        if self.racket_size >= self.arena_half_height {
            return Err(ConfigError::Invalid(format!(
                "racket_size {} does not fit inside arena half height {}",
                self.racket_size, self.arena_half_height
            )));
        }
        if self.min_racket_size > self.racket_size {
            return Err(ConfigError::Invalid(
                "min_racket_size exceeds racket_size".to_string(),
            ));
        }
        if self.ball_speed > self.max_ball_speed {
            return Err(ConfigError::Invalid(
                "ball_speed exceeds max_ball_speed".to_string(),
            ));
        }
        if !(1..=MAX_POWERUPS).contains(&self.max_powerups) {
            return Err(ConfigError::Invalid(format!(
                "max_powerups must be within [1, {MAX_POWERUPS}], got {}",
                self.max_powerups
            )));
        }
        if self.racket_x + self.racket_half_width >= self.arena_half_width {
            return Err(ConfigError::Invalid(format!(
                "racket at x={} overlaps the goal wall at {}",
                self.racket_x, self.arena_half_width
            )));
        }
        Ok(())
    }

    /// Largest |y| a racket center may reach with the current racket size
    #[inline]
    pub fn racket_limit(&self) -> f64 {
        (self.arena_half_height - self.racket_size).max(0.0)
    }

    /// Per-frame multiplier for kinematic deltas
    #[inline]
    pub fn time_scale(&self, dt: f64) -> f64 {
        if self.scale_by_dt {
            dt / self.reference_dt
        } else {
            1.0
        }
    }
}
