//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (rackets 1 then 2, powerups in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod kinematics;
pub mod powerups;
pub mod state;
pub mod tick;

pub use collision::{FrameVolumes, Wall, racket_deflection, resolve_collisions, wall_reflection};
pub use geometry::{
    Aabb, AabbContact, classify_sphere_aabb, make_aabb, sphere_intersects_aabb,
    sphere_intersects_sphere,
};
pub use input::{Direction, InputEvent, InputState, TickInput};
pub use kinematics::{RacketMotion, update_ball, update_racket};
pub use powerups::{SPAWN_THRESHOLDS, apply_effect, in_spawn_window, select_kind, try_spawn};
pub use state::{
    Ball, GameEvent, GameState, MatchPhase, PlayerId, Powerup, PowerupKind, Racket,
};
pub use tick::{FrameTime, step, tick};
