//! Powerup spawning, collection and effects
//!
//! A spawn attempt happens whenever absolute time falls inside a short window
//! at the start of every spawn period. The kind comes from a single uniform
//! draw compared against cumulative thresholds, so the odds are 10% for the
//! first kind and 30% for each of the others. Effects are permanent.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use super::geometry::sphere_intersects_sphere;
use super::state::{GameEvent, GameState, Powerup, PowerupKind};
use crate::consts::{MAX_POWERUPS, POWERUP_FACTOR};
use crate::settings::MatchConfig;

/// Cumulative selection thresholds, in `PowerupKind::ALL` order
pub const SPAWN_THRESHOLDS: [f64; 4] = [0.1, 0.4, 0.7, 1.0];

/// Spawn area: x in [-10, 10], y in [-5, 0]
const SPAWN_HALF_WIDTH: f64 = 10.0;
const SPAWN_HEIGHT: f64 = 5.0;

/// True when `t` sits inside a spawn window (never at t = 0)
pub fn in_spawn_window(t: f64, config: &MatchConfig) -> bool {
    t != 0.0 && t.rem_euclid(config.spawn_period) < config.spawn_window
}

/// First kind whose cumulative threshold exceeds the draw
pub fn select_kind(draw: f64) -> PowerupKind {
    PowerupKind::ALL
        .iter()
        .zip(SPAWN_THRESHOLDS)
        .find(|(_, threshold)| draw < *threshold)
        .map(|(kind, _)| *kind)
        .unwrap_or(PowerupKind::IncreaseRacketSpeed)
}

/// Random spawn point in the play plane
pub fn spawn_position<R: Rng>(rng: &mut R) -> DVec3 {
    let x = rng.random::<f64>() * 2.0 * SPAWN_HALF_WIDTH - SPAWN_HALF_WIDTH;
    let y = rng.random::<f64>() * SPAWN_HEIGHT - SPAWN_HEIGHT;
    DVec3::new(x, y, 0.0)
}

/// Spawn a powerup if `t` is in a window and there is room
///
/// Returns the new powerup's ID.
pub fn try_spawn(state: &mut GameState, t: f64) -> Option<u32> {
    let cap = state.config.max_powerups.min(MAX_POWERUPS);
    if !in_spawn_window(t, &state.config) || state.powerups.len() >= cap {
        return None;
    }

    let position = spawn_position(&mut state.rng);
    let kind = select_kind(state.rng.random::<f64>());
    let id = state.next_entity_id();
    state.powerups.push(Powerup {
        id,
        kind,
        position,
        color: kind.color(),
    });
    state.events.push(GameEvent::PowerupSpawned { id, kind });
    log::debug!(
        "Spawned powerup {id} ({}) at ({:.2}, {:.2}), {} active",
        kind.as_str(),
        position.x,
        position.y,
        state.powerups.len()
    );
    Some(id)
}

/// Collect the first powerup the ball overlaps, if any
pub fn collect(state: &mut GameState) -> Option<PowerupKind> {
    let ball = state.ball;
    let radius = state.config.powerup_radius;
    let index = state
        .powerups
        .iter()
        .position(|p| sphere_intersects_sphere(ball.position, ball.radius, p.position, radius))?;

    let powerup = state.powerups.remove(index);
    apply_effect(state, powerup.kind);
    state.events.push(GameEvent::PowerupCollected {
        id: powerup.id,
        kind: powerup.kind,
    });
    log::info!("Collected powerup {} ({})", powerup.id, powerup.kind.as_str());
    Some(powerup.kind)
}

/// Apply a powerup effect to the match
///
/// Results are kept within the configured safe range: racket size never
/// drops below `min_racket_size` and ball speed never exceeds
/// `max_ball_speed`.
pub fn apply_effect(state: &mut GameState, kind: PowerupKind) {
    let config = &mut state.config;
    match kind {
        PowerupKind::IncreaseBallSpeed => {
            let speed = config.ball_speed * POWERUP_FACTOR;
            if speed > config.max_ball_speed {
                log::warn!("Ball speed {speed:.3} capped at {}", config.max_ball_speed);
            }
            config.ball_speed = speed.min(config.max_ball_speed);
        }
        PowerupKind::RandomBallAngle => {
            let angle = state.rng.random_range(0.0..TAU);
            state.ball.set_angle(angle);
        }
        PowerupKind::DecreaseRacketSize => {
            let size = config.racket_size / POWERUP_FACTOR;
            if size < config.min_racket_size {
                log::warn!("Racket size {size:.3} held at {}", config.min_racket_size);
            }
            config.racket_size = size.max(config.min_racket_size);
        }
        PowerupKind::IncreaseRacketSpeed => {
            config.max_v *= POWERUP_FACTOR;
        }
    }
}
