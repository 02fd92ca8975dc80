//! Racket and ball motion
//!
//! Both advance once per frame. With `scale_by_dt` off (the default) every
//! frame moves by the tuned per-frame amount regardless of wall-clock time.

use crate::settings::MatchConfig;

use super::state::{Ball, Racket};

/// What happened to a racket this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacketMotion {
    Free,
    /// Hit the arena limit and stopped dead
    Clamped,
}

/// Advance one racket by a frame
///
/// Damping is applied first, then acceleration from the held direction.
/// Holding both directions (or neither) only decays. The position is kept
/// within `±(arena_half_height - racket_size)` using the current racket size;
/// reaching the limit zeroes the velocity.
pub fn update_racket(
    racket: &mut Racket,
    up: bool,
    down: bool,
    config: &MatchConfig,
    scale: f64,
) -> RacketMotion {
    let max_v = config.max_v;

    racket.velocity_y *= config.damping.powf(scale);

    match (up, down) {
        (true, false) => {
            racket.velocity_y = (racket.velocity_y + config.acceleration * scale).min(max_v);
        }
        (false, true) => {
            racket.velocity_y = (racket.velocity_y - config.acceleration * scale).max(-max_v);
        }
        _ => {}
    }
    // Holds even if max_v was lowered between frames
    racket.velocity_y = racket.velocity_y.clamp(-max_v, max_v);

    let limit = config.racket_limit();
    let y = racket.position_y + racket.velocity_y * scale;
    if y.abs() >= limit {
        racket.position_y = y.clamp(-limit, limit);
        racket.velocity_y = 0.0;
        RacketMotion::Clamped
    } else {
        racket.position_y = y;
        RacketMotion::Free
    }
}

/// Move the ball along its heading and renormalize the angle
///
/// Travel per frame never exceeds `max_step`, however long the frame was.
pub fn update_ball(ball: &mut Ball, speed: f64, scale: f64, max_step: f64) {
    let step = (speed * scale).min(max_step);
    ball.position += ball.direction() * step;
    ball.set_angle(ball.angle);
}
