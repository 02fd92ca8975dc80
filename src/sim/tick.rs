//! Per-frame simulation step
//!
//! Core game loop that advances a match by exactly one rendered frame.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::input::TickInput;
use super::kinematics::{update_ball, update_racket};
use super::powerups;
use super::state::{GameEvent, GameState, MatchPhase, PlayerId};

/// Frame timing supplied by the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds since match start (monotonic)
    pub t: f64,
    /// Seconds since the previous frame
    pub dt: f64,
}

impl FrameTime {
    pub fn new(t: f64, dt: f64) -> Self {
        Self { t, dt }
    }

    /// Timing of the `n`th frame at a fixed frame rate
    ///
    /// Divides rather than accumulating so whole seconds land exactly.
    pub fn at_rate(n: u64, fps: f64) -> Self {
        Self {
            t: n as f64 / fps,
            dt: 1.0 / fps,
        }
    }
}

/// Advance the match by one frame
///
/// A pause toggle consumes the frame: the match switches between Running and
/// Paused and nothing else moves. While Paused or GameOver the state is left
/// untouched apart from the cleared event list.
pub fn tick(state: &mut GameState, input: &TickInput, frame: FrameTime) {
    state.events.clear();

    if input.pause {
        match state.phase {
            MatchPhase::Running => {
                state.phase = MatchPhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused at frame {}", state.frame);
            }
            MatchPhase::Paused => {
                state.phase = MatchPhase::Running;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed at frame {}", state.frame);
            }
            MatchPhase::GameOver { .. } => {}
        }
        return;
    }

    if state.phase != MatchPhase::Running {
        return;
    }

    state.frame += 1;
    state.time = frame.t;
    let scale = state.config.time_scale(frame.dt);

    // Rackets
    for player in [PlayerId::One, PlayerId::Two] {
        let (up, down) = input.held(player);
        let config = &state.config;
        let racket = match player {
            PlayerId::One => &mut state.racket1,
            PlayerId::Two => &mut state.racket2,
        };
        update_racket(racket, up, down, config, scale);
    }

    // Ball
    update_ball(
        &mut state.ball,
        state.config.ball_speed,
        scale,
        state.config.max_ball_speed,
    );

    // Collisions (may end the match)
    resolve_collisions(state);
    if state.phase.is_over() {
        return;
    }

    powerups::try_spawn(state, frame.t);
}

/// Pure form of `tick`: consume a state and return the next one
pub fn step(mut state: GameState, input: &TickInput, frame: FrameTime) -> GameState {
    tick(&mut state, input, frame);
    state
}
