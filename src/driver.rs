//! Frame driver
//!
//! Glues input events, the simulation step and a renderer together: the
//! external frame callback calls `Game::frame` once per rendered frame.

use std::env;

use crate::scene::{FrameSnapshot, Renderer};
use crate::settings::{ConfigError, MatchConfig};
use crate::sim::{
    Direction, FrameTime, GameState, InputEvent, InputState, MatchPhase, PlayerId, tick,
};

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    input: InputState,
}

impl Game {
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
            input: InputState::new(),
        }
    }

    /// Queue an input event for the next frame
    pub fn push(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// Run one frame and hand the result to the renderer
    pub fn frame(&mut self, time: FrameTime, renderer: &mut impl Renderer) -> FrameSnapshot {
        let input = self.input.take();
        tick(&mut self.state, &input, time);
        let snapshot = FrameSnapshot::capture(&self.state);
        renderer.present(&snapshot);
        snapshot
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }
}

/// Computer player: chase the ball while it approaches, drift home otherwise
///
/// `dead_zone` is how far the ball may sit from the racket center before the
/// racket reacts.
pub fn autopilot(state: &GameState, player: PlayerId, dead_zone: f64) -> Option<InputEvent> {
    let racket = state.racket(player);
    let approaching = state.ball.direction().x * player.side() > 0.0;
    let target = if approaching { state.ball.position.y } else { 0.0 };

    let offset = target - racket.position_y;
    if offset.abs() <= dead_zone {
        return None;
    }
    let direction = if offset > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(InputEvent::Pressed { player, direction })
}

/// Runtime knobs for the headless binary (not gameplay tuning)
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: MatchConfig,
    pub seed: u64,
    pub max_frames: u64,
    pub fps: f64,
    /// Print the final snapshot as JSON
    pub json: bool,
}

impl RunOptions {
    /// Read `PHONG_PONG_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = match env::var("PHONG_PONG_CONFIG") {
            Ok(path) => MatchConfig::load(path)?,
            Err(_) => MatchConfig::default(),
        };
        let seed = env::var("PHONG_PONG_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0x5EED);
        let max_frames = env::var("PHONG_PONG_FRAMES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 60 * 5);
        let fps = env::var("PHONG_PONG_FPS")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|fps| *fps > 0.0)
            .unwrap_or(60.0);
        let json = matches!(env::var("PHONG_PONG_JSON").as_deref(), Ok("1") | Ok("true"));

        Ok(Self {
            config,
            seed,
            max_frames,
            fps,
            json,
        })
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub winner: Option<PlayerId>,
    pub last: FrameSnapshot,
}

/// Play a whole match between two autopilots
pub fn run_headless(options: &RunOptions, renderer: &mut impl Renderer) -> RunSummary {
    let mut game = Game::new(options.config.clone(), options.seed);
    let mut last = FrameSnapshot::capture(&game.state);
    let mut frames = 0;

    for n in 1..=options.max_frames {
        for player in [PlayerId::One, PlayerId::Two] {
            let dead_zone = game.state.config.racket_size * 0.5;
            if let Some(event) = autopilot(&game.state, player, dead_zone) {
                game.push(event);
            }
        }
        last = game.frame(FrameTime::at_rate(n, options.fps), renderer);
        frames = n;
        if game.phase().is_over() {
            break;
        }
    }

    RunSummary {
        frames,
        winner: game.state.winner(),
        last,
    }
}
