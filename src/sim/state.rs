//! Game state and core simulation types
//!
//! `GameState` owns everything a match needs to advance: both rackets, the
//! ball, live powerups, the (mutable) match config and the seeded RNG.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::MatchConfig;
use crate::{direction, normalize_angle};

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Left racket, defends the left wall
    One,
    /// Right racket, defends the right wall
    Two,
}

impl PlayerId {
    /// -1 for the left side, +1 for the right
    pub fn side(self) -> f64 {
        match self {
            PlayerId::One => -1.0,
            PlayerId::Two => 1.0,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Running,
    Paused,
    /// Terminal
    GameOver { winner: PlayerId },
}

impl MatchPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchPhase::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }
}

/// Vertical kinematic state of one racket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Racket {
    pub player: PlayerId,
    /// Fixed horizontal position
    pub x: f64,
    pub position_y: f64,
    pub velocity_y: f64,
}

impl Racket {
    pub fn new(player: PlayerId, config: &MatchConfig) -> Self {
        Self {
            player,
            x: player.side() * config.racket_x,
            position_y: 0.0,
            velocity_y: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        DVec3::new(self.x, self.position_y, 0.0)
    }

    /// Half extents of the racket box for the current racket size
    #[inline]
    pub fn half_extents(config: &MatchConfig) -> DVec3 {
        DVec3::new(
            config.racket_half_width,
            config.racket_size,
            config.racket_half_depth,
        )
    }
}

/// The ball: a heading angle plus a per-frame speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: DVec3,
    /// Heading in radians, kept in [0, 2π)
    pub angle: f64,
    pub radius: f64,
}

impl Ball {
    pub fn new(angle: f64, radius: f64) -> Self {
        Self {
            position: DVec3::ZERO,
            angle: normalize_angle(angle),
            radius,
        }
    }

    #[inline]
    pub fn direction(&self) -> DVec3 {
        direction(self.angle)
    }

    /// Set a new heading, normalized
    #[inline]
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }
}

/// Power-up types, in spawn-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    IncreaseBallSpeed,
    RandomBallAngle,
    DecreaseRacketSize,
    IncreaseRacketSpeed,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::IncreaseBallSpeed,
        PowerupKind::RandomBallAngle,
        PowerupKind::DecreaseRacketSize,
        PowerupKind::IncreaseRacketSpeed,
    ];

    /// Display color (linear RGB)
    pub fn color(&self) -> [f32; 3] {
        match self {
            PowerupKind::IncreaseBallSpeed => [1.0, 0.5, 0.0],
            PowerupKind::RandomBallAngle => [0.6, 0.2, 1.0],
            PowerupKind::DecreaseRacketSize => [0.0, 0.8, 1.0],
            PowerupKind::IncreaseRacketSpeed => [0.2, 1.0, 0.2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::IncreaseBallSpeed => "increase ball speed",
            PowerupKind::RandomBallAngle => "random ball angle",
            PowerupKind::DecreaseRacketSize => "decrease racket size",
            PowerupKind::IncreaseRacketSpeed => "increase racket speed",
        }
    }
}

/// A collectible sitting in the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub position: DVec3,
    pub color: [f32; 3],
}

/// Something notable that happened during a tick (for sound/UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RacketHit { player: PlayerId, angle: f64 },
    WallBounce { angle: f64 },
    PowerupSpawned { id: u32, kind: PowerupKind },
    PowerupCollected { id: u32, kind: PowerupKind },
    Goal { winner: PlayerId },
    Paused,
    Resumed,
}

/// Headings closer than this to straight up/down are re-rolled at serve
const SERVE_VERTICAL_MARGIN: f64 = PI / 6.0;

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the match was created with
    pub seed: u64,
    pub rng: Pcg32,
    /// Live config; powerups mutate it
    pub config: MatchConfig,
    pub phase: MatchPhase,
    pub racket1: Racket,
    pub racket2: Racket,
    pub ball: Ball,
    /// Live powerups in spawn order
    pub powerups: Vec<Powerup>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Number of simulated (non-paused) frames
    pub frame: u64,
    /// Absolute time of the most recent simulated frame
    pub time: f64,
    next_id: u32,
}

impl PartialEq for GameState {
    /// Compares simulation state; the RNG is covered by `seed` and `frame`
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.config == other.config
            && self.phase == other.phase
            && self.racket1 == other.racket1
            && self.racket2 == other.racket2
            && self.ball == other.ball
            && self.powerups == other.powerups
            && self.frame == other.frame
            && self.time == other.time
            && self.next_id == other.next_id
    }
}

impl GameState {
    /// Create a match with the given config and seed
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let angle = serve_angle(&mut rng);
        log::info!("New match (seed {seed}), serving at {angle:.3} rad");

        Self {
            seed,
            rng,
            racket1: Racket::new(PlayerId::One, &config),
            racket2: Racket::new(PlayerId::Two, &config),
            ball: Ball::new(angle, config.ball_radius),
            config,
            phase: MatchPhase::Running,
            powerups: Vec::new(),
            events: Vec::new(),
            frame: 0,
            time: 0.0,
            next_id: 1,
        }
    }

    /// Match with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(MatchConfig::default(), seed)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn racket(&self, player: PlayerId) -> &Racket {
        match player {
            PlayerId::One => &self.racket1,
            PlayerId::Two => &self.racket2,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.phase.winner()
    }
}

/// Random serve heading that is not close to vertical
fn serve_angle(rng: &mut Pcg32) -> f64 {
    loop {
        let angle = rng.random_range(0.0..TAU);
        let from_vertical = (angle.rem_euclid(PI) - FRAC_PI_2).abs();
        if from_vertical > SERVE_VERTICAL_MARGIN {
            return angle;
        }
    }
}
