//! Renderer-facing snapshots
//!
//! The simulation never talks to a graphics API. Each frame it produces a
//! `FrameSnapshot` of poses that a renderer adapter draws however it likes.
//! Box poses carry half extents as their scale (a unit cube spanning -1..1
//! scaled by the pose matches the collision volume); sphere poses carry the
//! radius on every axis.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::settings::MatchConfig;
use crate::sim::{GameEvent, GameState, MatchPhase, PowerupKind, Racket, Wall};

/// Position and scale of a renderable entity (always axis-aligned)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub scale: DVec3,
}

impl Pose {
    pub fn new(position: DVec3, scale: DVec3) -> Self {
        Self { position, scale }
    }

    pub fn sphere(position: DVec3, radius: f64) -> Self {
        Self {
            position,
            scale: DVec3::splat(radius),
        }
    }
}

/// Static arena geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPanel {
    /// Backdrop behind the play plane
    Background,
    /// Thin divider at x = 0
    CenterLine,
    Wall(Wall),
}

/// Background sits behind the play plane, as wide as the wall slabs
const BACKGROUND_Z: f64 = -5.0;
const BACKGROUND_HALF_DEPTH: f64 = 1.0;
const CENTER_LINE_HALF_WIDTH: f64 = 0.05;

impl ArenaPanel {
    pub const ALL: [ArenaPanel; 6] = [
        ArenaPanel::Background,
        ArenaPanel::CenterLine,
        ArenaPanel::Wall(Wall::Top),
        ArenaPanel::Wall(Wall::Bottom),
        ArenaPanel::Wall(Wall::Left),
        ArenaPanel::Wall(Wall::Right),
    ];

    pub fn pose(&self, config: &MatchConfig) -> Pose {
        match self {
            ArenaPanel::Background => Pose::new(
                DVec3::new(0.0, 0.0, BACKGROUND_Z),
                DVec3::new(config.wall_half_span, config.wall_half_span, BACKGROUND_HALF_DEPTH),
            ),
            ArenaPanel::CenterLine => Pose::new(
                DVec3::new(0.0, 0.0, -config.ball_radius),
                DVec3::new(
                    CENTER_LINE_HALF_WIDTH,
                    config.arena_half_height,
                    CENTER_LINE_HALF_WIDTH,
                ),
            ),
            ArenaPanel::Wall(wall) => Pose::new(wall.center(config), wall.half_extents(config)),
        }
    }
}

/// A powerup as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerupPose {
    pub id: u32,
    pub kind: PowerupKind,
    pub color: [f32; 3],
    pub pose: Pose,
}

/// A placed arena panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPose {
    pub panel: ArenaPanel,
    pub pose: Pose,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time: f64,
    pub phase: MatchPhase,
    pub racket1: Pose,
    pub racket2: Pose,
    pub ball: Pose,
    pub powerups: Vec<PowerupPose>,
    pub panels: Vec<PanelPose>,
    pub events: Vec<GameEvent>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let racket_scale = Racket::half_extents(config);

        Self {
            frame: state.frame,
            time: state.time,
            phase: state.phase,
            racket1: Pose::new(state.racket1.center(), racket_scale),
            racket2: Pose::new(state.racket2.center(), racket_scale),
            ball: Pose::sphere(state.ball.position, state.ball.radius),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerupPose {
                    id: p.id,
                    kind: p.kind,
                    color: p.color,
                    pose: Pose::sphere(p.position, config.powerup_radius),
                })
                .collect(),
            panels: ArenaPanel::ALL
                .iter()
                .map(|panel| PanelPose {
                    panel: *panel,
                    pose: panel.pose(config),
                })
                .collect(),
            events: state.events.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Adapter seam to whatever draws the match
pub trait Renderer {
    fn present(&mut self, snapshot: &FrameSnapshot);
}

/// Renderer that writes frames to the log
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: Option<MatchPhase>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, snapshot: &FrameSnapshot) {
        if self.last_phase != Some(snapshot.phase) {
            match snapshot.phase {
                MatchPhase::Running => log::info!("Match running"),
                MatchPhase::Paused => log::info!("PAUSED"),
                MatchPhase::GameOver { winner } => log::info!("GAME OVER - {winner:?} wins!"),
            }
            self.last_phase = Some(snapshot.phase);
        }

        for event in &snapshot.events {
            log::debug!("frame {}: {event:?}", snapshot.frame);
        }
        log::trace!(
            "frame {}: ball ({:.2}, {:.2}), rackets {:.2} / {:.2}, {} powerups",
            snapshot.frame,
            snapshot.ball.position.x,
            snapshot.ball.position.y,
            snapshot.racket1.position.y,
            snapshot.racket2.position.y,
            snapshot.powerups.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameTime, Powerup, TickInput, tick};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<FrameSnapshot>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, snapshot: &FrameSnapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    #[test]
    fn test_capture_poses() {
        let mut state = GameState::with_seed(2);
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            kind: PowerupKind::RandomBallAngle,
            position: DVec3::new(3.0, -2.0, 0.0),
            color: PowerupKind::RandomBallAngle.color(),
        });

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.racket1.position, DVec3::new(-12.0, 0.0, 0.0));
        assert_eq!(snapshot.racket2.scale, DVec3::new(1.0, 2.5, 1.0));
        assert_eq!(snapshot.ball.scale, DVec3::ONE);
        assert_eq!(snapshot.powerups.len(), 1);
        assert_eq!(snapshot.powerups[0].pose.scale, DVec3::splat(0.5));
        assert_eq!(snapshot.panels.len(), 6);
    }

    #[test]
    fn test_wall_panels_match_collision_volumes() {
        let config = MatchConfig::default();
        for wall in Wall::ALL {
            let pose = ArenaPanel::Wall(wall).pose(&config);
            let aabb = wall.aabb(&config);
            assert_eq!(pose.position, aabb.center());
            assert_eq!(pose.scale, aabb.half_extents());
        }
        let right = ArenaPanel::Wall(Wall::Right).pose(&config);
        assert_eq!(right.position, DVec3::new(14.5, 0.0, 0.0));
        assert_eq!(right.scale, DVec3::new(1.0, 20.0, 20.0));
    }

    #[test]
    fn test_paused_snapshot_unchanged() {
        let mut state = GameState::with_seed(6);
        let mut renderer = Recorder::default();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &TickInput::default(), FrameTime::at_rate(1, 60.0));
        tick(&mut state, &pause, FrameTime::at_rate(2, 60.0));
        renderer.present(&FrameSnapshot::capture(&state));
        tick(&mut state, &TickInput::default(), FrameTime::at_rate(3, 60.0));
        renderer.present(&FrameSnapshot::capture(&state));

        let (a, b) = (&renderer.frames[0], &renderer.frames[1]);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.racket1, b.racket1);
        assert_eq!(a.frame, b.frame);
        assert_eq!(b.phase, MatchPhase::Paused);
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::with_seed(10);
        let json = FrameSnapshot::capture(&state).to_json().unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.panels.len(), 6);
        assert_eq!(back.phase, MatchPhase::Running);
    }
}
