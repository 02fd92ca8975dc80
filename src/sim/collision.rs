//! Collision detection and response
//!
//! Runs once per frame after kinematics. Every volume is built once from the
//! post-move positions, and every response is computed from the heading the
//! ball had when the frame's collision pass started. When a racket and a wall
//! both respond in one frame the later write to the heading wins.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, AabbContact, classify_sphere_aabb, make_aabb, sphere_intersects_aabb};
use super::powerups;
use super::state::{GameEvent, GameState, MatchPhase, PlayerId, Racket};
use crate::normalize_angle;
use crate::settings::MatchConfig;

/// The four arena walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
    /// Goal defended by player one
    Left,
    /// Goal defended by player two
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];

    /// Wall slab center; the inner face sits on the arena boundary
    pub fn center(&self, config: &MatchConfig) -> DVec3 {
        let t = config.wall_half_thickness;
        match self {
            Wall::Top => DVec3::new(0.0, config.arena_half_height + t, 0.0),
            Wall::Bottom => DVec3::new(0.0, -(config.arena_half_height + t), 0.0),
            Wall::Left => DVec3::new(-(config.arena_half_width + t), 0.0, 0.0),
            Wall::Right => DVec3::new(config.arena_half_width + t, 0.0, 0.0),
        }
    }

    pub fn half_extents(&self, config: &MatchConfig) -> DVec3 {
        let t = config.wall_half_thickness;
        let span = config.wall_half_span;
        match self {
            Wall::Top | Wall::Bottom => DVec3::new(span, t, span),
            Wall::Left | Wall::Right => DVec3::new(t, span, span),
        }
    }

    pub fn aabb(&self, config: &MatchConfig) -> Aabb {
        make_aabb(self.half_extents(config), self.center(config))
    }

    /// Player who scores when the ball reaches this wall
    pub fn scorer(&self) -> Option<PlayerId> {
        match self {
            Wall::Left => Some(PlayerId::Two),
            Wall::Right => Some(PlayerId::One),
            Wall::Top | Wall::Bottom => None,
        }
    }
}

/// Volumes for one frame's collision pass
#[derive(Debug, Clone, Copy)]
pub struct FrameVolumes {
    pub racket1: Aabb,
    pub racket2: Aabb,
    pub top: Aabb,
    pub bottom: Aabb,
    pub left: Aabb,
    pub right: Aabb,
}

impl FrameVolumes {
    pub fn build(state: &GameState) -> Self {
        let config = &state.config;
        let racket_half = Racket::half_extents(config);
        Self {
            racket1: make_aabb(racket_half, state.racket1.center()),
            racket2: make_aabb(racket_half, state.racket2.center()),
            top: Wall::Top.aabb(config),
            bottom: Wall::Bottom.aabb(config),
            left: Wall::Left.aabb(config),
            right: Wall::Right.aabb(config),
        }
    }

    pub fn racket(&self, player: PlayerId) -> &Aabb {
        match player {
            PlayerId::One => &self.racket1,
            PlayerId::Two => &self.racket2,
        }
    }
}

/// Heading after bouncing off a racket face
///
/// `velocity` is the racket's vertical velocity at contact; it adds spin of
/// `spin_factor * velocity`. The spin is mirrored for the right-hand racket
/// so an upward-moving racket steers the ball upward on either side.
pub fn racket_deflection(angle: f64, velocity: f64, player: PlayerId, spin_factor: f64) -> f64 {
    let spin = spin_factor * velocity;
    let spin = match player {
        PlayerId::One => spin,
        PlayerId::Two => -spin,
    };
    normalize_angle(PI - angle + spin)
}

/// Heading after bouncing off a horizontal surface
#[inline]
pub fn wall_reflection(angle: f64) -> f64 {
    normalize_angle(-angle)
}

/// Run the full collision pass; may end the match
pub fn resolve_collisions(state: &mut GameState) {
    if state.phase != MatchPhase::Running {
        return;
    }

    let volumes = FrameVolumes::build(state);
    let center = state.ball.position;
    let radius = state.ball.radius;
    let incoming = state.ball.angle;
    let heading = state.ball.direction();

    // Rackets
    for player in [PlayerId::One, PlayerId::Two] {
        let Some(contact) = classify_sphere_aabb(volumes.racket(player), center, radius) else {
            continue;
        };
        let racket = *state.racket(player);
        let new_angle = match contact {
            // Only deflect while the ball is still travelling into the face
            AabbContact::Side if heading.x * player.side() > 0.0 => Some(racket_deflection(
                incoming,
                racket.velocity_y,
                player,
                state.config.spin_factor,
            )),
            AabbContact::TopBottom if heading.y * (center.y - racket.position_y) < 0.0 => {
                Some(wall_reflection(incoming))
            }
            _ => None,
        };
        if let Some(angle) = new_angle {
            state.ball.set_angle(angle);
            log::debug!("Racket {player:?} hit ({contact:?}), heading {angle:.3}");
            state.events.push(GameEvent::RacketHit { player, angle });
        }
    }

    // Top and bottom walls
    let top_hit = heading.y > 0.0 && sphere_intersects_aabb(&volumes.top, center, radius);
    let bottom_hit = heading.y < 0.0 && sphere_intersects_aabb(&volumes.bottom, center, radius);
    if top_hit || bottom_hit {
        let angle = wall_reflection(incoming);
        state.ball.set_angle(angle);
        state.events.push(GameEvent::WallBounce { angle });
    }

    // Goals
    for (wall, volume) in [(Wall::Left, &volumes.left), (Wall::Right, &volumes.right)] {
        if sphere_intersects_aabb(volume, center, radius) {
            if let Some(winner) = wall.scorer() {
                state.phase = MatchPhase::GameOver { winner };
                state.events.push(GameEvent::Goal { winner });
                log::info!(
                    "Game over after {} frames: ball reached {wall:?} wall, {winner:?} wins",
                    state.frame
                );
                return;
            }
        }
    }

    powerups::collect(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Powerup, PowerupKind};
    use std::f64::consts::{FRAC_PI_4, TAU};

    fn running_state() -> GameState {
        let mut state = GameState::with_seed(3);
        state.ball.position = DVec3::ZERO;
        state
    }

    #[test]
    fn test_straight_bounce_off_racket_one() {
        let angle = racket_deflection(PI, 0.0, PlayerId::One, 0.5);
        assert!(angle.abs() < 1e-12 || (angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_spin_follows_racket_velocity() {
        // Moving up adds a positive (upward) angle change on the left racket
        let angle = racket_deflection(PI, 0.06, PlayerId::One, 0.5);
        assert!((angle - 0.03).abs() < 1e-12);

        // Moving down gives a negative change, wrapped into [0, 2π)
        let angle = racket_deflection(PI, -0.06, PlayerId::One, 0.5);
        assert!((angle - (TAU - 0.03)).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_racket_hits() {
        for velocity in [-0.06, -0.01, 0.0, 0.02, 0.0625] {
            for approach in [0.1, 0.4, FRAC_PI_4, 1.0] {
                let left = racket_deflection(PI - approach, velocity, PlayerId::One, 0.5);
                let right = racket_deflection(approach, velocity, PlayerId::Two, 0.5);
                // Mirror about the vertical axis: θ -> π - θ
                let mirrored = normalize_angle(PI - left);
                let diff = (mirrored - right).abs();
                assert!(diff < 1e-9 || (diff - TAU).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_wall_reflection() {
        assert!((wall_reflection(FRAC_PI_4) - (TAU - FRAC_PI_4)).abs() < 1e-12);
        assert!((wall_reflection(TAU - FRAC_PI_4) - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_right_wall_ends_match() {
        let mut state = running_state();
        state.ball.position = DVec3::new(14.4, 0.0, 0.0);
        state.ball.set_angle(0.0);
        assert!(sphere_intersects_aabb(
            &Wall::Right.aabb(&state.config),
            state.ball.position,
            1.0
        ));

        resolve_collisions(&mut state);
        assert_eq!(
            state.phase,
            MatchPhase::GameOver {
                winner: PlayerId::One
            }
        );
        assert!(state.events.contains(&GameEvent::Goal {
            winner: PlayerId::One
        }));
    }

    #[test]
    fn test_left_wall_ends_match() {
        let mut state = running_state();
        state.ball.position = DVec3::new(-13.0, 0.0, 0.0);
        state.ball.set_angle(PI);
        resolve_collisions(&mut state);
        assert_eq!(state.winner(), Some(PlayerId::Two));
    }

    #[test]
    fn test_racket_one_straight_bounce() {
        let mut state = running_state();
        state.racket1.velocity_y = 0.0;
        state.ball.position = DVec3::new(-10.2, 0.0, 0.0);
        state.ball.set_angle(PI);
        resolve_collisions(&mut state);
        assert!(state.ball.angle.abs() < 1e-12 || (state.ball.angle - TAU).abs() < 1e-12);
        assert!(matches!(
            state.events[0],
            GameEvent::RacketHit {
                player: PlayerId::One,
                ..
            }
        ));
    }

    #[test]
    fn test_racket_ignores_ball_moving_away() {
        let mut state = running_state();
        state.ball.position = DVec3::new(-10.2, 0.0, 0.0);
        state.ball.set_angle(0.1);
        resolve_collisions(&mut state);
        assert!((state.ball.angle - 0.1).abs() < 1e-12);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_racket_top_face_reflects_vertically() {
        let mut state = running_state();
        state.ball.position = DVec3::new(-12.0, 3.2, 0.0);
        state.ball.set_angle(PI + 1.2); // heading down and to the left
        resolve_collisions(&mut state);
        assert!((state.ball.angle - wall_reflection(PI + 1.2)).abs() < 1e-12);
        assert!(state.ball.direction().y > 0.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = running_state();
        state.ball.position = DVec3::new(0.0, 6.8, 0.0);
        state.ball.set_angle(FRAC_PI_4);
        resolve_collisions(&mut state);
        assert!((state.ball.angle - (TAU - FRAC_PI_4)).abs() < 1e-12);
        assert!(matches!(state.events[0], GameEvent::WallBounce { .. }));

        // Already heading away: no second bounce
        resolve_collisions(&mut state);
        assert!((state.ball.angle - (TAU - FRAC_PI_4)).abs() < 1e-12);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut state = running_state();
        state.ball.position = DVec3::new(3.0, -6.9, 0.0);
        state.ball.set_angle(TAU - 0.5);
        resolve_collisions(&mut state);
        assert!((state.ball.angle - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wall_overrides_racket_in_same_frame() {
        let mut state = running_state();
        // Racket near the top limit, ball in the corner touching both
        state.racket1.position_y = 5.0;
        state.ball.position = DVec3::new(-10.3, 6.7, 0.0);
        let incoming = PI - 0.5; // up and to the left
        state.ball.set_angle(incoming);
        resolve_collisions(&mut state);
        assert_eq!(state.events.len(), 2);
        assert!((state.ball.angle - wall_reflection(incoming)).abs() < 1e-12);
    }

    #[test]
    fn test_collects_one_powerup_per_frame() {
        let mut state = running_state();
        for _ in 0..2 {
            let id = state.next_entity_id();
            state.powerups.push(Powerup {
                id,
                kind: PowerupKind::IncreaseBallSpeed,
                position: DVec3::new(0.5, 0.0, 0.0),
                color: PowerupKind::IncreaseBallSpeed.color(),
            });
        }
        let speed = state.config.ball_speed;
        resolve_collisions(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert!((state.config.ball_speed - speed * 1.5).abs() < 1e-12);

        resolve_collisions(&mut state);
        assert!(state.powerups.is_empty());
        assert!((state.config.ball_speed - speed * 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_no_collection_after_goal() {
        let mut state = running_state();
        state.ball.position = DVec3::new(13.0, 0.0, 0.0);
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            kind: PowerupKind::IncreaseRacketSpeed,
            position: DVec3::new(12.5, 0.5, 0.0),
            color: PowerupKind::IncreaseRacketSpeed.color(),
        });
        resolve_collisions(&mut state);
        assert!(state.phase.is_over());
        assert_eq!(state.powerups.len(), 1);
    }
}
