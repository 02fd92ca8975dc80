//! Player input
//!
//! Key handlers push `InputEvent`s; the frame driver folds them into an
//! `InputState` and takes a `TickInput` snapshot once per frame. Taking clears
//! every flag, so a held key must keep producing `Pressed` events.

use serde::{Deserialize, Serialize};

use super::state::PlayerId;

/// Racket movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// A single key event from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Pressed { player: PlayerId, direction: Direction },
    Released { player: PlayerId, direction: Direction },
    TogglePause,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub player1_up: bool,
    pub player1_down: bool,
    pub player2_up: bool,
    pub player2_down: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Flags for one player as (up, down)
    pub fn held(&self, player: PlayerId) -> (bool, bool) {
        match player {
            PlayerId::One => (self.player1_up, self.player1_down),
            PlayerId::Two => (self.player2_up, self.player2_down),
        }
    }

    fn flag_mut(&mut self, player: PlayerId, direction: Direction) -> &mut bool {
        match (player, direction) {
            (PlayerId::One, Direction::Up) => &mut self.player1_up,
            (PlayerId::One, Direction::Down) => &mut self.player1_down,
            (PlayerId::Two, Direction::Up) => &mut self.player2_up,
            (PlayerId::Two, Direction::Down) => &mut self.player2_down,
        }
    }
}

/// Accumulates events between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed { player, direction } => {
                *self.pending.flag_mut(player, direction) = true;
            }
            InputEvent::Released { player, direction } => {
                *self.pending.flag_mut(player, direction) = false;
            }
            // Two toggles in one frame cancel out
            InputEvent::TogglePause => self.pending.pause = !self.pending.pause,
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Current flags without consuming them
    pub fn peek(&self) -> TickInput {
        self.pending
    }

    /// Hand the flags to a tick and clear them
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}
