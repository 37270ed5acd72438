//! A simple bot that plays by watching snapshots.
//!
//! It fires as soon as the stopwatch is within the reaction window of the
//! target. With a zero window and a 60 Hz host it lands PERFECT on NORMAL.

use chronoguard_core::commands::PlayerCommand;
use chronoguard_core::enums::GamePhase;
use chronoguard_core::state::GameStateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    reaction_window: f64,
}

impl Autopilot {
    pub fn new(reaction_window: f64) -> Self {
        Self {
            reaction_window: reaction_window.max(0.0),
        }
    }

    /// The command to send after seeing `snapshot`, if any.
    pub fn decide(&self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        if snapshot.phase != GamePhase::Playing || snapshot.frozen || snapshot.attack_locked {
            return None;
        }
        let stopwatch = &snapshot.stopwatch;
        if stopwatch.running && stopwatch.elapsed >= stopwatch.target - self.reaction_window {
            Some(PlayerCommand::Attack)
        } else {
            None
        }
    }
}
