//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Start a fresh game from the menu or the game-over screen.
    StartGame { difficulty: Difficulty },
    /// Abandon the current game and return to the main menu.
    ReturnToMenu,
    /// Pause the game.
    Pause,
    /// Resume a paused game.
    Resume,

    // --- Combat ---
    /// Stop the stopwatch and resolve an attack with the resulting grade.
    Attack,

    // --- Shop ---
    /// Open the upgrade shop (suspends gameplay).
    OpenShop,
    /// Close the upgrade shop and resume.
    CloseShop,
    /// Buy one level of an upgrade.
    Purchase { upgrade: UpgradeKind },

    // --- Debug ---
    /// Reset the field and start wave `wave` directly.
    JumpToWave { wave: u32 },
}
