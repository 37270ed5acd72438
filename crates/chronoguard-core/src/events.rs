//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Menu sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCue {
    Click,
    Buy,
    Error,
}

/// Fire-and-forget cues for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    /// Attack fired with the given grade.
    Shoot { grade: Grade },
    /// Something was hit but survived, or the structure took a hit.
    Hit,
    /// One or more enemies destroyed.
    Explosion,
    BossSpawn,
    SurgeStart,
    SurgeEnd,
    GameOver,
    Ui { cue: UiCue },
}

/// Gameplay milestones surfaced to the host (HUD text, logs, tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted { difficulty: Difficulty },
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32 },
    BossSpawned { level: u32, ability: BossAbility },
    SurgeStarted,
    SurgeEnded,
    BossDefeated { level: u32 },
    AttackResolved { grade: Grade, kills: u32, coins: u32 },
    UpgradePurchased { upgrade: UpgradeKind, cost: u32 },
    GameOver { wave: u32, coins: u32 },
}
