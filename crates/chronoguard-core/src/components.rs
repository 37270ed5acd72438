//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! systems, with the exception of the tiny health bookkeeping helpers that
//! enforce the non-negative invariant at the mutation boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Stable identifier given to every enemy at spawn (for snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Marks an entity as an enemy and carries its archetype stats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Movement speed (units per second).
    pub speed: f64,
    /// Collision/visual radius.
    pub radius: f64,
    /// Health removed from the structure on contact.
    pub damage_to_structure: u32,
    /// Cleared when the enemy dies or reaches the structure.
    pub alive: bool,
}

/// Hit points of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, saturating at zero.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            DamageOutcome::Died
        } else {
            DamageOutcome::Survived
        }
    }

    /// Add `amount`, clamped to `max`.
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Expanding ring drawn from an attack origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shockwave {
    pub radius: f64,
    pub max_radius: f64,
    pub line_width: f64,
    pub tone: EffectTone,
}

/// Short-lived rising label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    /// Remaining life in seconds.
    pub life: f64,
    pub tone: EffectTone,
}

/// Banner announcing a wave or boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveAnnouncement {
    pub wave: u32,
    pub boss: bool,
    /// Remaining life in seconds.
    pub life: f64,
}
