//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Accuracy grade of a stopwatch stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Perfect,
    Great,
    Good,
    Miss,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::Perfect => "PERFECT",
            Grade::Great => "GREAT",
            Grade::Good => "GOOD",
            Grade::Miss => "MISS",
        }
    }
}

/// Difficulty preset selecting the stopwatch tolerance profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Only PERFECT or MISS are reachable.
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Hell,
    ];

    /// Parse a difficulty name (case-insensitive). Returns `None` for
    /// unknown names; callers fall back to `Normal`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "NORMAL" => Some(Difficulty::Normal),
            "HARD" => Some(Difficulty::Hard),
            "HELL" => Some(Difficulty::Hell),
            _ => None,
        }
    }

    /// Parse a difficulty name, falling back to `Normal` for unknown input.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile.
    Rusher,
    /// Slow, hits the structure hardest.
    Sniper,
    /// Small and quick, light damage.
    Swarmer,
    /// Slow, takes two hits at base power.
    Tank,
    #[default]
    Default,
}

/// One-time ability a boss applies to the stopwatch when it spawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossAbility {
    #[default]
    None,
    /// Stopwatch runs 1.5x faster.
    TimeWarp,
    /// Stopwatch display is randomly corrupted.
    Glitch,
}

impl BossAbility {
    /// Ability of the boss at the given encounter level (1-based).
    /// Cycles None, TimeWarp, Glitch.
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 3 {
            0 => BossAbility::None,
            1 => BossAbility::TimeWarp,
            _ => BossAbility::Glitch,
        }
    }
}

/// Shop upgrade identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Blast radius multiplier.
    Radius,
    /// Damage per hit.
    Power,
    /// One-time structure repair.
    Heal,
    /// One-time max health increase.
    MaxHealth,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Radius,
        UpgradeKind::Power,
        UpgradeKind::Heal,
        UpgradeKind::MaxHealth,
    ];

    /// Parse a shop item name as used by menus ("radius", "power", "heal", "maxHealth").
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "radius" => Some(UpgradeKind::Radius),
            "power" => Some(UpgradeKind::Power),
            "heal" => Some(UpgradeKind::Heal),
            "maxhealth" | "max_health" => Some(UpgradeKind::MaxHealth),
            _ => None,
        }
    }
}

/// Game phase (top-level session state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    Paused,
    Shop,
    GameOver,
}

/// Wave/boss director state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    #[default]
    NormalSpawning,
    WaveClearPause,
    BossIntro,
    BossActive,
    BossDefeated,
}

/// Result of applying damage to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    Died,
    Survived,
}

/// Per-tick status signal of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemySignal {
    Moving,
    ReachedStructure,
}

/// Surge transition signal emitted by a boss update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurgeSignal {
    SurgeStarted,
    SurgeEnded,
}

/// Colour tag of a transient effect. Renderers map these to palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTone {
    Perfect,
    Great,
    Good,
    Coin,
    Damage,
    Warning,
    Calm,
}
