//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioCue, GameEvent};
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick. Read-only for collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Gameplay updates are suspended by a boss surge freeze.
    pub frozen: bool,
    /// Attack input is locked out.
    pub attack_locked: bool,
    pub castle: CastleView,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub shockwaves: Vec<ShockwaveView>,
    pub floating_texts: Vec<FloatingTextView>,
    pub announcements: Vec<AnnouncementView>,
    pub stopwatch: StopwatchView,
    pub wave: WaveView,
    pub economy: EconomyView,
    pub upgrades: UpgradeView,
    pub audio_cues: Vec<AudioCue>,
    pub events: Vec<GameEvent>,
}

/// The defended structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastleView {
    pub position: Position,
    pub radius: f64,
    pub health: u32,
    pub max_health: u32,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Position,
    pub radius: f64,
    pub health: u32,
    pub max_health: u32,
}

/// The live boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub level: u32,
    pub ability: BossAbility,
    pub position: Position,
    pub radius: f64,
    /// Self-rotation angle (radians).
    pub rotation: f64,
    pub health: u32,
    pub max_health: u32,
    pub surging: bool,
    pub surge_timer: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShockwaveView {
    pub position: Position,
    pub radius: f64,
    pub max_radius: f64,
    pub line_width: f64,
    pub tone: EffectTone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingTextView {
    pub text: String,
    pub position: Position,
    /// Remaining life (seconds). Renderers use it as opacity.
    pub life: f64,
    pub tone: EffectTone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementView {
    pub wave: u32,
    pub boss: bool,
    pub life: f64,
}

/// Stopwatch state plus the display strings for elapsed and target time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwatchView {
    pub elapsed: f64,
    pub target: f64,
    pub running: bool,
    pub time_scale: f64,
    pub glitched: bool,
    pub difficulty: Difficulty,
    pub elapsed_display: String,
    pub target_display: String,
    pub last_grade: Option<Grade>,
}

/// Wave progression for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub enemies_target: u32,
    pub enemies_spawned: u32,
    pub spawn_interval: f64,
    pub between_waves: bool,
    pub is_boss_wave: bool,
    pub boss_level: u32,
    pub director: DirectorState,
}

/// Coins and streaks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub coins: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub enemies_killed: u32,
}

/// Shop levels and the price of the next purchase of each item
/// (`None` when maxed out).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpgradeView {
    pub radius_level: u32,
    pub power_level: u32,
    pub radius_cost: Option<u32>,
    pub power_cost: Option<u32>,
    pub heal_cost: Option<u32>,
    pub max_health_cost: Option<u32>,
}
