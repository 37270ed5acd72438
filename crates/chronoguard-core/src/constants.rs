//! Simulation constants and tuning parameters.

// --- Frame timing ---

/// Nominal host frame rate (Hz) used by the real-time loop and headless runs.
pub const FRAME_RATE: u32 = 60;

/// Seconds per nominal frame.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Largest frame delta the engine accepts. Longer gaps are clamped so a
/// stalled host never produces a catch-up jump.
pub const MAX_FRAME_DT: f64 = 0.25;

// --- Play area ---

/// Logical play-area width.
pub const PLAY_AREA_WIDTH: f64 = 720.0;

/// Logical play-area height.
pub const PLAY_AREA_HEIGHT: f64 = 1280.0;

/// Distance outside the boundary at which enemies spawn.
pub const SPAWN_MARGIN: f64 = 20.0;

// --- Structure (castle) ---

pub const CASTLE_MAX_HEALTH: u32 = 100;

pub const CASTLE_RADIUS: f64 = 30.0;

/// Extra distance added to the castle radius for the reached-structure check.
pub const CASTLE_CONTACT_SLACK: f64 = 5.0;

/// Health restored when a wave is cleared.
pub const WAVE_CLEAR_HEAL: u32 = 10;

// --- Stopwatch ---

/// Target time of a fresh stopwatch (seconds).
pub const STOPWATCH_INITIAL_TARGET: f64 = 3.0;

/// Whole seconds between the last completed second and the next target.
pub const STOPWATCH_TARGET_STEP: f64 = 3.0;

/// Probability that a glitched display call returns garbage.
pub const GLITCH_PROBABILITY: f64 = 0.3;

/// Characters used for glitched display strings.
pub const GLITCH_CHARSET: &str = "0123456789.##??@!";

/// Length of a glitched display string.
pub const GLITCH_LENGTH: usize = 5;

/// Stopwatch time scale applied by the TIME_WARP boss ability.
pub const TIME_WARP_SCALE: f64 = 1.5;

// --- Attack ---

/// Input lockout after an attack trigger (seconds).
pub const ATTACK_LOCKOUT_SECS: f64 = 0.5;

/// Blast radius of a GREAT attack before the radius upgrade multiplier.
pub const GREAT_BLAST_RADIUS: f64 = 450.0;

/// Blast radius of a GOOD attack before the radius upgrade multiplier.
pub const GOOD_BLAST_RADIUS: f64 = 225.0;

/// Radius multiplier gained per radius upgrade level above 1.
pub const RADIUS_UPGRADE_STEP: f64 = 0.2;

/// Coins per enemy killed by an attack.
pub const KILL_COINS: u32 = 1;

/// Flat coins granted by a GREAT attack.
pub const GREAT_FLAT_COINS: u32 = 2;

/// A PERFECT streak pays a bonus every this many hits.
pub const COMBO_BONUS_INTERVAL: u32 = 3;

/// Coins granted by the combo bonus.
pub const COMBO_BONUS_COINS: u32 = 10;

// --- Waves ---

/// Enemy count of the first wave.
pub const FIRST_WAVE_ENEMIES: u32 = 10;

/// Spawn interval of the first wave (seconds).
pub const FIRST_WAVE_SPAWN_INTERVAL: f64 = 2.0;

pub const WAVE_BASE_ENEMIES: u32 = 10;

pub const WAVE_ENEMIES_PER_WAVE: u32 = 5;

pub const WAVE_BASE_SPAWN_INTERVAL: f64 = 2.0;

pub const WAVE_SPAWN_INTERVAL_STEP: f64 = 0.1;

pub const WAVE_MIN_SPAWN_INTERVAL: f64 = 0.5;

/// Every Nth wave is a boss encounter.
pub const BOSS_WAVE_PERIOD: u32 = 3;

/// Enemy target during a boss wave. Minions keep coming until the boss dies.
pub const BOSS_WAVE_ENEMY_TARGET: u32 = 999;

/// Delay between a wave clear and the boss intro (seconds).
pub const BOSS_INTRO_DELAY_SECS: f64 = 1.0;

/// Length of the pause after a wave clear (seconds).
pub const WAVE_CLEAR_PAUSE_SECS: f64 = 2.0;

// --- Enemy spawn thresholds (uniform roll must exceed these) ---

pub const TANK_ROLL_THRESHOLD: f64 = 0.8;
pub const SWARMER_ROLL_THRESHOLD: f64 = 0.7;
pub const SNIPER_ROLL_THRESHOLD: f64 = 0.8;

// --- Boss ---

pub const BOSS_BASE_HEALTH: u32 = 20;

pub const BOSS_HEALTH_PER_LEVEL: u32 = 5;

pub const BOSS_RADIUS: f64 = 60.0;

/// Orbit radius at spawn.
pub const BOSS_ENTRANCE_RADIUS: f64 = 700.0;

/// Orbit radius once the entrance is complete.
pub const BOSS_ORBIT_RADIUS: f64 = 250.0;

/// Entrance shrink rate (units per second).
pub const BOSS_ENTRANCE_SPEED: f64 = 100.0;

/// Base orbital angular speed (rad/s).
pub const BOSS_ORBIT_SPEED: f64 = 0.5;

/// Base self-rotation speed (rad/s).
pub const BOSS_ROTATION_SPEED: f64 = 1.0;

pub const BOSS_SURGE_ORBIT_FACTOR: f64 = 4.0;

pub const BOSS_SURGE_ROTATION_FACTOR: f64 = 10.0;

/// Length of a surge (seconds).
pub const BOSS_SURGE_DURATION: f64 = 5.0;

/// Length of the cooldown between surges (seconds).
pub const BOSS_SURGE_COOLDOWN: f64 = 10.0;

/// Gameplay freeze when a surge begins (seconds).
pub const SURGE_FREEZE_SECS: f64 = 2.0;

/// Minion spawn interval while the boss is calm.
pub const BOSS_MINION_INTERVAL: f64 = 1.5;

/// Minion spawn interval while the boss is surging.
pub const BOSS_SURGE_MINION_INTERVAL: f64 = 0.3;

/// Minion interval multiplier for the first boss (slower spawns).
pub const FIRST_BOSS_MINION_MULTIPLIER: f64 = 3.0;

/// Surge target decimal range, in hundredths of a second (inclusive).
pub const SURGE_TARGET_MIN_HUNDREDTHS: u32 = 10;
pub const SURGE_TARGET_MAX_HUNDREDTHS: u32 = 99;

// --- Effects ---

/// Starting radius of a shockwave ring.
pub const SHOCKWAVE_START_RADIUS: f64 = 1.0;

/// Shockwave growth (units per second).
pub const SHOCKWAVE_GROWTH_RATE: f64 = 900.0;

/// Line width of a fresh shockwave ring.
pub const SHOCKWAVE_LINE_WIDTH: f64 = 5.0;

/// Lifetime of floating text (seconds).
pub const FLOATING_TEXT_LIFE: f64 = 1.0;

/// Upward drift of floating text (units per second).
pub const FLOATING_TEXT_RISE_SPEED: f64 = 50.0;

/// Lifetime of a wave announcement banner (seconds).
pub const WAVE_ANNOUNCEMENT_LIFE: f64 = 2.0;

/// Vertical offset of centred banner texts above the structure.
pub const BANNER_OFFSET_Y: f64 = 150.0;

/// Vertical offset of the combo bonus text above the structure.
pub const COMBO_TEXT_OFFSET_Y: f64 = 100.0;

// --- Shop ---

pub const RADIUS_UPGRADE_MAX_LEVEL: u32 = 3;
pub const RADIUS_UPGRADE_COSTS: [u32; 2] = [100, 200];

pub const POWER_UPGRADE_MAX_LEVEL: u32 = 3;
pub const POWER_UPGRADE_COSTS: [u32; 2] = [150, 300];

pub const HEAL_COST: u32 = 100;
pub const HEAL_AMOUNT: u32 = 20;

pub const FORTIFY_COST: u32 = 100;
pub const FORTIFY_AMOUNT: u32 = 10;

/// Cost reported for names the shop does not know. Never affordable.
pub const UNATTAINABLE_COST: u32 = 999_999;
