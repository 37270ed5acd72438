//! Wave bookkeeping for the director.

use chronoguard_core::constants::*;
use chronoguard_core::enums::DirectorState;
use chronoguard_core::state::WaveView;

/// Whether `wave` is a boss encounter.
pub fn is_boss_wave_number(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_PERIOD == 0
}

/// Enemies in a normal wave.
pub fn enemies_for_wave(wave: u32) -> u32 {
    WAVE_BASE_ENEMIES + WAVE_ENEMIES_PER_WAVE * wave
}

/// Seconds between spawns in a normal wave.
pub fn spawn_interval_for_wave(wave: u32) -> f64 {
    (WAVE_BASE_SPAWN_INTERVAL - WAVE_SPAWN_INTERVAL_STEP * f64::from(wave))
        .max(WAVE_MIN_SPAWN_INTERVAL)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    pub wave: u32,
    pub enemies_target: u32,
    pub enemies_spawned: u32,
    pub spawn_interval: f64,
    /// Seconds accumulated toward the next spawn.
    pub spawn_timer: f64,
    pub is_boss_wave: bool,
    /// Level of the most recent boss (0 before the first).
    pub boss_level: u32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::first()
    }
}

impl WaveState {
    /// Wave 1 of a fresh session.
    pub fn first() -> Self {
        Self {
            wave: 1,
            enemies_target: FIRST_WAVE_ENEMIES,
            enemies_spawned: 0,
            spawn_interval: FIRST_WAVE_SPAWN_INTERVAL,
            spawn_timer: 0.0,
            is_boss_wave: false,
            boss_level: 0,
        }
    }

    /// Configure the current `wave` number as a normal wave.
    pub fn begin_normal_wave(&mut self) {
        self.is_boss_wave = false;
        self.enemies_target = enemies_for_wave(self.wave);
        self.enemies_spawned = 0;
        self.spawn_interval = spawn_interval_for_wave(self.wave);
    }

    /// Configure the current wave as a boss encounter.
    pub fn begin_boss_wave(&mut self) {
        self.is_boss_wave = true;
        self.enemies_target = BOSS_WAVE_ENEMY_TARGET;
        self.enemies_spawned = 0;
    }

    /// All enemies spawned and none left alive.
    pub fn is_cleared(&self, live_enemies: usize) -> bool {
        live_enemies == 0 && self.enemies_spawned >= self.enemies_target
    }

    pub fn view(&self, director: DirectorState) -> WaveView {
        WaveView {
            wave: self.wave,
            enemies_target: self.enemies_target,
            enemies_spawned: self.enemies_spawned,
            spawn_interval: self.spawn_interval,
            between_waves: matches!(
                director,
                DirectorState::WaveClearPause | DirectorState::BossIntro
            ),
            is_boss_wave: self.is_boss_wave,
            boss_level: self.boss_level,
            director,
        }
    }
}
