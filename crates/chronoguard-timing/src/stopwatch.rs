//! The attack stopwatch.
//!
//! The player stops a running clock as close as possible to `target`. Grading
//! is a pure function of `|elapsed - target|` and the active profile; the time
//! scale only changes how fast `elapsed` accrues and the glitch flag only
//! changes display strings.

use rand::Rng;

use chronoguard_core::constants::{
    STOPWATCH_INITIAL_TARGET, STOPWATCH_TARGET_STEP, SURGE_TARGET_MAX_HUNDREDTHS,
    SURGE_TARGET_MIN_HUNDREDTHS,
};
use chronoguard_core::enums::{Difficulty, Grade};

use crate::display;
use crate::profiles::{get_profile, ToleranceProfile};

#[derive(Debug, Clone)]
pub struct Stopwatch {
    elapsed: f64,
    target: f64,
    running: bool,
    time_scale: f64,
    glitched: bool,
    difficulty: Difficulty,
    tolerance: ToleranceProfile,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Stopwatch {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            elapsed: 0.0,
            target: STOPWATCH_INITIAL_TARGET,
            running: false,
            time_scale: 1.0,
            glitched: false,
            difficulty,
            tolerance: get_profile(difficulty),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_glitched(&self) -> bool {
        self.glitched
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tolerance(&self) -> ToleranceProfile {
        self.tolerance
    }

    /// Start (or keep) running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freeze `elapsed` and grade the stop.
    pub fn stop(&mut self) -> Grade {
        self.running = false;
        self.grade()
    }

    /// Advance by `dt` real seconds. No-op while stopped or for a
    /// non-positive/non-finite `dt`.
    pub fn tick(&mut self, dt: f64) {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt * self.time_scale;
    }

    /// Grade the current elapsed time against the target.
    pub fn grade(&self) -> Grade {
        let distance = (self.elapsed - self.target).abs();
        self.tolerance
            .grade(distance, self.difficulty == Difficulty::Hell)
    }

    /// Switch to a difficulty preset. Keeps elapsed time and target.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.tolerance = get_profile(difficulty);
    }

    /// Set the time scale. Rejects non-positive or non-finite values.
    pub fn set_time_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("rejected stopwatch time scale {scale}");
            return false;
        }
        self.time_scale = scale;
        true
    }

    pub fn set_glitch(&mut self, glitched: bool) {
        self.glitched = glitched;
    }

    /// Move the target. An explicit value is used as-is (it must be positive
    /// and finite, otherwise the call is rejected); without one the target
    /// becomes three whole seconds past the last completed second.
    pub fn retarget(&mut self, explicit: Option<f64>) -> bool {
        match explicit {
            Some(target) if target.is_finite() && target > 0.0 => {
                self.target = target;
                true
            }
            Some(target) => {
                log::warn!("rejected stopwatch target {target}");
                false
            }
            None => {
                self.target = self.elapsed.floor() + STOPWATCH_TARGET_STEP;
                true
            }
        }
    }

    /// Target used while a boss surges: one second past the last completed
    /// second plus a random 0.10..=0.99 fraction.
    pub fn surge_target<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let hundredths = rng.gen_range(SURGE_TARGET_MIN_HUNDREDTHS..=SURGE_TARGET_MAX_HUNDREDTHS);
        self.elapsed.floor() + 1.0 + f64::from(hundredths) / 100.0
    }

    /// Back to a fresh clock: zero, stopped, initial target, unit scale, no
    /// glitch. The difficulty is kept.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
        self.target = STOPWATCH_INITIAL_TARGET;
        self.time_scale = 1.0;
        self.glitched = false;
    }

    /// Clear boss side effects (time scale and glitch) without touching time.
    pub fn clear_modifiers(&mut self) {
        self.time_scale = 1.0;
        self.glitched = false;
    }

    pub fn elapsed_display<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        display::format_display(self.elapsed, self.glitched, rng)
    }

    pub fn target_display<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        display::format_display(self.target, self.glitched, rng)
    }

    /// Place the clock at an exact state. Test helper for grading scenarios.
    #[cfg(test)]
    pub(crate) fn set_times(&mut self, elapsed: f64, target: f64) {
        self.elapsed = elapsed;
        self.target = target;
    }
}
