//! Difficulty-specific tolerance profiles.
//!
//! A profile holds the three time-distance thresholds (seconds) that separate
//! the grades. Windows are monotone: `perfect <= great <= good`, with zero
//! meaning the grade is disabled.

use chronoguard_core::enums::{Difficulty, Grade};

/// Grade boundaries for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceProfile {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        get_profile(Difficulty::Normal)
    }
}

impl ToleranceProfile {
    /// Grade a stop that landed `distance` seconds away from the target.
    /// When `perfect_only` is set anything outside the PERFECT window misses.
    pub fn grade(&self, distance: f64, perfect_only: bool) -> Grade {
        if distance <= self.perfect {
            return Grade::Perfect;
        }
        if perfect_only {
            return Grade::Miss;
        }
        if distance <= self.great {
            Grade::Great
        } else if distance <= self.good {
            Grade::Good
        } else {
            Grade::Miss
        }
    }
}

/// Get the tolerance profile for a difficulty preset.
pub fn get_profile(difficulty: Difficulty) -> ToleranceProfile {
    match difficulty {
        Difficulty::Easy => ToleranceProfile {
            perfect: 0.08,
            great: 0.20,
            good: 0.40,
        },
        Difficulty::Normal => ToleranceProfile {
            perfect: 0.05,
            great: 0.15,
            good: 0.30,
        },
        Difficulty::Hard => ToleranceProfile {
            perfect: 0.03,
            great: 0.10,
            good: 0.20,
        },
        Difficulty::Hell => ToleranceProfile {
            perfect: 0.03,
            great: 0.0,
            good: 0.0,
        },
    }
}
