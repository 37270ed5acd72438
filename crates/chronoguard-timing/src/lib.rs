//! Timing-and-accuracy engine for CHRONOGUARD.
//!
//! Implements the stopwatch, difficulty tolerance profiles, grading and the
//! (possibly glitched) display formatting. Plain data, no ECS dependency.

pub mod display;
pub mod profiles;
pub mod stopwatch;

pub use chronoguard_core as core;
pub use profiles::ToleranceProfile;
pub use stopwatch::Stopwatch;
