//! Simulation engine for CHRONOGUARD.
//!
//! Owns the hecs ECS world, the stopwatch and the wave/boss director, runs
//! systems once per host frame and produces GameStateSnapshots.

pub mod boss;
pub mod economy;
pub mod engine;
pub mod scheduler;
pub mod shop;
pub mod systems;
pub mod wave;
pub mod world_setup;

pub use chronoguard_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
