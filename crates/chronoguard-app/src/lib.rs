//! CHRONOGUARD host application.
//!
//! Wires the headless simulation to a real-time frame loop, a line-based
//! console front end and a deterministic headless runner.

pub mod autopilot;
pub mod config;
pub mod console;
pub mod error;
pub mod game_loop;
pub mod headless;
pub mod state;

pub use chronoguard_core as core;
