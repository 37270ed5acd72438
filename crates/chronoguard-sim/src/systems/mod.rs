//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` for read-only).
//! Session state they need is passed in by the engine.

pub mod attack;
pub mod cleanup;
pub mod effects;
pub mod movement;
pub mod snapshot;
pub mod spawner;
