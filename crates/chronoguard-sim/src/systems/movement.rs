//! Enemy movement toward the structure.

use hecs::World;

use chronoguard_core::components::Enemy;
use chronoguard_core::constants::{CASTLE_CONTACT_SLACK, CASTLE_RADIUS};
use chronoguard_core::enums::EnemySignal;
use chronoguard_core::types::Position;

/// Move one enemy straight at `center`. Contact is a plain distance check
/// against the structure radius plus slack.
pub fn step_enemy(position: &mut Position, enemy: &Enemy, center: Position, dt: f64) -> EnemySignal {
    let offset = center - *position;
    let distance = offset.length();
    if distance < CASTLE_RADIUS + CASTLE_CONTACT_SLACK {
        return EnemySignal::ReachedStructure;
    }
    *position += offset / distance * enemy.speed * dt;
    EnemySignal::Moving
}

/// Advance every live enemy. Enemies that reach the structure are marked
/// dead (cleanup despawns them) and their structure damage is returned,
/// one entry per contact.
pub fn run(world: &mut World, center: Position, dt: f64) -> Vec<u32> {
    let mut contacts = Vec::new();
    for (_entity, (pos, enemy)) in world.query_mut::<(&mut Position, &mut Enemy)>() {
        if !enemy.alive {
            continue;
        }
        if step_enemy(pos, enemy, center, dt) == EnemySignal::ReachedStructure {
            enemy.alive = false;
            contacts.push(enemy.damage_to_structure);
        }
    }
    contacts
}

/// Number of enemies still alive.
pub fn live_enemy_count(world: &World) -> usize {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.alive)
        .count()
}
