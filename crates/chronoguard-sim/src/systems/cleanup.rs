//! Cleanup system: removes dead enemies and anything queued for despawn.

use hecs::{Entity, World};

use chronoguard_core::components::Enemy;

/// Queue dead enemies, then despawn everything in the buffer. Other systems
/// push expired entities into the same buffer during the tick, so removal
/// never happens while a query is iterating.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if !enemy.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Despawn every enemy, live or dead.
pub fn clear_enemies(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.extend(world.query_mut::<&Enemy>().into_iter().map(|(entity, _)| entity));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
