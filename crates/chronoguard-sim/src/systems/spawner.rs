//! Spawn timing for normal waves and boss minions.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use chronoguard_core::enums::EnemyKind;
use chronoguard_core::types::PlayArea;

use crate::wave::WaveState;
use crate::world_setup;

/// Accumulate spawn time and spawn one wave enemy each time the interval
/// is reached, until the wave target has been spawned.
pub fn run_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    area: &PlayArea,
    wave: &mut WaveState,
    next_enemy_id: &mut u32,
    dt: f64,
) {
    if wave.enemies_spawned >= wave.enemies_target {
        return;
    }

    wave.spawn_timer += dt;
    if wave.spawn_timer >= wave.spawn_interval {
        wave.spawn_timer = 0.0;
        let kind = world_setup::choose_enemy_kind(rng, wave.wave);
        world_setup::spawn_enemy(world, rng, area, kind, next_enemy_id);
        wave.enemies_spawned += 1;
    }
}

/// Boss-wave minion spawning. Minions are always RUSHERs and the interval
/// comes from the boss's current phase.
pub fn run_minions(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    area: &PlayArea,
    wave: &mut WaveState,
    next_enemy_id: &mut u32,
    interval: f64,
    dt: f64,
) {
    wave.spawn_timer += dt;
    if wave.spawn_timer >= interval {
        wave.spawn_timer = 0.0;
        world_setup::spawn_enemy(world, rng, area, EnemyKind::Rusher, next_enemy_id);
        wave.enemies_spawned += 1;
    }
}
