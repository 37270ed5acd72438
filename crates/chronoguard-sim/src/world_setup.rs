//! Entity spawn factories for the simulation world.
//!
//! Enemies and transient effects (shockwaves, floating texts, wave banners)
//! are hecs entities with the component bundles built here.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use chronoguard_core::components::*;
use chronoguard_core::constants::*;
use chronoguard_core::enums::*;
use chronoguard_core::types::{Edge, PlayArea, Position};

/// Stats of an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub speed: f64,
    pub radius: f64,
    pub health: u32,
    pub damage_to_structure: u32,
}

/// Archetype table: speed, radius, hit points, structure damage.
pub fn enemy_kind_params(kind: EnemyKind) -> EnemyProfile {
    let (speed, radius, health, damage_to_structure) = match kind {
        EnemyKind::Rusher => (100.0, 24.0, 1, 10),
        EnemyKind::Sniper => (30.0, 20.0, 1, 20),
        EnemyKind::Swarmer => (70.0, 16.0, 1, 5),
        EnemyKind::Tank => (35.0, 36.0, 2, 15),
        EnemyKind::Default => (50.0, 20.0, 1, 10),
    };
    EnemyProfile {
        speed,
        radius,
        health,
        damage_to_structure,
    }
}

/// Pick the archetype for a normal-wave spawn. Later waves unlock rarer
/// kinds. Each gate rolls independently and a later hit overrides an
/// earlier one.
pub fn choose_enemy_kind(rng: &mut ChaCha8Rng, wave: u32) -> EnemyKind {
    let mut kind = EnemyKind::Rusher;
    if wave > 1 && rng.gen::<f64>() > TANK_ROLL_THRESHOLD {
        kind = EnemyKind::Tank;
    }
    if wave > 2 && rng.gen::<f64>() > SWARMER_ROLL_THRESHOLD {
        kind = EnemyKind::Swarmer;
    }
    if wave > 4 && rng.gen::<f64>() > SNIPER_ROLL_THRESHOLD {
        kind = EnemyKind::Sniper;
    }
    kind
}

/// Spawn an enemy of `kind` just outside a random edge of the play area.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    area: &PlayArea,
    kind: EnemyKind,
    next_id: &mut u32,
) -> hecs::Entity {
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    let along: f64 = rng.gen();
    let position = edge.point_outside(area, along, SPAWN_MARGIN);
    spawn_enemy_at(world, kind, position, next_id)
}

/// Spawn an enemy of `kind` at an exact position.
pub fn spawn_enemy_at(
    world: &mut World,
    kind: EnemyKind,
    position: Position,
    next_id: &mut u32,
) -> hecs::Entity {
    let profile = enemy_kind_params(kind);
    let id = EnemyId(*next_id);
    *next_id += 1;

    world.spawn((
        Enemy {
            kind,
            speed: profile.speed,
            radius: profile.radius,
            damage_to_structure: profile.damage_to_structure,
            alive: true,
        },
        id,
        position,
        Health::full(profile.health),
    ))
}

pub fn spawn_shockwave(
    world: &mut World,
    origin: Position,
    max_radius: f64,
    tone: EffectTone,
) -> hecs::Entity {
    world.spawn((
        origin,
        Shockwave {
            radius: SHOCKWAVE_START_RADIUS,
            max_radius,
            line_width: SHOCKWAVE_LINE_WIDTH,
            tone,
        },
    ))
}

pub fn spawn_floating_text(
    world: &mut World,
    text: impl Into<String>,
    position: Position,
    tone: EffectTone,
) -> hecs::Entity {
    world.spawn((
        position,
        FloatingText {
            text: text.into(),
            life: FLOATING_TEXT_LIFE,
            tone,
        },
    ))
}

pub fn spawn_announcement(world: &mut World, wave: u32, boss: bool) -> hecs::Entity {
    world.spawn((WaveAnnouncement {
        wave,
        boss,
        life: WAVE_ANNOUNCEMENT_LIFE,
    },))
}
