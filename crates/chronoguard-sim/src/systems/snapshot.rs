//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use chronoguard_core::components::*;
use chronoguard_core::constants::CASTLE_RADIUS;
use chronoguard_core::enums::*;
use chronoguard_core::events::{AudioCue, GameEvent};
use chronoguard_core::state::*;
use chronoguard_core::types::{Position, SimTime};

use crate::boss::Boss;

/// Session-level state the world does not hold.
pub struct SessionView {
    pub time: SimTime,
    pub phase: GamePhase,
    pub frozen: bool,
    pub attack_locked: bool,
    pub center: Position,
    pub castle: Health,
    pub stopwatch: StopwatchView,
    pub wave: WaveView,
    pub economy: EconomyView,
    pub upgrades: UpgradeView,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    session: SessionView,
    boss: Option<&Boss>,
    audio_cues: Vec<AudioCue>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: session.time,
        phase: session.phase,
        frozen: session.frozen,
        attack_locked: session.attack_locked,
        castle: CastleView {
            position: session.center,
            radius: CASTLE_RADIUS,
            health: session.castle.current,
            max_health: session.castle.max,
        },
        enemies: build_enemies(world),
        boss: boss.map(Boss::view),
        shockwaves: build_shockwaves(world),
        floating_texts: build_floating_texts(world),
        announcements: build_announcements(world),
        stopwatch: session.stopwatch,
        wave: session.wave,
        economy: session.economy,
        upgrades: session.upgrades,
        audio_cues,
        events,
    }
}

/// Live enemies, ordered by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyId, &Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, enemy, _, _))| enemy.alive)
        .map(|(_, (id, enemy, pos, health))| EnemyView {
            id: id.0,
            kind: enemy.kind,
            position: *pos,
            radius: enemy.radius,
            health: health.current,
            max_health: health.max,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_shockwaves(world: &World) -> Vec<ShockwaveView> {
    world
        .query::<(&Position, &Shockwave)>()
        .iter()
        .map(|(_, (pos, wave))| ShockwaveView {
            position: *pos,
            radius: wave.radius,
            max_radius: wave.max_radius,
            line_width: wave.line_width,
            tone: wave.tone,
        })
        .collect()
}

fn build_floating_texts(world: &World) -> Vec<FloatingTextView> {
    world
        .query::<(&Position, &FloatingText)>()
        .iter()
        .map(|(_, (pos, text))| FloatingTextView {
            text: text.text.clone(),
            position: *pos,
            life: text.life,
            tone: text.tone,
        })
        .collect()
}

fn build_announcements(world: &World) -> Vec<AnnouncementView> {
    world
        .query::<&WaveAnnouncement>()
        .iter()
        .map(|(_, banner)| AnnouncementView {
            wave: banner.wave,
            boss: banner.boss,
            life: banner.life,
        })
        .collect()
}
