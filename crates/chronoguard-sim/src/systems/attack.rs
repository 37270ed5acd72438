//! Attack resolution: turns a stopwatch grade into damage, coins and combo.
//!
//! PERFECT hits every live enemy regardless of distance. GREAT and GOOD
//! only hit enemies strictly inside their blast radius. The blast ring of
//! a PERFECT is visual only.

use hecs::World;

use chronoguard_core::components::{Enemy, Health};
use chronoguard_core::constants::*;
use chronoguard_core::enums::{DamageOutcome, EffectTone, Grade};
use chronoguard_core::events::AudioCue;
use chronoguard_core::types::{PlayArea, Position};

use crate::boss::Boss;
use crate::economy::Economy;
use crate::shop::UpgradeLevels;
use crate::world_setup;

/// What one attack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackOutcome {
    pub kills: u32,
    /// Enemies damaged but not killed.
    pub wounded: u32,
    /// Coins granted by this attack, bonuses included.
    pub coins: u32,
    /// Damage dealt to the boss.
    pub boss_damage: u32,
    pub combo_bonus: bool,
}

/// Resolve one attack of `grade` fired from the centre of `area`.
pub fn resolve(
    world: &mut World,
    boss: Option<&mut Boss>,
    economy: &mut Economy,
    upgrades: &impl UpgradeLevels,
    area: &PlayArea,
    grade: Grade,
    audio_cues: &mut Vec<AudioCue>,
) -> AttackOutcome {
    audio_cues.push(AudioCue::Shoot { grade });

    let center = area.center();
    let power = upgrades.power();
    let radius_mult = upgrades.radius_multiplier();
    let coins_before = economy.coins;
    let mut outcome = AttackOutcome::default();

    match grade {
        Grade::Perfect => {
            world_setup::spawn_shockwave(
                world,
                center,
                area.longest_side() * radius_mult,
                EffectTone::Perfect,
            );
            outcome.boss_damage = strike_boss(world, boss, power, EffectTone::Damage);

            let hits = strike_enemies(world, center, None, power);
            if !hits.is_empty() {
                audio_cues.push(AudioCue::Explosion);
            }
            for (position, result) in hits {
                if result == DamageOutcome::Died {
                    outcome.kills += 1;
                    award_kill(world, economy, position);
                } else {
                    outcome.wounded += 1;
                }
            }

            if economy.register_perfect() {
                outcome.combo_bonus = true;
                world_setup::spawn_floating_text(
                    world,
                    format!("+{COMBO_BONUS_COINS} Combo!"),
                    center - Position::new(0.0, COMBO_TEXT_OFFSET_Y),
                    EffectTone::Coin,
                );
            }
        }
        Grade::Great | Grade::Good => {
            let (base_radius, tone) = if grade == Grade::Great {
                (GREAT_BLAST_RADIUS, EffectTone::Great)
            } else {
                (GOOD_BLAST_RADIUS, EffectTone::Good)
            };
            let radius = base_radius * radius_mult;
            world_setup::spawn_shockwave(world, center, radius, tone);

            if grade == Grade::Great {
                outcome.boss_damage = strike_boss(world, boss, power, EffectTone::Warning);
                economy.earn(GREAT_FLAT_COINS);
            }
            economy.break_combo();

            for (position, result) in strike_enemies(world, center, Some(radius), power) {
                if result == DamageOutcome::Died {
                    outcome.kills += 1;
                    audio_cues.push(AudioCue::Explosion);
                    award_kill(world, economy, position);
                } else {
                    outcome.wounded += 1;
                    audio_cues.push(AudioCue::Hit);
                }
            }
        }
        Grade::Miss => economy.break_combo(),
    }

    economy.record_kills(outcome.kills);
    outcome.coins = economy.coins - coins_before;
    log::debug!(
        "{} attack: {} kills, {} wounded, {} coins",
        grade.label(),
        outcome.kills,
        outcome.wounded,
        outcome.coins
    );
    outcome
}

/// Damage the live boss, if any. Returns the damage dealt.
fn strike_boss(world: &mut World, boss: Option<&mut Boss>, power: u32, tone: EffectTone) -> u32 {
    let Some(boss) = boss.filter(|b| !b.is_defeated()) else {
        return 0;
    };
    boss.take_damage(power);
    world_setup::spawn_floating_text(world, format!("-{power}"), boss.position(), tone);
    power
}

/// Damage live enemies, optionally only those strictly within `radius` of
/// `origin`. Returns the position and result of every hit.
fn strike_enemies(
    world: &mut World,
    origin: Position,
    radius: Option<f64>,
    damage: u32,
) -> Vec<(Position, DamageOutcome)> {
    let mut hits = Vec::new();
    for (_entity, (enemy, health, pos)) in
        world.query_mut::<(&mut Enemy, &mut Health, &Position)>()
    {
        if !enemy.alive {
            continue;
        }
        if let Some(radius) = radius {
            if pos.distance(origin) >= radius {
                continue;
            }
        }
        let result = health.apply_damage(damage);
        if result == DamageOutcome::Died {
            enemy.alive = false;
        }
        hits.push((*pos, result));
    }
    hits
}

fn award_kill(world: &mut World, economy: &mut Economy, position: Position) {
    economy.earn(KILL_COINS);
    world_setup::spawn_floating_text(world, format!("+{KILL_COINS}"), position, EffectTone::Coin);
}
