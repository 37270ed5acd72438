//! Deterministic headless runs: fixed frame step, autopilot input, summary
//! report. Same config = same report.

use std::collections::BTreeMap;

use serde::Serialize;

use chronoguard_core::commands::PlayerCommand;
use chronoguard_core::enums::{GamePhase, Grade};
use chronoguard_core::events::GameEvent;
use chronoguard_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::config::AppConfig;

/// Summary of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessReport {
    pub seed: u64,
    pub frames: u64,
    pub phase: GamePhase,
    pub wave: u32,
    pub castle_health: u32,
    pub coins: u32,
    pub best_combo: u32,
    pub enemies_killed: u32,
    pub bosses_defeated: u32,
    /// Attack count per grade label.
    pub grades: BTreeMap<String, u32>,
}

/// Play one session with the autopilot. Stops early on game over.
/// `jump_to` starts the session at that wave.
pub fn run(config: &AppConfig, jump_to: Option<u32>) -> HeadlessReport {
    let mut engine = SimulationEngine::new(config.sim_config());
    let bot = Autopilot::new(config.autoplay.reaction_window);
    let dt = config.frame_dt();

    engine.queue_command(PlayerCommand::StartGame {
        difficulty: config.difficulty(),
    });
    if let Some(wave) = jump_to {
        engine.queue_command(PlayerCommand::JumpToWave { wave });
    }

    let mut grades: BTreeMap<String, u32> = BTreeMap::new();
    let mut bosses_defeated = 0;
    let mut frames = 0;

    while frames < config.headless.frames {
        let snapshot = engine.tick(dt);
        frames += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::AttackResolved { grade, .. } => {
                    *grades.entry(grade_key(*grade)).or_default() += 1;
                }
                GameEvent::BossDefeated { .. } => bosses_defeated += 1,
                _ => {}
            }
        }
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        if let Some(command) = bot.decide(&snapshot) {
            engine.queue_command(command);
        }
    }

    let economy = engine.economy();
    log::info!(
        "headless run finished after {frames} frames on wave {}",
        engine.wave().wave
    );

    HeadlessReport {
        seed: config.seed,
        frames,
        phase: engine.phase(),
        wave: engine.wave().wave,
        castle_health: engine.castle().current,
        coins: economy.coins,
        best_combo: economy.best_combo,
        enemies_killed: economy.enemies_killed,
        bosses_defeated,
        grades,
    }
}

fn grade_key(grade: Grade) -> String {
    grade.label().to_string()
}
