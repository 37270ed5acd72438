//! Line-based console front end: parses typed commands and renders a one-line
//! HUD from a snapshot.

use std::fmt::Write as _;

use chronoguard_core::commands::PlayerCommand;
use chronoguard_core::enums::{Difficulty, GamePhase, UpgradeKind};
use chronoguard_core::state::GameStateSnapshot;

/// What a typed line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  <enter> | a | attack     stop the stopwatch and attack
  start [difficulty]       start a game (easy, normal, hard, hell)
  p | pause, r | resume    pause or resume
  shop, close              open or close the upgrade shop
  buy <item>               radius, power, heal, maxHealth (shop only)
  jump <wave>              restart the field at a wave
  menu                     return to the main menu
  s | status               print the HUD line
  q | quit                 exit";

/// Parse one typed line. An empty line is an attack.
/// Returns an error message for unrecognized input.
pub fn parse_command(line: &str) -> Result<ConsoleInput, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ConsoleInput::Command(PlayerCommand::Attack));
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "a" | "attack" => PlayerCommand::Attack,
        "start" => PlayerCommand::StartGame {
            difficulty: arg.map(Difficulty::from_name_or_default).unwrap_or_default(),
        },
        "p" | "pause" => PlayerCommand::Pause,
        "r" | "resume" => PlayerCommand::Resume,
        "shop" => PlayerCommand::OpenShop,
        "close" => PlayerCommand::CloseShop,
        "buy" => {
            let name = arg.ok_or("buy needs an item name")?;
            let upgrade =
                UpgradeKind::parse(name).ok_or_else(|| format!("unknown shop item {name:?}"))?;
            PlayerCommand::Purchase { upgrade }
        }
        "jump" => {
            let wave = arg
                .and_then(|w| w.parse::<u32>().ok())
                .ok_or("jump needs a wave number")?;
            PlayerCommand::JumpToWave { wave }
        }
        "menu" => PlayerCommand::ReturnToMenu,
        "s" | "status" => return Ok(ConsoleInput::Status),
        "h" | "help" | "?" => return Ok(ConsoleInput::Help),
        "q" | "quit" | "exit" => return Ok(ConsoleInput::Quit),
        other => return Err(format!("unknown command {other:?} (try help)")),
    };
    Ok(ConsoleInput::Command(command))
}

/// One-line HUD for `snapshot`.
pub fn format_status(snapshot: &GameStateSnapshot) -> String {
    let mut line = String::new();
    match snapshot.phase {
        GamePhase::MainMenu => return "main menu (type `start`)".to_string(),
        GamePhase::GameOver => {
            return format!(
                "GAME OVER on wave {} with {} coins (type `start`)",
                snapshot.wave.wave, snapshot.economy.coins
            );
        }
        GamePhase::Paused => line.push_str("[paused] "),
        GamePhase::Shop => {
            let up = &snapshot.upgrades;
            let _ = write!(
                line,
                "[shop] radius L{} ({}) power L{} ({}) heal ({}) maxHealth ({}) ",
                up.radius_level,
                cost_label(up.radius_cost),
                up.power_level,
                cost_label(up.power_cost),
                cost_label(up.heal_cost),
                cost_label(up.max_health_cost),
            );
        }
        GamePhase::Playing => {}
    }

    let sw = &snapshot.stopwatch;
    let _ = write!(
        line,
        "wave {} | castle {}/{} | {} / {}",
        snapshot.wave.wave,
        snapshot.castle.health,
        snapshot.castle.max_health,
        sw.elapsed_display,
        sw.target_display,
    );
    if let Some(grade) = sw.last_grade {
        let _ = write!(line, " | last {}", grade.label());
    }
    let _ = write!(
        line,
        " | coins {} combo {} | enemies {}",
        snapshot.economy.coins,
        snapshot.economy.combo,
        snapshot.enemies.len()
    );
    if let Some(boss) = &snapshot.boss {
        let _ = write!(
            line,
            " | boss L{} {}/{}",
            boss.level, boss.health, boss.max_health
        );
        if boss.surging {
            line.push_str(" OVERDRIVE");
        }
    }
    if snapshot.frozen {
        line.push_str(" | frozen");
    } else if snapshot.attack_locked {
        line.push_str(" | locked");
    }
    line
}

fn cost_label(cost: Option<u32>) -> String {
    cost.map_or_else(|| "max".to_string(), |c| c.to_string())
}
