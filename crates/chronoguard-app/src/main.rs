//! CHRONOGUARD console host.
//!
//! Interactive mode runs the game loop in real time and reads commands from
//! stdin. `--headless` plays a deterministic autopilot session and prints a
//! JSON report.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chronoguard_app::config::AppConfig;
use chronoguard_app::console::{self, ConsoleInput};
use chronoguard_app::headless;
use chronoguard_app::state::AppState;

#[derive(Parser)]
#[command(name = "chronoguard")]
#[command(about = "Stop the clock on time to defend the castle")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty: easy, normal, hard or hell
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Run without a terminal session and print a JSON report
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long)]
    frames: Option<u64>,

    /// Let the autopilot attack in interactive mode
    #[arg(long)]
    autoplay: bool,

    /// Autopilot reaction window in seconds
    #[arg(long)]
    reaction_window: Option<f64>,

    /// Start the headless session at this wave
    #[arg(long)]
    jump: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if cli.headless {
        let report = headless::run(&config, cli.jump);
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{json}");
        return Ok(());
    }

    run_interactive(&config)
}

fn build_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(difficulty) = &cli.difficulty {
        config.difficulty = difficulty.clone();
    }
    if let Some(frames) = cli.frames {
        config.headless.frames = frames;
    }
    if cli.autoplay {
        config.autoplay.enabled = true;
    }
    if let Some(window) = cli.reaction_window {
        config.autoplay.reaction_window = window;
    }
    config.validate().context("invalid command-line options")?;
    Ok(config)
}

fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::new();
    state.start(config).context("starting game loop")?;
    println!("{}", console::HELP);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match console::parse_command(&line) {
            Ok(ConsoleInput::Command(command)) => {
                state.send(command).context("sending command")?;
                // Let the loop pick it up before printing the HUD.
                std::thread::sleep(config.frame_duration() * 2);
            }
            Ok(ConsoleInput::Status) => {}
            Ok(ConsoleInput::Help) => {
                println!("{}", console::HELP);
                continue;
            }
            Ok(ConsoleInput::Quit) => break,
            Err(message) => {
                println!("{message}");
                continue;
            }
        }
        if let Some(snapshot) = state.snapshot().context("reading snapshot")? {
            println!("{}", console::format_status(&snapshot));
        }
    }

    state.shutdown().context("stopping game loop")?;
    Ok(())
}
