//! Game loop thread: runs the simulation engine at the host frame rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use chronoguard_core::enums::GamePhase;
use chronoguard_core::state::GameStateSnapshot;
use chronoguard_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::error::SessionError;
use crate::state::GameLoopCommand;

/// Settings for one game loop thread.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub sim: SimConfig,
    pub frame_rate: u32,
    pub autopilot: Option<Autopilot>,
}

/// Measures wall-clock frame deltas.
///
/// `resync` moves the baseline to now so a stall or a pause is never turned
/// into one huge simulated step.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Seconds since the previous call (or resync).
    pub fn delta(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }

    pub fn resync(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Duration of one frame at `frame_rate` Hz.
pub fn frame_duration(frame_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(frame_rate.max(1)))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), SessionError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("chronoguard-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config.sim);
    let frame = frame_duration(config.frame_rate);
    let mut clock = FrameClock::new(Instant::now());
    let mut next_frame_time = Instant::now();
    let mut was_playing = false;

    log::info!("game loop started at {} Hz", config.frame_rate);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame. Time spent outside play is dropped.
        let now = Instant::now();
        let dt = clock.delta(now);
        let snapshot = engine.tick(if was_playing { dt } else { 0.0 });
        let playing = snapshot.phase == GamePhase::Playing;
        if playing && !was_playing {
            clock.resync(now);
        }
        was_playing = playing;

        // 3. Autopilot input for the next frame
        if let Some(bot) = config.autopilot {
            if let Some(cmd) = bot.decide(&snapshot) {
                engine.queue_command(cmd);
            }
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_frame_time = now;
            clock.resync(now);
        }
    }
}
