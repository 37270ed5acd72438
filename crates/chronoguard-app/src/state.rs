//! Session handle shared between the console front end and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use chronoguard_core::commands::PlayerCommand;
use chronoguard_core::state::GameStateSnapshot;

use crate::autopilot::Autopilot;
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::game_loop::{self, LoopConfig};

/// Commands sent from the front end to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits in a `Mutex` so the handle is `Sync`
/// - `Mutex<Option<...>>` for state that does not exist before `start`
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// `None` before `start` and after `shutdown`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop for `config`. Fails if one is already running.
    pub fn start(&self, config: &AppConfig) -> Result<(), SessionError> {
        let mut running = self.running.lock().map_err(|_| SessionError::Poisoned)?;
        if *running {
            return Err(SessionError::AlreadyRunning);
        }

        let loop_config = LoopConfig {
            sim: config.sim_config(),
            frame_rate: config.frame_rate,
            autopilot: config
                .autoplay
                .enabled
                .then(|| Autopilot::new(config.autoplay.reaction_window)),
        };
        let (tx, handle) = game_loop::spawn_game_loop(loop_config, self.latest_snapshot.clone())?;

        *self.command_tx.lock().map_err(|_| SessionError::Poisoned)? = Some(tx);
        *self.handle.lock().map_err(|_| SessionError::Poisoned)? = Some(handle);
        *running = true;
        log::info!("session started (seed {})", config.seed);
        Ok(())
    }

    /// Forward a player command to the game loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), SessionError> {
        let tx = self.command_tx.lock().map_err(|_| SessionError::Poisoned)?;
        let tx = tx.as_ref().ok_or(SessionError::NotStarted)?;
        tx.send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| SessionError::Disconnected)
    }

    /// The most recent snapshot, if the loop has produced one.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, SessionError> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|_| SessionError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the game loop and wait for its thread. A no-op when not running.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .take();
        if let Some(tx) = tx {
            // The loop may already be gone; joining below is enough.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let handle = self.handle.lock().map_err(|_| SessionError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| SessionError::Disconnected)?;
        }
        *self.running.lock().map_err(|_| SessionError::Poisoned)? = false;
        Ok(())
    }
}
