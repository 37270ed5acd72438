//! Error types for the host application.

use std::path::PathBuf;

/// Failure to load or validate an `AppConfig`.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `AppConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure talking to the game loop thread.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("game loop already running")]
    AlreadyRunning,

    #[error("game loop not started")]
    NotStarted,

    #[error("game loop has shut down")]
    Disconnected,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}
