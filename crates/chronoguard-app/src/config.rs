//! Host configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Command-line flags are applied on top by `main`.

use std::path::Path;

use serde::Deserialize;

use chronoguard_core::constants::FRAME_RATE;
use chronoguard_core::enums::Difficulty;
use chronoguard_sim::SimConfig;

use crate::error::ConfigError;

const MAX_FRAME_RATE: u32 = 240;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the gameplay and cosmetic RNGs.
    pub seed: u64,
    /// Difficulty preset name. Unknown names fall back to NORMAL.
    pub difficulty: String,
    /// Host frame rate (Hz).
    pub frame_rate: u32,
    pub autoplay: AutoplayConfig,
    pub headless: HeadlessConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub enabled: bool,
    /// The bot attacks once elapsed is within this many seconds of the target.
    pub reaction_window: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Frames simulated by a headless run.
    pub frames: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: "normal".to_string(),
            frame_rate: FRAME_RATE,
            autoplay: AutoplayConfig::default(),
            headless: HeadlessConfig::default(),
        }
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            reaction_window: 0.0,
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: u64::from(FRAME_RATE) * 120,
        }
    }
}

impl AppConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be in 1..={MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        let window = self.autoplay.reaction_window;
        if !window.is_finite() || window < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "autoplay.reaction_window must be a non-negative number, got {window}"
            )));
        }
        Ok(())
    }

    /// The configured difficulty, or NORMAL for an unknown name.
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty).unwrap_or_else(|| {
            log::warn!(
                "unknown difficulty {:?}, falling back to NORMAL",
                self.difficulty
            );
            Difficulty::Normal
        })
    }

    /// Seconds per host frame.
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        crate::game_loop::frame_duration(self.frame_rate)
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            difficulty: self.difficulty(),
            ..SimConfig::default()
        }
    }
}
