//! Application configuration loaded from TOML.

use crate::difficulty::{AgentSettings, Difficulty};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for the `ultimate_games` binary.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one JSON file per stored game.
    #[serde(default = "default_store_dir")]
    store_dir: PathBuf,

    /// Difficulty used when a command does not name one.
    #[serde(default)]
    difficulty: Difficulty,

    /// Search depth for medium difficulty.
    #[serde(default = "default_medium_depth")]
    medium_depth: u32,

    /// Search depth for hard difficulty.
    #[serde(default = "default_hard_depth")]
    hard_depth: u32,

    /// Seed for the random agent, for reproducible easy games.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_store_dir() -> PathBuf {
    PathBuf::from("games")
}

#[instrument]
fn default_medium_depth() -> u32 {
    2
}

#[instrument]
fn default_hard_depth() -> u32 {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            difficulty: Difficulty::default(),
            medium_depth: default_medium_depth(),
            hard_depth: default_hard_depth(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(store_dir = %config.store_dir.display(), difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the store directory.
    pub fn with_store_dir(mut self, store_dir: PathBuf) -> Self {
        self.store_dir = store_dir;
        self
    }

    /// Replaces the default difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Agent parameters derived from this configuration.
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings::new(self.medium_depth, self.hard_depth, self.seed)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
