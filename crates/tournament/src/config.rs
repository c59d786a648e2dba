//! Arena configuration file
//!
//! ```toml
//! [arena]
//! games = 10
//! move_time_ms = 500
//!
//! [[engines]]
//! name = "Stockfish"
//! path = "/usr/local/bin/stockfish"
//! options = { Threads = 1 }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uci_engine::{AdapterTimeouts, EngineSpec};

use crate::error::ConfigError;
use crate::match_runner::MatchConfig;

/// Default path of the arena configuration
pub const DEFAULT_CONFIG_PATH: &str = "arena.toml";

/// Settings shared by every match of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Number of matches to play
    pub games: u32,
    /// Plies after which a game is stopped unfinished
    pub max_plies: u32,
    pub move_time_ms: u64,
    pub grace_ms: u64,
    pub handshake_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub validate_engine_moves: bool,
    pub results_file: PathBuf,
    /// Seed for drawing engines; entropy when absent
    pub seed: Option<u64>,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 200,
            move_time_ms: 1000,
            grace_ms: 1000,
            handshake_timeout_ms: 10_000,
            shutdown_timeout_ms: 1000,
            validate_engine_moves: true,
            results_file: PathBuf::from("game_results.csv"),
            seed: None,
        }
    }
}

impl ArenaSettings {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            move_time: Duration::from_millis(self.move_time_ms),
            grace: Duration::from_millis(self.grace_ms),
            validate_engine_moves: self.validate_engine_moves,
        }
    }

    pub fn adapter_timeouts(&self) -> AdapterTimeouts {
        AdapterTimeouts {
            handshake: Duration::from_millis(self.handshake_timeout_ms),
            shutdown: Duration::from_millis(self.shutdown_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub arena: ArenaSettings,
    /// Roster the two sides are drawn from
    #[serde(default)]
    pub engines: Vec<EngineSpec>,
}

impl ArenaConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engines.is_empty() {
            return Err(ConfigError::Invalid("no engines configured".to_string()));
        }

        let mut seen = HashSet::new();
        for spec in &self.engines {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::Invalid("engine with empty name".to_string()));
            }
            if spec.path.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("engine {} has no path", spec.name)));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate engine name {}", spec.name)));
            }
        }

        if self.arena.move_time_ms == 0 {
            return Err(ConfigError::Invalid("move_time_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
