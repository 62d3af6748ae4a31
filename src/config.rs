//! Configuration
//!
//! Run parameters come from an optional TOML tuning file, with CLI flags
//! taking precedence. A missing file falls back to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default tuning file path
pub const DEFAULT_CONFIG_PATH: &str = "invasion.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
}

/// Simulation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Number of aliens to spawn
    pub aliens: u32,
    /// Maximum number of simulation steps
    pub max_moves: u64,
    /// Path to the map definition file
    pub map_file: PathBuf,
    /// Fixed random seed; omitted means seed from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from the given path, or use defaults if it cannot
    /// be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("could not load tuning file: {e}; using defaults");
            Self::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                aliens: 5,
                max_moves: 10_000,
                map_file: PathBuf::from("data/sample_map"),
                seed: None,
            },
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}
