//! Configuration System
//!
//! Loads engine and sandbox settings from `worker.toml` so behavior can be
//! tuned without recompiling. Every section falls back to its defaults when
//! omitted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "worker.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

/// Settings threaded into the engine entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Status marker settings
    #[serde(default)]
    pub status: StatusConfig,
    /// Lifetime bookkeeping settings
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Melee movement settings
    #[serde(default)]
    pub melee: MeleeConfig,
}

/// Whether workers announce what they are doing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Emit a status marker from every action
    pub verbose: bool,
    /// Markers are visible to every player, not just the owner
    pub broadcast: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            broadcast: true,
        }
    }
}

/// Head-count bookkeeping near the end of a worker's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Role counter to decrement in the home room
    pub role: String,
    /// The counter drops once ticks-to-live reaches body size times this
    pub ttl_per_body_part: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            role: "Worker".to_string(),
            ttl_per_body_part: 3,
        }
    }
}

/// Movement used by the melee primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    pub reuse_path: u32,
    pub visualize_path: bool,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            reuse_path: 0,
            visualize_path: true,
        }
    }
}

/// Settings for the in-process sandbox host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub room: RoomConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
}

/// Simulation run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub seed: u64,
    /// Ticks between progress reports
    pub report_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_ticks: 1_500,
            seed: 42,
            report_interval: 100,
        }
    }
}

/// Generated starter room layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub name: String,
    pub controller_level: u8,
    pub sources: usize,
    pub extensions: usize,
    pub towers: usize,
    pub construction_sites: usize,
    pub barriers: usize,
    pub damaged_roads: usize,
    pub dropped_piles: usize,
    pub terrain_walls: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "W1N1".to_string(),
            controller_level: 2,
            sources: 2,
            extensions: 5,
            towers: 1,
            construction_sites: 3,
            barriers: 6,
            damaged_roads: 4,
            dropped_piles: 3,
            terrain_walls: 120,
        }
    }
}

/// Worker bodies spawned into the sandbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub count: usize,
    pub body_size: u32,
    pub work_parts: u32,
    pub carry_capacity: u32,
    pub ticks_to_live: u32,
    /// Fatigue added by every step taken
    pub move_fatigue: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 4,
            body_size: 6,
            work_parts: 2,
            carry_capacity: 100,
            ticks_to_live: 1_500,
            move_fatigue: 0,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from `path`, or uses defaults if it cannot be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Renders the configuration as a TOML document.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
