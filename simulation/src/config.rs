//! Simulation configuration
//!
//! A run is described by a small TOML file; every field is optional:
//!
//! ```toml
//! event_id = 0
//! seed = 42
//! trace = "console"
//!
//! [grid]
//! length = 7
//! width = 7
//!
//! [protocol]
//! ttl_max = 15
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use diffusion_core::{DEFAULT_EVENT_ID, EventId};
use diffusion_routing::ProtocolConfig;

use crate::error::{SimulationError, SimulationResult};

/// Node ids from 100 on overflow the grid renderer's column padding
pub const MAX_RENDER_NODES: usize = 100;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Event sensed by the network
    pub event_id: EventId,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// How hop traces are reported
    pub trace: TraceFormat,
    /// Grid dimensions
    pub grid: GridConfig,
    /// Protocol parameters
    pub protocol: ProtocolConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            event_id: DEFAULT_EVENT_ID,
            seed: None,
            trace: TraceFormat::default(),
            grid: GridConfig::default(),
            protocol: ProtocolConfig::default(),
        }
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows
    pub length: usize,
    /// Number of columns
    pub width: usize,
}

impl GridConfig {
    /// Whether every node id fits the grid renderer's column padding
    pub fn renders_legibly(&self) -> bool {
        self.length
            .checked_mul(self.width)
            .is_some_and(|nodes| nodes <= MAX_RENDER_NODES)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            length: 7,
            width: 7,
        }
    }
}

/// Trace output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// Human-readable hop lines with table snapshots
    #[default]
    Console,
    /// One JSON object per trace record
    Jsonl,
    /// No trace output
    None,
}

impl SimConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> SimulationResult<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> SimulationResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| SimulationError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "Loaded simulation config");
        Ok(config)
    }

    /// Render the config as TOML
    pub fn to_toml_string(&self) -> SimulationResult<String> {
        toml::to_string_pretty(self)
            .map_err(|err| SimulationError::InvalidConfig(err.to_string()))
    }

    /// Check the configuration describes a runnable simulation
    pub fn validate(&self) -> SimulationResult<()> {
        let GridConfig { length, width } = self.grid;
        if length == 0 || width == 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "grid dimensions must be positive, got {length}x{width}"
            )));
        }
        if length.checked_mul(width).is_none_or(|nodes| nodes < 2) {
            return Err(SimulationError::InvalidConfig(format!(
                "grid must hold at least 2 nodes, got {length}x{width}"
            )));
        }
        if !self.grid.renders_legibly() {
            warn!(
                length,
                width,
                max_nodes = MAX_RENDER_NODES,
                "Grid is too large to render legibly"
            );
        }
        self.protocol.validate()?;
        Ok(())
    }
}
