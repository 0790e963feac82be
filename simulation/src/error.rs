//! Error types for simulation runs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use diffusion_core::TopologyError;
use diffusion_routing::RoutingError;

/// Errors that can occur while configuring or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Failed to write trace: {0}")]
    TraceWrite(#[from] io::Error),
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
