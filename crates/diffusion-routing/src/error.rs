//! Routing error types
//!
//! Wraps the core topology and walk errors.

use thiserror::Error;

use diffusion_core::{TopologyError, WalkError};

/// Errors from the propagation engines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The topology violates its contract
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// A walk could not be started or continued
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    /// Invalid protocol configuration
    #[error("Invalid protocol configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
