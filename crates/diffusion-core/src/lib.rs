//! # Diffusion Core
//!
//! Core traits, types, and errors for the directed-diffusion simulator.
//!
//! This crate holds the vocabulary shared by the propagation engines and the
//! simulation front end, so that the walk logic can run against any
//! topology, any source of randomness and any trace consumer.
//!
//! ## Key Traits
//!
//! - [`NetworkTopology`]: Read-only view of the sensor grid (neighbor lists)
//! - [`NeighborSelector`]: Injectable source of neighbor picks
//! - [`TraceSink`]: Write-only consumer of structured trace records
//!
//! ## Key Types
//!
//! - [`NodeId`] / [`EventId`]: Node and sensed-event identifiers
//! - [`EventRecord`]: What a node knows about the route toward an event
//! - [`AgentMessage`]: An event record carried together with its TTL
//! - [`TraceRecord`]: One hop or one search outcome, in hop order
//! - [`GridTopology`]: Rectangular 4-connected grid provider

pub mod error;
pub mod topology;
pub mod trace;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::*;
pub use topology::*;
pub use trace::*;
pub use traits::*;
pub use types::*;
