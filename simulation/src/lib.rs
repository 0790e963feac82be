//! # Diffusion Simulation
//!
//! Grid sensor network simulation of directed-diffusion style event
//! dissemination.
//!
//! ## Overview
//!
//! A run plays out in three steps on a `length x width` grid:
//!
//! - **Sensing**: nodes around a random center sense an event and one of them
//!   emits an agent message
//! - **Agent walk**: the agent message random-walks for `ttl_max + 1` nodes,
//!   leaving an event record (hop count and next hop) in every table it visits
//! - **Search walk**: a search message from a random sink random-walks until it
//!   meets a node that knows the event; the reversed search path is the route
//!   back to the sink
//!
//! ## Architecture
//!
//! - **Config** (`config.rs`): TOML run configuration
//! - **Sensing** (`sensing.rs`): event area and sink placement
//! - **Render** (`render.rs`): text rendering of grids, tables and routes
//! - **Sinks** (`sinks.rs`): console and JSONL trace output
//! - **Simulation** (`simulation.rs`): one grid, its tables and its RNG
//! - **Scenarios** (`scenarios.rs`): canned runs used by the CLI
//!
//! ## Example
//!
//! ```rust
//! use diffusion_core::{NodeId, TraceLog};
//! use diffusion_routing::FirstNeighbor;
//! use diffusion_simulation::{GridConfig, SimConfig, Simulation};
//!
//! let config = SimConfig {
//!     seed: Some(1),
//!     grid: GridConfig { length: 4, width: 4 },
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! let mut trace = TraceLog::new();
//! let report = sim
//!     .run_from(NodeId(5), NodeId(5), &mut FirstNeighbor, &mut trace)
//!     .unwrap();
//!
//! // The sink itself holds the event, so the route is just the sink
//! assert_eq!(report.outcome.into_parts(), (true, vec![NodeId(5)]));
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod scenarios;
pub mod sensing;
pub mod simulation;
pub mod sinks;

pub use config::{GridConfig, SimConfig, TraceFormat};
pub use error::{SimulationError, SimulationResult};
pub use render::{render_grid, render_route, render_table};
pub use sensing::{Sensing, event_area, pick_sink, sense_event};
pub use simulation::{SimStats, Simulation, SimulationReport};
pub use sinks::{ConsoleSink, JsonlSink};
