//! # Diffusion Routing
//!
//! Event tables and the two-phase random-walk protocol of the simulator.
//!
//! ## Core Components
//!
//! - [`EventTable`]: Per-node map from event id to the best known route record
//! - [`DiffusionEngine`]: Owns the topology and one event table per node
//! - [`RandomWalk`]: TTL-bounded memoryless walk shared by both engines
//! - [`RandomSelector`], [`FirstNeighbor`], [`ScriptedSelector`]: Neighbor pickers
//!
//! ## Protocol
//!
//! 1. **AGENT**: A node that sensed an event starts an agent message. At every
//!    visited node the message deposits `{event, jumps, next}` into the node's
//!    event table (insert-or-improve), then moves to a random neighbor. The
//!    walk visits exactly `ttl_max + 1` nodes.
//! 2. **SEARCH**: The sink starts a search message on its own random walk and
//!    checks each visited node's table. The first node that knows the event is
//!    the intersection; the search path is reversed into the route from the
//!    intersection back to the sink. If the TTL runs out first, the search
//!    reports a miss, which is a normal outcome.
//!
//! ## Example
//!
//! ```rust
//! use diffusion_core::{EventId, GridBuilder, NodeId, TraceLog};
//! use diffusion_routing::{DiffusionEngine, FirstNeighbor, ProtocolConfig};
//!
//! let grid = GridBuilder::new(4, 4).build().unwrap();
//! let mut engine = DiffusionEngine::new(grid, ProtocolConfig::with_ttl(3)).unwrap();
//! let mut trace = TraceLog::new();
//!
//! let agent = engine
//!     .propagate_agent(NodeId(5), EventId(0), &mut FirstNeighbor, &mut trace)
//!     .unwrap();
//! assert_eq!(agent.visited(), vec![NodeId(5), NodeId(1), NodeId(0), NodeId(4)]);
//!
//! let outcome = engine
//!     .propagate_search(NodeId(4), EventId(0), &mut FirstNeighbor, &mut trace)
//!     .unwrap();
//! assert_eq!(outcome.into_parts(), (true, vec![NodeId(4)]));
//! ```

pub mod agent;
pub mod engine;
pub mod error;
pub mod search;
pub mod selector;
pub mod table;
pub mod walk;

// Re-export main types
pub use agent::AgentTrace;
pub use engine::{DiffusionEngine, ProtocolConfig};
pub use error::{RoutingError, RoutingResult};
pub use selector::{FirstNeighbor, RandomSelector, ScriptedSelector};
pub use table::{EventTable, UpsertOutcome};
pub use walk::{RandomWalk, WalkState, WalkStep};

// Re-export core types for convenience
pub use diffusion_core::{HopTrace, Phase, SearchOutcome, TraceRecord};
