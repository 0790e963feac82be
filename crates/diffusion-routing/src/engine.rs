//! Diffusion engine
//!
//! The [`DiffusionEngine`] owns a topology together with one [`EventTable`]
//! per node, and runs agent and search walks against them one at a time.
//! Agent walks are the only writers of the tables; search walks only read.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use diffusion_core::{
    DEFAULT_TTL, EventId, NeighborSelector, NetworkTopology, NodeId, SearchOutcome, TraceSink,
};

use crate::agent::{self, AgentTrace};
use crate::error::{RoutingError, RoutingResult};
use crate::search;
use crate::table::EventTable;

/// Above this TTL a walk on a small grid mostly revisits nodes
const LARGE_TTL_WARNING: u32 = 1_000;

/// Protocol parameters shared by agent and search walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Hop budget of every walk; a walk visits at most `ttl_max + 1` nodes
    pub ttl_max: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            ttl_max: DEFAULT_TTL,
        }
    }
}

impl ProtocolConfig {
    /// Config with the given TTL
    pub fn with_ttl(ttl_max: u32) -> Self {
        Self { ttl_max }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> RoutingResult<()> {
        if self.ttl_max == u32::MAX {
            return Err(RoutingError::InvalidConfig(
                "ttl_max must leave room for the final hop".to_string(),
            ));
        }
        if self.ttl_max > LARGE_TTL_WARNING {
            warn!(ttl_max = self.ttl_max, "Unusually large TTL");
        }
        Ok(())
    }
}

/// Simulation context: topology plus per-node event tables
#[derive(Debug, Clone)]
pub struct DiffusionEngine<T: NetworkTopology> {
    topology: T,
    tables: Vec<EventTable>,
    config: ProtocolConfig,
}

impl<T: NetworkTopology> DiffusionEngine<T> {
    /// Create an engine with empty event tables
    ///
    /// Fails on isolated nodes, self loops, one-way edges and neighbor ids
    /// outside the topology.
    pub fn new(topology: T, config: ProtocolConfig) -> RoutingResult<Self> {
        topology.validate()?;
        config.validate()?;

        let tables = vec![EventTable::new(); topology.node_count()];
        debug!(
            nodes = tables.len(),
            ttl_max = config.ttl_max,
            "Diffusion engine ready"
        );

        Ok(Self {
            topology,
            tables,
            config,
        })
    }

    /// The topology being walked
    pub fn topology(&self) -> &T {
        &self.topology
    }

    /// Protocol configuration
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn ttl_max(&self) -> u32 {
        self.config.ttl_max
    }

    /// Event table of a node
    pub fn table(&self, node: NodeId) -> Option<&EventTable> {
        self.tables.get(node.index())
    }

    /// All event tables, indexed by node id
    pub fn tables(&self) -> &[EventTable] {
        &self.tables
    }

    /// Nodes whose table knows the event
    pub fn nodes_knowing(&self, event_id: EventId) -> Vec<NodeId> {
        self.tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.contains(event_id))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Empty every event table
    pub fn reset_tables(&mut self) {
        self.tables.iter_mut().for_each(EventTable::clear);
    }

    /// Walk an agent message for `event_id` starting at `start`
    ///
    /// Every visited node's table is upserted with the hop's record and every
    /// hop is reported to `sink`. The walk always runs until its TTL expires.
    pub fn propagate_agent<S, K>(
        &mut self,
        start: NodeId,
        event_id: EventId,
        selector: &mut S,
        sink: &mut K,
    ) -> RoutingResult<AgentTrace>
    where
        S: NeighborSelector + ?Sized,
        K: TraceSink + ?Sized,
    {
        agent::propagate_agent(
            &self.topology,
            &mut self.tables,
            self.config.ttl_max,
            start,
            event_id,
            selector,
            sink,
        )
    }

    /// Walk a search message for `event_id` starting at `sink_node`
    ///
    /// Stops at the first node whose table knows the event and returns the
    /// reversed path from there to the sink, or the full path on expiry.
    pub fn propagate_search<S, K>(
        &self,
        sink_node: NodeId,
        event_id: EventId,
        selector: &mut S,
        sink: &mut K,
    ) -> RoutingResult<SearchOutcome>
    where
        S: NeighborSelector + ?Sized,
        K: TraceSink + ?Sized,
    {
        search::propagate_search(
            &self.topology,
            &self.tables,
            self.config.ttl_max,
            sink_node,
            event_id,
            selector,
            sink,
        )
    }

    /// Consume the engine and return the topology
    pub fn into_topology(self) -> T {
        self.topology
    }
}
