//! Simulation runs
//!
//! A run follows the classic directed-diffusion sequence:
//! - an event is sensed somewhere on the grid
//! - an agent message walks away from the sensing node, leaving breadcrumbs
//! - a sink is placed and its search message walks until it meets a breadcrumb
//!
//! All random draws of a run come from one seeded RNG, so a seed replays the
//! whole run.

use serde::{Deserialize, Serialize};
use tracing::info;

use diffusion_core::{
    EventId, GridBuilder, GridTopology, NeighborSelector, NodeId, SearchOutcome, TraceSink,
};
use diffusion_routing::{AgentTrace, DiffusionEngine, RandomSelector};

use crate::config::SimConfig;
use crate::error::SimulationResult;
use crate::sensing::{Sensing, pick_sink, sense_event};

/// Everything that happened in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Event placement, `None` when the origin was given explicitly
    pub sensing: Option<Sensing>,
    /// The agent walk
    pub agent: AgentTrace,
    /// Node the search started from
    pub sink: NodeId,
    /// Result of the search walk
    pub outcome: SearchOutcome,
    /// Nodes whose table knows the event after the run
    pub nodes_knowing: usize,
}

impl SimulationReport {
    /// Node that emitted the agent message
    pub fn origin(&self) -> Option<NodeId> {
        self.agent.hops.first().map(|hop| hop.node)
    }

    /// One-line summary for logs and the CLI
    pub fn summary(&self) -> String {
        let origin = self
            .origin()
            .map(|node| node.to_string())
            .unwrap_or_default();
        match &self.outcome {
            SearchOutcome::Found { route } => format!(
                "event {} from node {origin} reached sink {} in {} hops ({} nodes informed)",
                self.agent.event_id,
                self.sink,
                route.len().saturating_sub(1),
                self.nodes_knowing
            ),
            SearchOutcome::NotFound { path } => format!(
                "event {} from node {origin} not found by sink {} after {} nodes ({} nodes informed)",
                self.agent.event_id,
                self.sink,
                path.len(),
                self.nodes_knowing
            ),
        }
    }
}

/// Counters accumulated over all runs of a simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    pub runs: u64,
    pub agent_hops: u64,
    pub search_hops: u64,
    pub intersections_found: u64,
    pub searches_expired: u64,
}

impl SimStats {
    fn record(&mut self, report: &SimulationReport) {
        self.runs += 1;
        self.agent_hops += report.agent.len() as u64;
        self.search_hops += report.outcome.path().len() as u64;
        if report.outcome.is_found() {
            self.intersections_found += 1;
        } else {
            self.searches_expired += 1;
        }
    }

    /// Fraction of runs whose search met the agent path
    pub fn hit_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.intersections_found as f64 / self.runs as f64
    }
}

/// A grid network with its protocol state and RNG
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    engine: DiffusionEngine<GridTopology>,
    selector: RandomSelector,
    /// Statistics
    pub stats: SimStats,
}

impl Simulation {
    /// Build the grid and protocol state described by `config`
    pub fn new(config: SimConfig) -> SimulationResult<Self> {
        config.validate()?;

        let grid = GridBuilder::new(config.grid.length, config.grid.width).build()?;
        let engine = DiffusionEngine::new(grid, config.protocol)?;
        let selector = RandomSelector::from_seed_option(config.seed);

        info!(
            length = config.grid.length,
            width = config.grid.width,
            ttl_max = config.protocol.ttl_max,
            seed = ?config.seed,
            "Simulation ready"
        );

        Ok(Self {
            config,
            engine,
            selector,
            stats: SimStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridTopology {
        self.engine.topology()
    }

    /// Protocol state, including every node's event table
    pub fn engine(&self) -> &DiffusionEngine<GridTopology> {
        &self.engine
    }

    /// Sense an event at a random place, spread it, and search for it from a random sink
    ///
    /// Every run starts from empty event tables; the tables of the last run
    /// stay readable through [`engine`](Self::engine) until the next one.
    pub fn run<K>(&mut self, trace: &mut K) -> SimulationResult<SimulationReport>
    where
        K: TraceSink + ?Sized,
    {
        let event_id = self.config.event_id;
        self.engine.reset_tables();

        let sensing = sense_event(self.engine.topology(), self.selector.rng_mut());
        info!(
            area = ?sensing.area,
            origin = %sensing.origin,
            "Event sensed, origin emits the agent message"
        );
        let agent =
            self.engine
                .propagate_agent(sensing.origin, event_id, &mut self.selector, trace)?;

        let sink = pick_sink(self.engine.topology(), self.selector.rng_mut());
        info!(sink = %sink, "Sink placed");
        let outcome = self
            .engine
            .propagate_search(sink, event_id, &mut self.selector, trace)?;

        Ok(self.finish_run(Some(sensing), agent, sink, outcome, event_id))
    }

    /// Run both walks from fixed nodes with the given selector
    ///
    /// Starts from empty event tables, like [`run`](Self::run).
    pub fn run_from<S, K>(
        &mut self,
        origin: NodeId,
        sink: NodeId,
        selector: &mut S,
        trace: &mut K,
    ) -> SimulationResult<SimulationReport>
    where
        S: NeighborSelector + ?Sized,
        K: TraceSink + ?Sized,
    {
        let event_id = self.config.event_id;
        self.engine.reset_tables();

        let agent = self
            .engine
            .propagate_agent(origin, event_id, selector, trace)?;
        let outcome = self
            .engine
            .propagate_search(sink, event_id, selector, trace)?;

        Ok(self.finish_run(None, agent, sink, outcome, event_id))
    }

    fn finish_run(
        &mut self,
        sensing: Option<Sensing>,
        agent: AgentTrace,
        sink: NodeId,
        outcome: SearchOutcome,
        event_id: EventId,
    ) -> SimulationReport {
        let report = SimulationReport {
            sensing,
            agent,
            sink,
            outcome,
            nodes_knowing: self.engine.nodes_knowing(event_id).len(),
        };
        self.stats.record(&report);
        info!(summary = %report.summary(), "Run complete");
        report
    }
}
