//! Agent message propagation
//!
//! An agent message walks away from the node that sensed an event and
//! leaves a breadcrumb in the event table of every node it visits.

use tracing::{debug, info, trace};

use diffusion_core::{
    AgentMessage, EventId, EventRecord, HopTrace, NetworkTopology, NeighborSelector, NodeId,
    Phase, TraceRecord, TraceSink, WalkError,
};

use crate::error::RoutingResult;
use crate::table::EventTable;
use crate::walk::RandomWalk;

/// Hop-by-hop record of one agent walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTrace {
    pub event_id: EventId,
    pub hops: Vec<HopTrace>,
}

impl AgentTrace {
    /// Nodes in visiting order, repeats included
    pub fn visited(&self) -> Vec<NodeId> {
        self.hops.iter().map(|hop| hop.node).collect()
    }

    /// Node where the walk ended
    pub fn final_node(&self) -> Option<NodeId> {
        self.hops.last().map(|hop| hop.node)
    }

    /// Number of visited nodes
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Walk an agent message from `start`, upserting into `tables`
///
/// `tables` is indexed by node id and must cover every node of `topology`.
pub(crate) fn propagate_agent<T, S, K>(
    topology: &T,
    tables: &mut [EventTable],
    ttl_max: u32,
    start: NodeId,
    event_id: EventId,
    selector: &mut S,
    sink: &mut K,
) -> RoutingResult<AgentTrace>
where
    T: NetworkTopology + ?Sized,
    S: NeighborSelector + ?Sized,
    K: TraceSink + ?Sized,
{
    let mut walk = RandomWalk::start(topology, start, ttl_max)?;
    let mut hops = Vec::new();

    while let Some(step) = walk.step(selector)? {
        let message = AgentMessage::new(
            EventRecord::new(event_id, step.jumps, step.next),
            step.ttl,
        );

        let table = tables
            .get_mut(step.node.index())
            .ok_or(WalkError::UnknownNode {
                node: step.node,
                node_count: topology.node_count(),
            })?;
        let outcome = table.upsert(message.record);

        debug!(
            node = %step.node,
            event = %event_id,
            jumps = step.jumps,
            ttl = message.ttl,
            ?outcome,
            "Agent message forwarded"
        );

        let hop = HopTrace {
            phase: Phase::Agent,
            node: step.node,
            event_id,
            jumps: message.record.jumps_to_event,
            next: message.record.next_toward_event,
            ttl: message.ttl,
            table: table.snapshot(),
        };
        trace!(table_size = hop.table.len(), "Table snapshot taken");
        sink.record(&TraceRecord::Hop(hop.clone()));
        hops.push(hop);
    }

    let agent = AgentTrace { event_id, hops };
    info!(
        start = %start,
        end = ?agent.final_node(),
        hops = agent.len(),
        "Agent walk expired"
    );

    Ok(agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{FirstNeighbor, RandomSelector, ScriptedSelector};
    use diffusion_core::{GridBuilder, GridTopology, NullSink, TraceLog};

    fn setup(length: usize, width: usize) -> (GridTopology, Vec<EventTable>) {
        let grid = GridBuilder::new(length, width).build().unwrap();
        let tables = vec![EventTable::new(); grid.node_count()];
        (grid, tables)
    }

    #[test]
    fn test_deposits_breadcrumbs() {
        let (grid, mut tables) = setup(4, 4);
        let mut log = TraceLog::new();

        let agent = propagate_agent(
            &grid,
            &mut tables,
            3,
            NodeId(5),
            EventId(0),
            &mut FirstNeighbor,
            &mut log,
        )
        .unwrap();

        assert_eq!(agent.visited(), vec![NodeId(5), NodeId(1), NodeId(0), NodeId(4)]);

        let expected = [(5, 0, Some(1)), (1, 1, Some(0)), (0, 2, Some(4)), (4, 3, None)];
        for (node, jumps, next) in expected {
            let record = tables[node].get(EventId(0)).unwrap();
            assert_eq!(record.jumps_to_event, jumps);
            assert_eq!(record.next_toward_event, next.map(NodeId));
        }

        let untouched = tables.iter().filter(|t| t.is_empty()).count();
        assert_eq!(untouched, 12);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_revisit_keeps_earlier_record() {
        // 1x2 grid: 0 -> 1 -> 0 -> 1; the second visits carry larger jumps
        let (grid, mut tables) = setup(1, 2);

        let agent = propagate_agent(
            &grid,
            &mut tables,
            3,
            NodeId(0),
            EventId(0),
            &mut FirstNeighbor,
            &mut NullSink,
        )
        .unwrap();

        assert_eq!(agent.len(), 4);
        assert_eq!(tables[0].get(EventId(0)).unwrap().jumps_to_event, 0);
        assert_eq!(tables[1].get(EventId(0)).unwrap().jumps_to_event, 1);

        // Trace snapshots show the retained record, not the hop's own
        assert_eq!(agent.hops[2].jumps, 2);
        assert_eq!(agent.hops[2].table[0].jumps_to_event, 0);
    }

    #[test]
    fn test_trace_matches_hops() {
        let (grid, mut tables) = setup(5, 5);
        let mut log = TraceLog::new();

        let agent = propagate_agent(
            &grid,
            &mut tables,
            15,
            NodeId(12),
            EventId(7),
            &mut RandomSelector::seeded(3),
            &mut log,
        )
        .unwrap();

        assert_eq!(agent.len(), 16);
        let logged: Vec<_> = log.hops(Phase::Agent).cloned().collect();
        assert_eq!(logged, agent.hops);

        for (i, hop) in agent.hops.iter().enumerate() {
            assert_eq!(hop.jumps as usize, i);
            assert_eq!(hop.ttl as usize, 15 - i);
            assert_eq!(hop.event_id, EventId(7));
            if let Some(next) = hop.next {
                assert!(grid.are_connected(hop.node, next));
                assert_eq!(agent.hops[i + 1].node, next);
            }
        }
        assert!(agent.hops.last().unwrap().next.is_none());
    }

    #[test]
    fn test_bad_selector_aborts() {
        let (grid, mut tables) = setup(2, 2);
        let result = propagate_agent(
            &grid,
            &mut tables,
            5,
            NodeId(0),
            EventId(0),
            &mut ScriptedSelector::new(vec![0, 9]),
            &mut NullSink,
        );
        assert!(result.is_err());
        // The first hop was already deposited before the bad pick
        assert!(tables[0].contains(EventId(0)));
    }
}
