//! Search message propagation
//!
//! A search message walks away from the sink and checks each visited node's
//! event table before moving on. The first node that knows the event is the
//! intersection; the search path is then reversed so it leads from the
//! intersection back to the sink. Tables are only read here.

use tracing::{debug, info};

use diffusion_core::{
    EventId, HopTrace, NeighborSelector, NetworkTopology, NodeId, Phase, SearchOutcome,
    TraceRecord, TraceSink, WalkError,
};

use crate::error::RoutingResult;
use crate::table::EventTable;
use crate::walk::{RandomWalk, WalkState};

/// Walk a search message from `sink_node` looking for `event_id`
pub(crate) fn propagate_search<T, S, K>(
    topology: &T,
    tables: &[EventTable],
    ttl_max: u32,
    sink_node: NodeId,
    event_id: EventId,
    selector: &mut S,
    sink: &mut K,
) -> RoutingResult<SearchOutcome>
where
    T: NetworkTopology + ?Sized,
    S: NeighborSelector + ?Sized,
    K: TraceSink + ?Sized,
{
    let mut walk = RandomWalk::start(topology, sink_node, ttl_max)?;
    let mut path = Vec::new();

    while let Some(step) = walk.step(selector)? {
        let table = tables.get(step.node.index()).ok_or(WalkError::UnknownNode {
            node: step.node,
            node_count: topology.node_count(),
        })?;

        path.push(step.node);
        let hit = table.contains(event_id);

        debug!(
            node = %step.node,
            event = %event_id,
            jumps = step.jumps,
            ttl = step.ttl,
            hit,
            "Search message forwarded"
        );

        sink.record(&TraceRecord::Hop(HopTrace {
            phase: Phase::Search,
            node: step.node,
            event_id,
            jumps: step.jumps,
            next: step.next,
            ttl: step.ttl,
            table: table.snapshot(),
        }));

        if hit {
            walk.halt();
        }
    }

    let outcome = match walk.state() {
        WalkState::Hit => {
            path.reverse();
            info!(
                intersection = ?path.first(),
                hops = path.len() - 1,
                "Intersection found, routing event back to sink"
            );
            SearchOutcome::Found { route: path }
        }
        _ => {
            info!(sink = %sink_node, hops = path.len(), "Search expired without intersection");
            SearchOutcome::NotFound { path }
        }
    };

    sink.record(&TraceRecord::Outcome {
        phase: Phase::Search,
        event_id,
        outcome: outcome.clone(),
    });

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{FirstNeighbor, ScriptedSelector};
    use diffusion_core::{EventRecord, GridBuilder, GridTopology, TraceLog};

    fn setup(length: usize, width: usize) -> (GridTopology, Vec<EventTable>) {
        let grid = GridBuilder::new(length, width).build().unwrap();
        let tables = vec![EventTable::new(); grid.node_count()];
        (grid, tables)
    }

    fn seed(tables: &mut [EventTable], node: usize, event: u32) {
        tables[node].upsert(EventRecord::new(EventId(event), 1, None));
    }

    #[test]
    fn test_hit_at_sink() {
        let (grid, mut tables) = setup(4, 4);
        seed(&mut tables, 4, 0);
        let mut log = TraceLog::new();

        let outcome = propagate_search(
            &grid,
            &tables,
            15,
            NodeId(4),
            EventId(0),
            &mut FirstNeighbor,
            &mut log,
        )
        .unwrap();

        assert_eq!(outcome, SearchOutcome::Found { route: vec![NodeId(4)] });
        assert_eq!(outcome.hops(), 0);
        assert_eq!(log.hops(Phase::Search).count(), 1);
        assert_eq!(log.hops(Phase::Search).next().unwrap().ttl, 15);
    }

    #[test]
    fn test_path_is_reversed() {
        // Scripted picks from 5: 5 -> 6 -> 7 -> 11 on a 4x4 grid
        //   5: [1, 4, 9, 6] pick 3 -> 6
        //   6: [2, 5, 10, 7] pick 3 -> 7
        //   7: [3, 6, 11] pick 2 -> 11
        let (grid, mut tables) = setup(4, 4);
        seed(&mut tables, 11, 2);
        let mut selector = ScriptedSelector::new(vec![3, 3, 2, 0]);

        let outcome = propagate_search(
            &grid,
            &tables,
            15,
            NodeId(5),
            EventId(2),
            &mut selector,
            &mut TraceLog::new(),
        )
        .unwrap();

        assert_eq!(
            outcome.into_parts(),
            (true, vec![NodeId(11), NodeId(7), NodeId(6), NodeId(5)])
        );
        // One pick per visited node, including the intersection
        assert_eq!(selector.picks(), 4);
    }

    #[test]
    fn test_hit_on_final_hop() {
        // 4x4, first neighbor from 5: 5 -> 1 -> 0 -> 4, TTL runs out at 4
        let (grid, mut tables) = setup(4, 4);
        seed(&mut tables, 4, 0);

        let outcome = propagate_search(
            &grid,
            &tables,
            3,
            NodeId(5),
            EventId(0),
            &mut FirstNeighbor,
            &mut TraceLog::new(),
        )
        .unwrap();

        assert_eq!(
            outcome.into_parts(),
            (true, vec![NodeId(4), NodeId(0), NodeId(1), NodeId(5)])
        );
    }

    #[test]
    fn test_miss_visits_ttl_plus_one() {
        let (grid, tables) = setup(4, 4);
        let mut log = TraceLog::new();

        let outcome = propagate_search(
            &grid,
            &tables,
            15,
            NodeId(10),
            EventId(0),
            &mut FirstNeighbor,
            &mut log,
        )
        .unwrap();

        assert!(!outcome.is_found());
        assert_eq!(outcome.path().len(), 16);
        assert_eq!(outcome.path()[0], NodeId(10));
        assert_eq!(log.outcome(), Some(&outcome));
        assert_eq!(log.len(), 17);
    }

    #[test]
    fn test_other_event_is_a_miss() {
        let (grid, mut tables) = setup(3, 3);
        for node in 0..9 {
            seed(&mut tables, node, 1);
        }

        let outcome = propagate_search(
            &grid,
            &tables,
            4,
            NodeId(0),
            EventId(0),
            &mut FirstNeighbor,
            &mut TraceLog::new(),
        )
        .unwrap();

        assert!(!outcome.into_parts().0);
    }

    #[test]
    fn test_search_does_not_write() {
        let (grid, mut tables) = setup(3, 3);
        seed(&mut tables, 8, 0);
        let before = tables.clone();

        propagate_search(
            &grid,
            &tables,
            15,
            NodeId(0),
            EventId(0),
            &mut FirstNeighbor,
            &mut TraceLog::new(),
        )
        .unwrap();

        assert_eq!(tables, before);
    }
}
