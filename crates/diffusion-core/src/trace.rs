//! Structured trace records
//!
//! Both propagation engines report every hop, in hop order, to a
//! [`TraceSink`](crate::traits::TraceSink). The search engine closes its
//! stream with a single [`TraceRecord::Outcome`].

use serde::{Deserialize, Serialize};

use crate::traits::TraceSink;
use crate::types::{EventId, EventRecord, NodeId};

/// Which walk produced a trace record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Agent,
    Search,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Agent => write!(f, "agent"),
            Phase::Search => write!(f, "search"),
        }
    }
}

/// One visited node of a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopTrace {
    pub phase: Phase,
    /// Node being visited
    pub node: NodeId,
    pub event_id: EventId,
    /// Hops taken since the walk started
    pub jumps: u32,
    /// Node the walk moves to next, `None` on the final hop
    pub next: Option<NodeId>,
    /// Remaining TTL at this hop
    pub ttl: u32,
    /// Event table of `node` after this hop was processed
    pub table: Vec<EventRecord>,
}

/// Result of a search walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// An intersection node was found; `route` runs from the intersection
    /// back to the sink.
    Found { route: Vec<NodeId> },
    /// TTL expired without a hit; `path` is the walk in visiting order.
    NotFound { path: Vec<NodeId> },
}

impl SearchOutcome {
    /// Whether the event was discovered
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The route (if found) or the visited path (if not)
    pub fn path(&self) -> &[NodeId] {
        match self {
            Self::Found { route } => route,
            Self::NotFound { path } => path,
        }
    }

    /// The intersection node, if one was found
    pub fn intersection(&self) -> Option<NodeId> {
        match self {
            Self::Found { route } => route.first().copied(),
            Self::NotFound { .. } => None,
        }
    }

    /// Hops the search message traveled before stopping
    pub fn hops(&self) -> usize {
        self.path().len().saturating_sub(1)
    }

    /// Split into the `(found, route)` pair
    pub fn into_parts(self) -> (bool, Vec<NodeId>) {
        match self {
            Self::Found { route } => (true, route),
            Self::NotFound { path } => (false, path),
        }
    }
}

/// A single record on the trace stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceRecord {
    Hop(HopTrace),
    Outcome {
        phase: Phase,
        event_id: EventId,
        outcome: SearchOutcome,
    },
}

impl TraceRecord {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Hop(hop) => hop.phase,
            Self::Outcome { phase, .. } => *phase,
        }
    }

    pub fn as_hop(&self) -> Option<&HopTrace> {
        match self {
            Self::Hop(hop) => Some(hop),
            Self::Outcome { .. } => None,
        }
    }
}

/// In-memory trace collector
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    records: Vec<TraceRecord>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Hop records of the given phase, in emission order
    pub fn hops(&self, phase: Phase) -> impl Iterator<Item = &HopTrace> {
        self.records
            .iter()
            .filter_map(TraceRecord::as_hop)
            .filter(move |hop| hop.phase == phase)
    }

    /// The last search outcome recorded, if any
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.records.iter().rev().find_map(|record| match record {
            TraceRecord::Outcome { outcome, .. } => Some(outcome),
            TraceRecord::Hop(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn into_records(self) -> Vec<TraceRecord> {
        self.records
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, record: &TraceRecord) {
        self.records.push(record.clone());
    }
}

/// Sink that discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _record: &TraceRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(phase: Phase, node: usize) -> TraceRecord {
        TraceRecord::Hop(HopTrace {
            phase,
            node: NodeId(node),
            event_id: EventId(0),
            jumps: 0,
            next: None,
            ttl: 0,
            table: Vec::new(),
        })
    }

    #[test]
    fn test_outcome_accessors() {
        let found = SearchOutcome::Found {
            route: vec![NodeId(9), NodeId(5), NodeId(4)],
        };
        assert!(found.is_found());
        assert_eq!(found.intersection(), Some(NodeId(9)));
        assert_eq!(found.hops(), 2);

        let missed = SearchOutcome::NotFound {
            path: vec![NodeId(4)],
        };
        assert!(!missed.is_found());
        assert_eq!(missed.intersection(), None);
        assert_eq!(missed.hops(), 0);
        assert_eq!(missed.into_parts(), (false, vec![NodeId(4)]));
    }

    #[test]
    fn test_trace_log_filters_by_phase() {
        let mut log = TraceLog::new();
        log.record(&hop(Phase::Agent, 1));
        log.record(&hop(Phase::Search, 2));
        log.record(&hop(Phase::Agent, 3));
        log.record(&TraceRecord::Outcome {
            phase: Phase::Search,
            event_id: EventId(0),
            outcome: SearchOutcome::NotFound { path: vec![NodeId(2)] },
        });

        let agent_nodes: Vec<_> = log.hops(Phase::Agent).map(|h| h.node).collect();
        assert_eq!(agent_nodes, vec![NodeId(1), NodeId(3)]);
        assert_eq!(log.hops(Phase::Search).count(), 1);
        assert!(!log.outcome().unwrap().is_found());
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_outcome_record_json_shape() {
        let record = TraceRecord::Outcome {
            phase: Phase::Search,
            event_id: EventId(0),
            outcome: SearchOutcome::Found {
                route: vec![NodeId(4)],
            },
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"outcome","phase":"search","event_id":0,"outcome":{"status":"found","route":[4]}}"#
        );
    }
}
