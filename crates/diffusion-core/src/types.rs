//! Identifiers and message types
//!
//! Models sensor nodes addressed by row-major index and the event route
//! records that agent messages deposit as they walk the grid.

use serde::{Deserialize, Serialize};

/// Default hop budget of agent and search messages
pub const DEFAULT_TTL: u32 = 15;

/// Default label of the sensed event
pub const DEFAULT_EVENT_ID: EventId = EventId(0);

/// Row-major index of a node in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Raw index into per-node storage
    pub fn index(self) -> usize {
        self.0
    }

    /// Grid coordinates `(row, col)` for a grid of the given width
    pub fn coordinates(self, width: usize) -> (usize, usize) {
        (self.0 / width, self.0 % width)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a sensed phenomenon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a node knows about reaching the region where an event was sensed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Which sensed phenomenon this record describes
    pub event_id: EventId,
    /// Hops the depositing agent message had already traveled (lower is better)
    pub jumps_to_event: u32,
    /// Node the agent message moved to right after depositing this record.
    /// `None` on the last hop of the walk.
    pub next_toward_event: Option<NodeId>,
}

impl EventRecord {
    /// Create a new event record
    pub fn new(event_id: EventId, jumps_to_event: u32, next_toward_event: Option<NodeId>) -> Self {
        Self {
            event_id,
            jumps_to_event,
            next_toward_event,
        }
    }

    /// Whether this record describes a strictly shorter route than `other`
    pub fn is_better_than(&self, other: &EventRecord) -> bool {
        self.jumps_to_event < other.jumps_to_event
    }
}

/// An agent message: the event record it deposits plus its remaining TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// The record deposited at the current node
    pub record: EventRecord,
    /// Remaining hops allowed
    pub ttl: u32,
}

impl AgentMessage {
    /// Wrap a record with the TTL left at the node carrying it
    pub fn new(record: EventRecord, ttl: u32) -> Self {
        Self { record, ttl }
    }

    /// Whether this is the last hop of the walk
    pub fn is_final_hop(&self) -> bool {
        self.ttl == 0
    }
}

/// Render an optional next pointer the way traces show it
pub fn format_next(next: Option<NodeId>) -> String {
    match next {
        Some(node) => node.to_string(),
        None => "none".to_string(),
    }
}
