//! Event sensing and sink placement
//!
//! An event happens around a uniformly drawn center node. The center and its
//! in-grid 4-neighbors form the event area; every node of the area senses the
//! event and one of them is drawn to emit the agent message.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use diffusion_core::{GridTopology, NetworkTopology, NodeId};

/// Where an event was sensed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensing {
    /// Center of the event area
    pub center: NodeId,
    /// Nodes that sensed the event, in up, left, center, right, down order
    pub area: Vec<NodeId>,
    /// Node that emits the agent message
    pub origin: NodeId,
}

/// Event area around `center`: up, left, center, right, down, clipped at the edges
pub fn event_area(grid: &GridTopology, center: NodeId) -> Vec<NodeId> {
    let (row, col) = center.coordinates(grid.width());

    let up = row.checked_sub(1).and_then(|r| grid.node_at(r, col));
    let left = col.checked_sub(1).and_then(|c| grid.node_at(row, c));
    let right = grid.node_at(row, col + 1);
    let down = grid.node_at(row + 1, col);

    [up, left, Some(center), right, down]
        .into_iter()
        .flatten()
        .collect()
}

/// Draw an event center and the node that emits the agent message
pub fn sense_event<R: Rng + ?Sized>(grid: &GridTopology, rng: &mut R) -> Sensing {
    let center = NodeId(rng.random_range(0..grid.node_count()));
    let area = event_area(grid, center);
    let origin = area[rng.random_range(0..area.len())];

    debug!(center = %center, ?area, origin = %origin, "Event sensed");
    Sensing {
        center,
        area,
        origin,
    }
}

/// Draw the sink node uniformly from the whole grid
pub fn pick_sink<R: Rng + ?Sized>(grid: &GridTopology, rng: &mut R) -> NodeId {
    NodeId(rng.random_range(0..grid.node_count()))
}
