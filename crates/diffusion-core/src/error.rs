//! Error types for the diffusion simulator

use thiserror::Error;

use crate::types::NodeId;

/// Violations of the topology contract
///
/// Any of these is a fatal precondition failure: no walk is attempted on a
/// topology that reports one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("Topology has no nodes")]
    Empty,

    #[error("Invalid grid dimensions {length}x{width}")]
    InvalidDimensions { length: usize, width: usize },

    #[error("Node {node} has no neighbors")]
    Isolated { node: NodeId },

    #[error("Node {node} lists neighbor {neighbor} outside 0..{node_count}")]
    NeighborOutOfRange {
        node: NodeId,
        neighbor: NodeId,
        node_count: usize,
    },

    #[error("Node {node} lists itself as a neighbor")]
    SelfLoop { node: NodeId },

    #[error("Node {node} lists {neighbor} as a neighbor but not the reverse")]
    Asymmetric { node: NodeId, neighbor: NodeId },
}

/// Errors raised while driving a random walk
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("Node {node} is not part of a {node_count}-node topology")]
    UnknownNode { node: NodeId, node_count: usize },

    #[error("Selector picked index {index} at node {node} which has {degree} neighbors")]
    SelectorOutOfRange {
        node: NodeId,
        index: usize,
        degree: usize,
    },

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}
