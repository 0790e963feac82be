//! Core traits for the diffusion simulator
//!
//! These traits are the seams between the propagation engines and their
//! collaborators: the topology they walk, the randomness that steers them
//! and the sink they report to.

use crate::error::TopologyError;
use crate::trace::TraceRecord;
use crate::types::NodeId;

/// Read-only view of the network structure
///
/// Node ids are dense: every id in `0..node_count()` is a node.
pub trait NetworkTopology {
    /// Number of nodes in the network
    fn node_count(&self) -> usize;

    /// Grid dimensions as `(length, width)`
    fn dimensions(&self) -> (usize, usize);

    /// Ordered neighbor list of a node, `None` if the node does not exist
    fn neighbors(&self, node: NodeId) -> Option<&[NodeId]>;

    /// Check if a node id belongs to this topology
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Check the range, degree and symmetry invariants
    fn validate(&self) -> Result<(), TopologyError> {
        let node_count = self.node_count();
        if node_count == 0 {
            return Err(TopologyError::Empty);
        }

        for index in 0..node_count {
            let node = NodeId(index);
            let neighbors = self.neighbors(node).unwrap_or(&[]);
            if neighbors.is_empty() {
                return Err(TopologyError::Isolated { node });
            }

            for &neighbor in neighbors {
                if !self.contains(neighbor) {
                    return Err(TopologyError::NeighborOutOfRange {
                        node,
                        neighbor,
                        node_count,
                    });
                }
                if neighbor == node {
                    return Err(TopologyError::SelfLoop { node });
                }
                let reverse = self.neighbors(neighbor).unwrap_or(&[]);
                if !reverse.contains(&node) {
                    return Err(TopologyError::Asymmetric { node, neighbor });
                }
            }
        }

        Ok(())
    }
}

/// Source of neighbor picks for a random walk
///
/// Returns an index into `neighbors`. The engines reject indices outside the
/// list instead of trusting the selector.
pub trait NeighborSelector {
    fn pick(&mut self, neighbors: &[NodeId]) -> usize;
}

impl<S: NeighborSelector + ?Sized> NeighborSelector for &mut S {
    fn pick(&mut self, neighbors: &[NodeId]) -> usize {
        (**self).pick(neighbors)
    }
}

/// Write-only consumer of trace records
pub trait TraceSink {
    fn record(&mut self, record: &TraceRecord);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, record: &TraceRecord) {
        (**self).record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ListTopology(Vec<Vec<NodeId>>);

    impl NetworkTopology for ListTopology {
        fn node_count(&self) -> usize {
            self.0.len()
        }

        fn dimensions(&self) -> (usize, usize) {
            (1, self.0.len())
        }

        fn neighbors(&self, node: NodeId) -> Option<&[NodeId]> {
            self.0.get(node.index()).map(Vec::as_slice)
        }
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_valid_line() {
        let topo = ListTopology(vec![ids(&[1]), ids(&[0, 2]), ids(&[1])]);
        assert_eq!(topo.validate(), Ok(()));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(ListTopology(vec![]).validate(), Err(TopologyError::Empty));
    }

    #[test]
    fn test_isolated_rejected() {
        let topo = ListTopology(vec![ids(&[1]), ids(&[0]), ids(&[])]);
        assert_eq!(
            topo.validate(),
            Err(TopologyError::Isolated { node: NodeId(2) })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let topo = ListTopology(vec![ids(&[1]), ids(&[0, 7])]);
        assert_eq!(
            topo.validate(),
            Err(TopologyError::NeighborOutOfRange {
                node: NodeId(1),
                neighbor: NodeId(7),
                node_count: 2,
            })
        );
    }

    #[test]
    fn test_asymmetric_rejected() {
        let topo = ListTopology(vec![ids(&[1, 2]), ids(&[0]), ids(&[1])]);
        assert_eq!(
            topo.validate(),
            Err(TopologyError::Asymmetric {
                node: NodeId(0),
                neighbor: NodeId(2),
            })
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let topo = ListTopology(vec![ids(&[0])]);
        assert_eq!(
            topo.validate(),
            Err(TopologyError::SelfLoop { node: NodeId(0) })
        );
    }
}
