//! Grid topology for the sensor network
//!
//! Nodes sit on a `length x width` grid and are numbered row-major:
//!
//! ```text
//! 0---1---2---3
//! |   |   |   |
//! 4---5---6---7
//! |   |   |   |
//! 8---9---10--11
//! ```
//!
//! Each node is connected to its up, left, down and right neighbors,
//! clipped at the edges, and its neighbor list keeps exactly that order.

use crate::error::TopologyError;
use crate::traits::NetworkTopology;
use crate::types::NodeId;

/// A rectangular 4-connected grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    length: usize,
    width: usize,
    /// Adjacency lists indexed by node id
    adjacency: Vec<Vec<NodeId>>,
}

impl GridTopology {
    /// Number of rows
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Node at grid coordinates, if inside the grid
    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        if row < self.length && col < self.width {
            Some(NodeId(row * self.width + col))
        } else {
            None
        }
    }

    /// Check if two nodes are directly connected
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a)
            .map(|neighbors| neighbors.contains(&b))
            .unwrap_or(false)
    }

    /// Get all node ids in ascending order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(NodeId)
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

impl NetworkTopology for GridTopology {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.length, self.width)
    }

    fn neighbors(&self, node: NodeId) -> Option<&[NodeId]> {
        self.adjacency.get(node.index()).map(Vec::as_slice)
    }
}

/// Builder for grid topologies
pub struct GridBuilder {
    length: usize,
    width: usize,
}

impl GridBuilder {
    /// Create a builder for a grid with `length` rows and `width` columns
    pub fn new(length: usize, width: usize) -> Self {
        Self { length, width }
    }

    /// Build the grid
    ///
    /// Fails for grids with fewer than two nodes, since a lone node has no
    /// neighbor to walk to.
    pub fn build(self) -> Result<GridTopology, TopologyError> {
        let Self { length, width } = self;
        let node_count = length
            .checked_mul(width)
            .ok_or(TopologyError::InvalidDimensions { length, width })?;
        if node_count < 2 {
            return Err(TopologyError::InvalidDimensions { length, width });
        }

        let adjacency = (0..node_count)
            .map(|index| grid_neighbors(index, length, width))
            .collect();

        let grid = GridTopology {
            length,
            width,
            adjacency,
        };
        grid.validate()?;
        Ok(grid)
    }
}

/// Neighbors of `index` in up, left, down, right order
fn grid_neighbors(index: usize, length: usize, width: usize) -> Vec<NodeId> {
    let (row, col) = (index / width, index % width);
    let mut neighbors = Vec::with_capacity(4);

    if row > 0 {
        neighbors.push(NodeId(index - width));
    }
    if col > 0 {
        neighbors.push(NodeId(index - 1));
    }
    if row + 1 < length {
        neighbors.push(NodeId(index + width));
    }
    if col + 1 < width {
        neighbors.push(NodeId(index + 1));
    }

    neighbors
}
