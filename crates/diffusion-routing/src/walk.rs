//! TTL-bounded random walk
//!
//! Both propagation engines share the same walk mechanics. A walk starts in
//! [`WalkState::Walking`] with `ttl = ttl_max` and, per visited node:
//!
//! 1. asks the selector for one of the node's neighbors (memoryless: the
//!    previous node is not excluded, so walks may bounce back and forth),
//! 2. yields a [`WalkStep`] whose `next` is that neighbor, or `None` when the
//!    TTL is already zero,
//! 3. moves on with one hop more and one TTL less.
//!
//! The walk expires after yielding the `ttl = 0` step, so it visits exactly
//! `ttl_max + 1` nodes unless it is halted earlier.

use diffusion_core::{NeighborSelector, NetworkTopology, NodeId, TopologyError, WalkError};

/// Lifecycle of a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Still visiting nodes
    Walking,
    /// Stopped early because the walk found what it was looking for
    Hit,
    /// TTL exhausted
    Expired,
}

impl WalkState {
    /// Whether no further hops will occur
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Walking)
    }
}

/// One visited node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    /// Node being visited
    pub node: NodeId,
    /// Hops taken before reaching `node`
    pub jumps: u32,
    /// TTL remaining at `node`
    pub ttl: u32,
    /// Where the walk goes next, `None` on the final hop
    pub next: Option<NodeId>,
}

/// A random walk over a topology
#[derive(Debug)]
pub struct RandomWalk<'a, T: NetworkTopology + ?Sized> {
    topology: &'a T,
    current: NodeId,
    ttl_max: u32,
    jumps: u32,
    state: WalkState,
}

impl<'a, T: NetworkTopology + ?Sized> RandomWalk<'a, T> {
    /// Start a walk at `start`
    pub fn start(topology: &'a T, start: NodeId, ttl_max: u32) -> Result<Self, WalkError> {
        if !topology.contains(start) {
            return Err(WalkError::UnknownNode {
                node: start,
                node_count: topology.node_count(),
            });
        }

        Ok(Self {
            topology,
            current: start,
            ttl_max,
            jumps: 0,
            state: WalkState::Walking,
        })
    }

    /// Current state of the walk
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Node the next call to [`step`](Self::step) will visit
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Hops taken so far
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    /// Visit the current node and pick the next one
    ///
    /// Returns `Ok(None)` once the walk is terminal.
    pub fn step<S>(&mut self, selector: &mut S) -> Result<Option<WalkStep>, WalkError>
    where
        S: NeighborSelector + ?Sized,
    {
        if self.state.is_terminal() {
            return Ok(None);
        }

        let node = self.current;
        let ttl = self.ttl_max - self.jumps;
        let neighbors = self.topology.neighbors(node).unwrap_or(&[]);
        if neighbors.is_empty() {
            return Err(TopologyError::Isolated { node }.into());
        }

        let index = selector.pick(neighbors);
        let chosen = *neighbors
            .get(index)
            .ok_or(WalkError::SelectorOutOfRange {
                node,
                index,
                degree: neighbors.len(),
            })?;

        let next = if ttl == 0 { None } else { Some(chosen) };
        let step = WalkStep {
            node,
            jumps: self.jumps,
            ttl,
            next,
        };

        match next {
            Some(next) => {
                self.current = next;
                self.jumps += 1;
            }
            None => self.state = WalkState::Expired,
        }

        Ok(Some(step))
    }

    /// Stop the walk after the step just taken
    ///
    /// A hit on the `ttl = 0` hop still counts, so this overrides
    /// [`WalkState::Expired`].
    pub fn halt(&mut self) {
        self.state = WalkState::Hit;
    }
}
