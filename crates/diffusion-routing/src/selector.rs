//! Neighbor selectors
//!
//! A run holds one selector for its whole duration, so a seeded
//! [`RandomSelector`] replays the same walks every time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use diffusion_core::{NeighborSelector, NodeId};

/// Uniform random neighbor picks backed by a single RNG
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seed from the operating system (non-deterministic)
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic selector for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, from the OS otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }

    /// The underlying RNG, for other draws that must share the same stream
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl NeighborSelector for RandomSelector {
    fn pick(&mut self, neighbors: &[NodeId]) -> usize {
        if neighbors.is_empty() {
            // Rejected by the walk; never sample from an empty range
            return 0;
        }
        self.rng.random_range(0..neighbors.len())
    }
}

/// Always picks the first neighbor in list order
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNeighbor;

impl NeighborSelector for FirstNeighbor {
    fn pick(&mut self, _neighbors: &[NodeId]) -> usize {
        0
    }
}

/// Replays a fixed sequence of indices, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSelector {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedSelector {
    /// Create a selector from a script; an empty script always picks 0
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }

    /// Number of picks served so far
    pub fn picks(&self) -> usize {
        self.position
    }
}

impl NeighborSelector for ScriptedSelector {
    fn pick(&mut self, _neighbors: &[NodeId]) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let index = self.script[self.position % self.script.len()];
        self.position += 1;
        index
    }
}
