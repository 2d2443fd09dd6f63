//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The whole run draws from one `SmallRng` seeded by `ScenarioConfig::seed`.
//! The simulation is strictly single-threaded and every random decision
//! (empty-cell lookup, victim wandering, heat-weighted choice, activation
//! shuffle) happens in a fixed program order, so the same seed and the same
//! configuration always produce the same sequence of snapshots.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Simulation-level RNG, owned by the warehouse and lent to each agent
/// during its turn.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }

    /// Draw an index with probability proportional to `weights[i]`.
    ///
    /// Returns `None` for an empty slice or when no weight is positive.
    pub fn choose_weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.0))
    }
}
