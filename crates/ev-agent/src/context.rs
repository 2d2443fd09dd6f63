//! Mutable world state lent to one agent for the duration of its turn.

use ev_core::{Cell, GuidePolicy, SimRng};
use ev_spatial::{Grid, HeatMap};

/// Everything an agent may read or write during its own activation.
///
/// Built by the warehouse immediately before each activation and dropped
/// right after, so no two agents ever hold it at the same time.
pub struct StepContext<'a> {
    pub grid:   &'a mut Grid,
    pub heat:   &'a mut HeatMap,
    pub exits:  &'a [Cell],
    pub policy: GuidePolicy,
    pub rng:    &'a mut SimRng,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(
        grid:   &'a mut Grid,
        heat:   &'a mut HeatMap,
        exits:  &'a [Cell],
        policy: GuidePolicy,
        rng:    &'a mut SimRng,
    ) -> Self {
        Self { grid, heat, exits, policy, rng }
    }

    #[inline]
    pub fn is_exit(&self, cell: Cell) -> bool {
        self.exits.contains(&cell)
    }

    /// The exit closest to `cell` by Chebyshev distance; ties go to the
    /// exit listed first.
    pub fn nearest_exit(&self, cell: Cell) -> Option<Cell> {
        self.exits.iter().copied().min_by_key(|&exit| cell.chebyshev(exit))
    }
}
