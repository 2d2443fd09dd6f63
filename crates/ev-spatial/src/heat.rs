//! Per-cell search-visit counters and the least-visited-biased choice that
//! steers searching rescuers toward unexplored floor.

use ev_core::{Cell, SimRng};

use crate::{SpatialError, SpatialResult};

/// `height × width` matrix of visit counts, stored row-major.
///
/// Counters only ever go up; nothing resets them during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatMap {
    width:  u32,
    height: u32,
    counts: Vec<u64>,
}

impl HeatMap {
    /// All-zero heat map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            counts: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bump the counter for `cell` by one and return the new value.
    pub fn increment(&mut self, cell: Cell) -> SpatialResult<u64> {
        if cell.x >= self.width || cell.y >= self.height {
            return Err(SpatialError::OutOfBounds {
                cell,
                width:  self.width,
                height: self.height,
            });
        }
        let slot = &mut self.counts[cell.y as usize * self.width as usize + cell.x as usize];
        *slot += 1;
        Ok(*slot)
    }

    /// Current counter for `cell`; `0` outside the grid.
    pub fn value_at(&self, cell: Cell) -> u64 {
        if cell.x >= self.width || cell.y >= self.height {
            return 0;
        }
        self.counts[cell.y as usize * self.width as usize + cell.x as usize]
    }

    /// Sum over all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The matrix one row at a time (`height` slices of `width` counts).
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.counts.chunks(self.width.max(1) as usize)
    }

    /// Pick one of `candidates`, favouring the least-visited ones.
    ///
    /// Candidates are scored by their current counter and sorted ascending
    /// (stable, so equal scores keep the caller's order) before the
    /// weighted draw in [`least_visited_choice`].  Returns `None` for an
    /// empty candidate list.
    pub fn weighted_least_visited_choice(&self, candidates: &[Cell], rng: &mut SimRng) -> Option<Cell> {
        let mut scored: Vec<(u64, Cell)> = candidates
            .iter()
            .map(|&cell| (self.value_at(cell), cell))
            .collect();
        scored.sort_by_key(|&(heat, _)| heat);
        least_visited_choice(&scored, rng)
    }
}

/// Selection weight for a cell visited `count` times: `1 / count`, with an
/// unvisited cell weighing the same as a once-visited one.
#[inline]
pub fn inverse_heat_weight(count: u64) -> f64 {
    if count == 0 { 1.0 } else { 1.0 / count as f64 }
}

/// Draw one cell from `(count, cell)` pairs with probability proportional to
/// [`inverse_heat_weight`].  Heavily visited cells stay possible, just rarer.
pub fn least_visited_choice(scored: &[(u64, Cell)], rng: &mut SimRng) -> Option<Cell> {
    let weights: Vec<f64> = scored.iter().map(|&(count, _)| inverse_heat_weight(count)).collect();
    rng.choose_weighted_index(&weights).map(|i| scored[i].1)
}
