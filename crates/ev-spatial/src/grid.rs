//! Bounded, multi-occupancy grid.
//!
//! # Layout
//!
//! Occupancy is stored row-major: the occupants of `Cell { x, y }` live in
//! `cells[y * width + x]`.  A reverse map `AgentId → Cell` makes `move_agent`
//! and `remove_agent` O(occupants-of-one-cell) instead of a full scan.
//!
//! Occupant lists keep insertion order, so iteration over a cell is
//! deterministic and seeded runs reproduce exactly.

use rustc_hash::FxHashMap;

use ev_core::{AgentId, Cell, SimRng};

use crate::{SpatialError, SpatialResult};

/// The warehouse floor.  Any number of agents may share a cell.
#[derive(Clone, Debug)]
pub struct Grid {
    width:     u32,
    height:    u32,
    cells:     Vec<Vec<AgentId>>,
    positions: FxHashMap<AgentId, Cell>,
}

impl Grid {
    /// Create an empty `width × height` grid.  The size never changes.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width as usize * height as usize],
            positions: FxHashMap::default(),
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

    /// Number of agents currently on the grid.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Put `agent` on `cell`.  An agent that is already on the grid is
    /// relocated rather than duplicated.
    pub fn place_agent(&mut self, agent: AgentId, cell: Cell) -> SpatialResult<()> {
        let idx = self.index_of(cell)?;
        if let Some(old) = self.positions.get(&agent).copied() {
            self.detach(agent, old);
        }
        self.cells[idx].push(agent);
        self.positions.insert(agent, cell);
        Ok(())
    }

    /// Move a placed agent to `cell`.
    ///
    /// The target is validated before anything is touched, so a failed move
    /// leaves the grid unchanged.
    pub fn move_agent(&mut self, agent: AgentId, cell: Cell) -> SpatialResult<()> {
        let idx = self.index_of(cell)?;
        let old = self
            .positions
            .get(&agent)
            .copied()
            .ok_or(SpatialError::AgentNotPlaced(agent))?;
        if old == cell {
            return Ok(());
        }
        self.detach(agent, old);
        self.cells[idx].push(agent);
        self.positions.insert(agent, cell);
        Ok(())
    }

    /// Take `agent` off the grid, returning the cell it was on.
    ///
    /// Removing an agent that is not on the grid is a no-op.
    pub fn remove_agent(&mut self, agent: AgentId) -> Option<Cell> {
        let cell = self.positions.remove(&agent)?;
        self.detach(agent, cell);
        Some(cell)
    }

    /// Current cell of `agent`, or `None` if it is not on the grid.
    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(&agent).copied()
    }

    /// Agents on `cell`, in arrival order.  Empty for out-of-bounds cells.
    pub fn occupants(&self, cell: Cell) -> &[AgentId] {
        match self.index_of(cell) {
            Ok(idx) => &self.cells[idx],
            Err(_)  => &[],
        }
    }

    #[inline]
    pub fn is_cell_empty(&self, cell: Cell) -> bool {
        self.occupants(cell).is_empty()
    }

    // ── Neighborhood queries ──────────────────────────────────────────────

    /// In-bounds cells within Chebyshev distance `radius` of `center`.
    ///
    /// The returned iterator is lazy and finite; clone it (or call this
    /// again) to walk the same neighborhood twice.
    pub fn neighborhood(&self, center: Cell, radius: u32, include_center: bool) -> Neighborhood {
        Neighborhood::new(center, radius, include_center, self.width, self.height)
    }

    /// All agents on the cells of `neighborhood(center, radius, include_center)`.
    pub fn neighbor_agents(&self, center: Cell, radius: u32, include_center: bool) -> Vec<AgentId> {
        self.neighborhood(center, radius, include_center)
            .flat_map(|cell| self.occupants(cell).iter().copied())
            .collect()
    }

    /// A uniformly random cell with no occupants.
    pub fn find_empty_cell(&self, rng: &mut SimRng) -> SpatialResult<Cell> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, occupants)| occupants.is_empty())
            .map(|(i, _)| i)
            .collect();
        rng.choose(&empty)
            .map(|&i| self.cell_at(i))
            .ok_or(SpatialError::GridFull { width: self.width, height: self.height })
    }

    /// Every cell with its occupants, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, &[AgentId])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, occupants)| (self.cell_at(i), occupants.as_slice()))
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn index_of(&self, cell: Cell) -> SpatialResult<usize> {
        if !self.contains(cell) {
            return Err(SpatialError::OutOfBounds {
                cell,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(cell.y as usize * self.width as usize + cell.x as usize)
    }

    fn cell_at(&self, idx: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((idx % w) as u32, (idx / w) as u32)
    }

    fn detach(&mut self, agent: AgentId, cell: Cell) {
        if let Ok(idx) = self.index_of(cell) {
            self.cells[idx].retain(|&a| a != agent);
        }
    }
}

// ── Neighborhood ──────────────────────────────────────────────────────────────

/// Lazy walk over a clamped Moore neighborhood, column by column.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    center:         Cell,
    include_center: bool,
    x_end:          u32,
    y_start:        u32,
    y_end:          u32,
    x:              u32,
    y:              u32,
}

impl Neighborhood {
    fn new(center: Cell, radius: u32, include_center: bool, width: u32, height: u32) -> Self {
        // Half-open ranges, clamped to the grid; u64 keeps `c + r + 1` from
        // overflowing for huge radii.
        let end = |c: u32, limit: u32| (c as u64 + radius as u64 + 1).min(limit as u64) as u32;
        let y_start = center.y.saturating_sub(radius);
        Self {
            center,
            include_center,
            x_end: end(center.x, width),
            y_start,
            y_end: end(center.y, height),
            x: center.x.saturating_sub(radius),
            y: y_start,
        }
    }
}

impl Iterator for Neighborhood {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.x < self.x_end {
            if self.y >= self.y_end {
                self.x += 1;
                self.y = self.y_start;
                continue;
            }
            let cell = Cell::new(self.x, self.y);
            self.y += 1;
            if cell == self.center && !self.include_center {
                continue;
            }
            return Some(cell);
        }
        None
    }
}
