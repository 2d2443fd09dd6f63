//! Integer grid coordinates.
//!
//! `x` is the column (`0..width`), `y` the row (`0..height`).  Row `height-1`
//! is the "bottom" of the warehouse, where the exits conventionally sit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of the warehouse floor.
///
/// Serializes as a two-element array `[x, y]`, which is also how exits are
/// written in scenario TOML files (`exits = [[48, 29], [49, 29]]`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// King-move (Chebyshev) distance.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The cell one king-move closer to `target` (or `self` if already there).
    pub fn step_toward(self, target: Cell) -> Cell {
        Cell {
            x: step_axis(self.x, target.x),
            y: step_axis(self.y, target.y),
        }
    }
}

fn step_axis(from: u32, to: u32) -> u32 {
    match from.cmp(&to) {
        std::cmp::Ordering::Less    => from + 1,
        std::cmp::Ordering::Greater => from - 1,
        std::cmp::Ordering::Equal   => from,
    }
}

impl From<(u32, u32)> for Cell {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Cell { x, y }
    }
}

impl From<Cell> for (u32, u32) {
    #[inline]
    fn from(c: Cell) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
