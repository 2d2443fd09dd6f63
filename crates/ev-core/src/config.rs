//! Scenario configuration.
//!
//! Loaded from TOML by the application (see `demos/warehouse`) or built in
//! code; every field has a default, so a file only needs the keys it changes:
//!
//! ```toml
//! width   = 20
//! height  = 12
//! exits   = [[19, 11]]
//! victims = 8
//! seed    = 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Cell, EvError, EvResult};

/// How a guiding rescuer walks its victim out.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidePolicy {
    /// Step `+1` column and `+1` row, clamped at the walls, until an exit is
    /// reached.  Requires the bottom-right corner to be an exit.
    #[default]
    Corner,
    /// Step one king-move toward the closest exit (Chebyshev distance, ties
    /// resolved by configuration order).
    NearestExit,
}

/// Top-level scenario configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Grid columns.
    pub width: u32,

    /// Grid rows.
    pub height: u32,

    /// Exit cells.  The last one is the primary exit where rescuers spawn.
    pub exits: Vec<Cell>,

    /// Number of rescue agents.
    pub rescuers: usize,

    /// Number of victim agents.
    pub victims: usize,

    /// Visibility radius of ordinary rescuers.
    pub visibility_radius: u32,

    /// Visibility radius of the first `wide_visibility_count` rescuers.
    pub wide_visibility_radius: u32,

    pub wide_visibility_count: usize,

    /// Cell whose heat counter starts at 1 instead of 0.
    pub heat_origin: Option<Cell>,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Upper bound on ticks for `Warehouse::run`.
    pub max_ticks: u64,

    pub guide_policy: GuidePolicy,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let (width, height) = (50, 30);
        Self {
            width,
            height,
            exits: vec![Cell::new(width - 2, height - 1), Cell::new(width - 1, height - 1)],
            rescuers: 10,
            victims: 25,
            visibility_radius: 1,
            wide_visibility_radius: 2,
            wide_visibility_count: 3,
            heat_origin: Some(Cell::new(0, 0)),
            seed: 42,
            max_ticks: 100,
            guide_policy: GuidePolicy::Corner,
        }
    }
}

impl ScenarioConfig {
    /// Parse a TOML document.  Missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> EvResult<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> EvResult<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// Where rescuers are placed at initialization.
    pub fn primary_exit(&self) -> Option<Cell> {
        self.exits.last().copied()
    }

    /// The bottom-right cell `(width-1, height-1)`.
    pub fn corner(&self) -> Cell {
        Cell::new(self.width.saturating_sub(1), self.height.saturating_sub(1))
    }

    /// Visibility radius for the rescuer with zero-based index `i`.
    pub fn visibility_for(&self, i: usize) -> u32 {
        if i < self.wide_visibility_count {
            self.wide_visibility_radius
        } else {
            self.visibility_radius
        }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> EvResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EvError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.exits.is_empty() {
            return Err(EvError::Config("at least one exit cell is required".into()));
        }
        if let Some(bad) = self.exits.iter().find(|&&e| !self.contains(e)) {
            return Err(EvError::Config(format!(
                "exit {bad} is outside the {}x{} grid",
                self.width, self.height
            )));
        }
        if let Some(origin) = self.heat_origin {
            if !self.contains(origin) {
                return Err(EvError::Config(format!("heat origin {origin} is outside the grid")));
            }
        }
        if self.visibility_radius == 0
            || (self.wide_visibility_count > 0 && self.wide_visibility_radius == 0)
        {
            return Err(EvError::Config("visibility radius must be positive".into()));
        }
        if self.guide_policy == GuidePolicy::Corner && !self.exits.contains(&self.corner()) {
            return Err(EvError::Config(format!(
                "corner guide policy needs an exit at {}",
                self.corner()
            )));
        }
        Ok(())
    }
}
