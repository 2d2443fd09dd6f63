//! Fluent builder for constructing a [`Warehouse`].

use ev_agent::Population;
use ev_core::{Cell, ScenarioConfig, SimRng};
use ev_spatial::{Grid, HeatMap};

use crate::{SimError, SimResult, Warehouse};

/// Fluent builder for [`Warehouse`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                    |
/// |---------------------------|--------------------------------------------|
/// | `.victim_positions(v)`    | Uniformly random empty cells               |
/// | `.rescuer_positions(v)`   | All on the primary (last) exit             |
/// | `.visibility_radii(v)`    | `config.visibility_for(i)` per rescuer     |
///
/// # Example
///
/// ```rust,ignore
/// let warehouse = WarehouseBuilder::new(config)
///     .victim_positions(vec![Cell::new(0, 0)])
///     .visibility_radii(vec![9])
///     .build()?;
/// ```
pub struct WarehouseBuilder {
    config:            ScenarioConfig,
    victim_positions:  Option<Vec<Cell>>,
    rescuer_positions: Option<Vec<Cell>>,
    visibility_radii:  Option<Vec<u32>>,
}

impl WarehouseBuilder {
    pub fn new(config: ScenarioConfig) -> Self {
        Self {
            config,
            victim_positions:  None,
            rescuer_positions: None,
            visibility_radii:  None,
        }
    }

    /// Fixed starting cells for the victims (must be length `config.victims`,
    /// no cell listed twice).
    pub fn victim_positions(mut self, cells: Vec<Cell>) -> Self {
        self.victim_positions = Some(cells);
        self
    }

    /// Fixed starting cells for the rescuers (must be length `config.rescuers`).
    pub fn rescuer_positions(mut self, cells: Vec<Cell>) -> Self {
        self.rescuer_positions = Some(cells);
        self
    }

    /// Per-rescuer visibility radius (must be length `config.rescuers`).
    pub fn visibility_radii(mut self, radii: Vec<u32>) -> Self {
        self.visibility_radii = Some(radii);
        self
    }

    /// Validate inputs, lay out the floor, place every agent, and return a
    /// ready-to-step [`Warehouse`].
    ///
    /// Fails with [`ev_spatial::SpatialError::GridFull`] when there are more
    /// victims than free cells.
    pub fn build(self) -> SimResult<Warehouse> {
        let config = self.config;
        config.validate()?;

        let victim_cells  = check_len(self.victim_positions, config.victims, "victim positions")?;
        let rescuer_cells = check_len(self.rescuer_positions, config.rescuers, "rescuer positions")?;
        let visibilities = match check_len(self.visibility_radii, config.rescuers, "visibility radii")? {
            Some(radii) => {
                if radii.contains(&0) {
                    return Err(SimError::Config("visibility radius must be positive".into()));
                }
                radii
            }
            None => (0..config.rescuers).map(|i| config.visibility_for(i)).collect(),
        };
        if let Some(cells) = &victim_cells {
            let mut sorted = cells.clone();
            sorted.sort_unstable();
            if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(SimError::Config(format!("two victims placed on {}", pair[0])));
            }
        }
        let primary = config
            .primary_exit()
            .ok_or_else(|| SimError::Config("scenario has no exit".into()))?;

        let mut grid = Grid::new(config.width, config.height);
        let mut heat = HeatMap::new(config.width, config.height);
        if let Some(origin) = config.heat_origin {
            heat.increment(origin)?;
        }
        let mut rng = SimRng::new(config.seed);
        let population = Population::new(config.victims, &visibilities);

        // ── Victims ───────────────────────────────────────────────────────
        for (i, victim) in population.victims.iter().enumerate() {
            let cell = match &victim_cells {
                Some(cells) => cells[i],
                None        => grid.find_empty_cell(&mut rng)?,
            };
            grid.place_agent(victim.id, cell)?;
        }

        // ── Rescuers ──────────────────────────────────────────────────────
        for (i, rescuer) in population.rescuers.iter().enumerate() {
            let cell = rescuer_cells.as_ref().map_or(primary, |cells| cells[i]);
            grid.place_agent(rescuer.id, cell)?;
        }

        tracing::info!(
            width    = config.width,
            height   = config.height,
            victims  = config.victims,
            rescuers = config.rescuers,
            exits    = config.exits.len(),
            seed     = config.seed,
            "warehouse initialized",
        );

        Ok(Warehouse::from_parts(config, grid, heat, population, rng))
    }
}

fn check_len<T>(values: Option<Vec<T>>, expected: usize, what: &'static str) -> SimResult<Option<Vec<T>>> {
    match values {
        Some(v) if v.len() != expected => Err(SimError::AgentCountMismatch {
            expected,
            got: v.len(),
            what,
        }),
        other => Ok(other),
    }
}

