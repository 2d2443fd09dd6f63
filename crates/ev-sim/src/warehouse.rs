//! The `Warehouse` struct and its tick loop.

use ev_agent::{
    AgentKind, AgentSlot, Population, RescueAgent, RescuerMode, RescuerOutcome, StepContext,
    VictimAgent, VictimOutcome,
};
use ev_core::{AgentId, Cell, ScenarioConfig, SimRng, Tick};
use ev_spatial::{Grid, HeatMap};

use crate::{
    AgentSnapshot, NoopObserver, RunSummary, SimError, SimObserver, SimResult, TickSummary,
    WarehouseBuilder,
};

/// What one activation did, tagged by agent kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Activation {
    Victim(VictimOutcome),
    Rescuer(RescuerOutcome),
}

/// The evacuation scenario: floor, heat map, agents, and the RNG that drives
/// them.
///
/// Create via [`Warehouse::initialize`] or [`WarehouseBuilder`].
pub struct Warehouse {
    config:     ScenarioConfig,
    grid:       Grid,
    heat:       HeatMap,
    population: Population,
    rng:        SimRng,
    /// Activation order, reshuffled in place every tick.
    order:      Vec<AgentId>,
    /// Ticks completed so far.
    tick:       Tick,
    /// Tick that failed part-way; set once, never cleared.
    halted_at:  Option<Tick>,
}

impl Warehouse {
    /// Build the scenario described by `config` with default placement:
    /// victims on random empty cells, every rescuer on the primary exit.
    pub fn initialize(config: ScenarioConfig) -> SimResult<Self> {
        WarehouseBuilder::new(config).build()
    }

    pub(crate) fn from_parts(
        config:     ScenarioConfig,
        grid:       Grid,
        heat:       HeatMap,
        population: Population,
        rng:        SimRng,
    ) -> Self {
        let order = population.ids();
        Self { config, grid, heat, population, rng, order, tick: Tick::ZERO, halted_at: None }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn heat(&self) -> &HeatMap {
        &self.heat
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn position(&self, id: AgentId) -> Option<Cell> {
        self.grid.position(id)
    }

    pub fn victim(&self, id: AgentId) -> Option<&VictimAgent> {
        self.population.victims.get(id)
    }

    pub fn rescuer(&self, id: AgentId) -> Option<&RescueAgent> {
        self.population.rescuer(id)
    }

    pub fn rescued_count(&self) -> usize {
        self.population.victims.rescued_count()
    }

    pub fn remaining_victims(&self) -> usize {
        self.population.victims.len() - self.rescued_count()
    }

    /// `true` after a tick failed part-way.  A halted warehouse refuses to
    /// step again: agents activated before the failure have already acted,
    /// so the state is no longer a consistent tick boundary.
    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// `true` once every victim is out.
    pub fn is_evacuated(&self) -> bool {
        self.remaining_victims() == 0
    }

    /// One record per agent still in the building, in population order.
    /// Rescued victims are left out entirely.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        let victims = self
            .population
            .victims
            .iter()
            .filter(|v| !v.rescued)
            .filter_map(|v| Some(AgentSnapshot::new(v.id, self.grid.position(v.id)?, AgentKind::Victim)));
        let rescuers = self
            .population
            .rescuers
            .iter()
            .filter_map(|r| Some(AgentSnapshot::new(r.id, self.grid.position(r.id)?, AgentKind::Rescuer)));
        victims.chain(rescuers).collect()
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick and return the resulting snapshot.
    pub fn step(&mut self) -> SimResult<Vec<AgentSnapshot>> {
        self.step_with(&mut NoopObserver)
    }

    /// [`step`][Self::step] with observer callbacks.
    ///
    /// # Errors
    ///
    /// If any activation fails the tick is abandoned: `tick` does not
    /// advance, `on_tick_end` is not called, and the warehouse is halted.
    /// Every later call returns [`SimError::Halted`].
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Vec<AgentSnapshot>> {
        if let Some(tick) = self.halted_at {
            return Err(SimError::Halted { tick });
        }
        let now = self.tick;
        observer.on_tick_start(now);

        let mut order = std::mem::take(&mut self.order);
        self.rng.shuffle(&mut order);

        let mut rescued = Vec::new();
        let mut outcome = Ok(());
        for &id in &order {
            match self.activate(id) {
                Ok(Activation::Victim(VictimOutcome::Rescued(cell))) => rescued.push((id, cell)),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(tick = now.0, agent = %id, error = %e, "tick abandoned, warehouse halted");
                    self.halted_at = Some(now);
                    outcome = Err(e);
                    break;
                }
            }
        }
        self.order = order;
        outcome?;

        for &(victim, cell) in &rescued {
            tracing::debug!(tick = now.0, %victim, %cell, "victim evacuated");
            observer.on_rescue(now, victim, cell);
        }

        let summary = self.tick_summary(now, rescued.len());
        tracing::debug!(
            tick      = now.0,
            rescued   = summary.rescued_total,
            remaining = summary.remaining,
            searching = summary.searching,
            guiding   = summary.guiding,
            "tick complete",
        );
        observer.on_tick_end(now, &summary);

        self.tick = now.next();
        Ok(self.snapshot())
    }

    /// Run one agent's behavior right now, outside the shuffled order.
    ///
    /// The tick loop is built on this; tests use it to stage exact
    /// activation sequences.
    pub fn activate(&mut self, id: AgentId) -> SimResult<Activation> {
        let slot = self.population.slot(id).ok_or(SimError::UnknownAgent(id))?;
        let mut ctx = StepContext::new(
            &mut self.grid,
            &mut self.heat,
            &self.config.exits,
            self.config.guide_policy,
            &mut self.rng,
        );
        let Population { victims, rescuers } = &mut self.population;
        match slot {
            AgentSlot::Victim(v) => {
                let victim = victims.get_mut(v).ok_or(SimError::UnknownAgent(id))?;
                Ok(Activation::Victim(victim.step(&mut ctx)?))
            }
            AgentSlot::Rescuer(i) => {
                let rescuer = rescuers.get_mut(i).ok_or(SimError::UnknownAgent(id))?;
                Ok(Activation::Rescuer(rescuer.step(&mut ctx, victims)?))
            }
        }
    }

    /// Step until every victim is out or `config.max_ticks` ticks have run.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while self.tick.0 < self.config.max_ticks && !self.is_evacuated() {
            self.step_with(observer)?;
        }
        let summary = self.run_summary();
        tracing::info!(
            ticks     = summary.ticks.0,
            rescued   = summary.rescued,
            remaining = summary.remaining,
            "evacuation run finished",
        );
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Step exactly `n` ticks, even past evacuation or `max_ticks`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<RunSummary> {
        for _ in 0..n {
            self.step_with(observer)?;
        }
        Ok(self.run_summary())
    }

    // ── Reporting helpers ─────────────────────────────────────────────────

    fn tick_summary(&self, tick: Tick, rescued_this_tick: usize) -> TickSummary {
        let guiding = self
            .population
            .rescuers
            .iter()
            .filter(|r| r.mode == RescuerMode::Guiding)
            .count();
        TickSummary {
            tick,
            rescued_this_tick,
            rescued_total: self.rescued_count(),
            remaining:     self.remaining_victims(),
            searching:     self.population.rescuers.len() - guiding,
            guiding,
        }
    }

    fn run_summary(&self) -> RunSummary {
        RunSummary {
            ticks:     self.tick,
            rescued:   self.rescued_count(),
            remaining: self.remaining_victims(),
        }
    }
}
