//! Rescuers: search the floor for victims, then walk them to an exit.

use ev_core::{AgentId, Cell, GuidePolicy};
use ev_spatial::SpatialResult;

use crate::{RescuerMode, StepContext, VictimAgent, VictimTable};

/// What a rescuer did on its turn.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RescuerOutcome {
    /// No candidate cell, or already where it needs to be.
    Idle,
    Moved(Cell),
    /// Claimed a co-located victim and switched to guiding.
    Attached(AgentId),
    /// Stood on an exit while guiding and went back to searching.
    ReachedExit { escorted: Option<AgentId> },
}

/// An autonomous searcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RescueAgent {
    pub id: AgentId,

    /// Radius (in cells) within which free victims are spotted.
    pub visibility: u32,

    pub mode: RescuerMode,

    /// The victim attached on the last switch to guiding.
    pub escorting: Option<AgentId>,
}

impl RescueAgent {
    pub fn new(id: AgentId, visibility: u32) -> Self {
        Self {
            id,
            visibility,
            mode: RescuerMode::Searching,
            escorting: None,
        }
    }

    /// One activation.  Degenerate cases (no position, no candidate cells)
    /// are absorbed as [`RescuerOutcome::Idle`].
    pub fn step(
        &mut self,
        ctx:     &mut StepContext<'_>,
        victims: &mut VictimTable,
    ) -> SpatialResult<RescuerOutcome> {
        let Some(here) = ctx.grid.position(self.id) else {
            return Ok(RescuerOutcome::Idle);
        };
        match self.mode {
            RescuerMode::Searching => self.search(here, ctx, victims),
            RescuerMode::Guiding   => self.guide(here, ctx),
        }
    }

    // ── Searching ─────────────────────────────────────────────────────────

    fn search(
        &mut self,
        here:    Cell,
        ctx:     &mut StepContext<'_>,
        victims: &mut VictimTable,
    ) -> SpatialResult<RescuerOutcome> {
        ctx.heat.increment(here)?;

        let co_located = ctx
            .grid
            .occupants(here)
            .iter()
            .copied()
            .find(|&id| victims.get(id).is_some_and(VictimAgent::is_free));
        if let Some(victim) = co_located {
            if victims.attach(victim, self.id) {
                self.mode = RescuerMode::Guiding;
                self.escorting = Some(victim);
                tracing::trace!(rescuer = %self.id, %victim, cell = %here, "rescuer attached victim");
                return Ok(RescuerOutcome::Attached(victim));
            }
        }

        let candidates = self.search_candidates(here, ctx, victims);
        match ctx.heat.weighted_least_visited_choice(&candidates, ctx.rng) {
            Some(target) => {
                ctx.grid.move_agent(self.id, target)?;
                Ok(RescuerOutcome::Moved(target))
            }
            None => Ok(RescuerOutcome::Idle),
        }
    }

    /// Cells worth moving to this turn.
    ///
    /// First choice: the cells of unclaimed victims within `visibility`.
    /// Fallback: the radius-1 Moore neighborhood.
    pub fn search_candidates(
        &self,
        here:    Cell,
        ctx:     &StepContext<'_>,
        victims: &VictimTable,
    ) -> Vec<Cell> {
        let visible: Vec<Cell> = ctx
            .grid
            .neighbor_agents(here, self.visibility, false)
            .into_iter()
            .filter(|&id| victims.get(id).is_some_and(VictimAgent::is_free))
            .filter_map(|id| ctx.grid.position(id))
            .collect();
        if !visible.is_empty() {
            return visible;
        }
        ctx.grid.neighborhood(here, 1, false).collect()
    }

    // ── Guiding ───────────────────────────────────────────────────────────

    fn guide(&mut self, here: Cell, ctx: &mut StepContext<'_>) -> SpatialResult<RescuerOutcome> {
        if ctx.is_exit(here) {
            self.mode = RescuerMode::Searching;
            let escorted = self.escorting.take();
            tracing::trace!(rescuer = %self.id, cell = %here, "rescuer reached exit");
            return Ok(RescuerOutcome::ReachedExit { escorted });
        }

        let target = match ctx.policy {
            GuidePolicy::Corner => Cell::new(
                if here.x + 1 < ctx.grid.width()  { here.x + 1 } else { here.x },
                if here.y + 1 < ctx.grid.height() { here.y + 1 } else { here.y },
            ),
            GuidePolicy::NearestExit => match ctx.nearest_exit(here) {
                Some(exit) => here.step_toward(exit),
                None       => here,
            },
        };

        if target == here {
            return Ok(RescuerOutcome::Idle);
        }
        ctx.grid.move_agent(self.id, target)?;
        Ok(RescuerOutcome::Moved(target))
    }
}
