//! Victims: passive agents that wander until a rescuer picks them up.

use ev_core::{AgentId, Cell};
use ev_spatial::SpatialResult;

use crate::{StepContext, VictimState};

/// What a victim did on its turn.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VictimOutcome {
    /// Nothing happened (already rescued, off the grid, or nowhere to go).
    Idle,
    Moved(Cell),
    /// Left the building through the exit at this cell.
    Rescued(Cell),
}

/// A person waiting to be evacuated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VictimAgent {
    pub id: AgentId,

    /// One-way flag; once set the victim is off the grid for good.
    pub rescued: bool,

    /// The rescuer this victim is following.  Set by the rescuer when it
    /// attaches; the victim only reads it.
    pub followed_by: Option<AgentId>,
}

impl VictimAgent {
    pub fn new(id: AgentId) -> Self {
        Self { id, rescued: false, followed_by: None }
    }

    pub fn state(&self) -> VictimState {
        match (self.rescued, self.followed_by) {
            (true, _)        => VictimState::Rescued,
            (false, Some(_)) => VictimState::Guided,
            (false, None)    => VictimState::Free,
        }
    }

    /// Not rescued and not yet claimed by any rescuer.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.state() == VictimState::Free
    }

    /// One activation.
    ///
    /// A victim standing on an exit at the start of its turn is rescued and
    /// taken off the grid.  Otherwise it snaps onto its rescuer's cell if it
    /// is being guided, or steps to a uniformly random neighbor if free.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> SpatialResult<VictimOutcome> {
        if self.rescued {
            return Ok(VictimOutcome::Idle);
        }
        let Some(here) = ctx.grid.position(self.id) else {
            return Ok(VictimOutcome::Idle);
        };

        if ctx.is_exit(here) {
            ctx.grid.remove_agent(self.id);
            self.rescued = true;
            tracing::trace!(victim = %self.id, cell = %here, "victim rescued");
            return Ok(VictimOutcome::Rescued(here));
        }

        let target = match self.followed_by {
            Some(rescuer) => ctx.grid.position(rescuer),
            None => {
                let options: Vec<Cell> = ctx.grid.neighborhood(here, 1, false).collect();
                ctx.rng.choose(&options).copied()
            }
        };

        match target {
            Some(cell) if cell != here => {
                ctx.grid.move_agent(self.id, cell)?;
                Ok(VictimOutcome::Moved(cell))
            }
            _ => Ok(VictimOutcome::Idle),
        }
    }
}
