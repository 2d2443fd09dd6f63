//! Per-tick agent records handed to external consumers.

use serde::Serialize;

use ev_agent::AgentKind;
use ev_core::{AgentId, Cell};

/// One agent still in the building.
///
/// JSON shape: `{"id": 3, "position": [4, 7], "kind": "rescuer"}`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub struct AgentSnapshot {
    pub id:       AgentId,
    pub position: Cell,
    pub kind:     AgentKind,
}

impl AgentSnapshot {
    #[inline]
    pub fn new(id: AgentId, position: Cell, kind: AgentKind) -> Self {
        Self { id, position, kind }
    }
}
