//! Closed enumerations for agent dispatch and state.

use serde::{Deserialize, Serialize};

/// Which of the two agent populations an agent belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Victim,
    Rescuer,
}

impl AgentKind {
    /// Label used in snapshots and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Victim  => "victim",
            AgentKind::Rescuer => "rescuer",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating mode of a rescuer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RescuerMode {
    /// Exploring the floor, biased toward cells with little heat.
    #[default]
    Searching,
    /// Walking an attached victim to an exit.
    Guiding,
}

impl RescuerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RescuerMode::Searching => "searching",
            RescuerMode::Guiding   => "guiding",
        }
    }
}

impl std::fmt::Display for RescuerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived state of a victim.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VictimState {
    /// Wandering, not attached to any rescuer.
    Free,
    /// Following a rescuer.
    Guided,
    /// Out of the building.  Terminal.
    Rescued,
}
