//! Agent storage.
//!
//! Victims take IDs `0..victims`, rescuers `victims..victims+rescuers`, so
//! an `AgentId` resolves to its slot with one comparison.  Population order
//! (victims first, then rescuers) is also snapshot order.

use ev_core::AgentId;

use crate::{AgentKind, RescueAgent, VictimAgent};

/// Victims indexed by `AgentId`.
#[derive(Clone, Debug, Default)]
pub struct VictimTable {
    victims: Vec<VictimAgent>,
}

impl VictimTable {
    /// `count` free victims with IDs `0..count`.
    pub fn new(count: usize) -> Self {
        let victims = (0..count as u32).map(|i| VictimAgent::new(AgentId(i))).collect();
        Self { victims }
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&VictimAgent> {
        self.victims.get(id.index()).filter(|v| v.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut VictimAgent> {
        self.victims.get_mut(id.index()).filter(|v| v.id == id)
    }

    /// Link `victim` to `rescuer` if the victim is still free.
    ///
    /// Returns `false` (and changes nothing) when another rescuer got there
    /// first or the victim is already out.
    pub fn attach(&mut self, victim: AgentId, rescuer: AgentId) -> bool {
        match self.get_mut(victim) {
            Some(v) if v.is_free() => {
                v.followed_by = Some(rescuer);
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VictimAgent> {
        self.victims.iter()
    }

    pub fn len(&self) -> usize {
        self.victims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.victims.is_empty()
    }

    pub fn rescued_count(&self) -> usize {
        self.victims.iter().filter(|v| v.rescued).count()
    }
}

/// Where an `AgentId` lives inside a [`Population`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentSlot {
    Victim(AgentId),
    /// Index into `Population::rescuers`.
    Rescuer(usize),
}

/// The full agent population of one warehouse.
#[derive(Clone, Debug, Default)]
pub struct Population {
    pub victims:  VictimTable,
    pub rescuers: Vec<RescueAgent>,
}

impl Population {
    /// `victims` free victims followed by one searching rescuer per entry in
    /// `visibilities`.
    pub fn new(victims: usize, visibilities: &[u32]) -> Self {
        let rescuers = visibilities
            .iter()
            .enumerate()
            .map(|(i, &radius)| RescueAgent::new(AgentId((victims + i) as u32), radius))
            .collect();
        Self { victims: VictimTable::new(victims), rescuers }
    }

    /// Total number of agents.
    pub fn len(&self) -> usize {
        self.victims.len() + self.rescuers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All IDs in population order.
    pub fn ids(&self) -> Vec<AgentId> {
        (0..self.len() as u32).map(AgentId).collect()
    }

    pub fn slot(&self, id: AgentId) -> Option<AgentSlot> {
        let v = self.victims.len();
        match id.index() {
            i if i < v                       => Some(AgentSlot::Victim(id)),
            i if i < v + self.rescuers.len() => Some(AgentSlot::Rescuer(i - v)),
            _                                => None,
        }
    }

    pub fn kind(&self, id: AgentId) -> Option<AgentKind> {
        self.slot(id).map(|slot| match slot {
            AgentSlot::Victim(_)  => AgentKind::Victim,
            AgentSlot::Rescuer(_) => AgentKind::Rescuer,
        })
    }

    pub fn rescuer(&self, id: AgentId) -> Option<&RescueAgent> {
        match self.slot(id)? {
            AgentSlot::Rescuer(i) => self.rescuers.get(i),
            AgentSlot::Victim(_)  => None,
        }
    }
}
