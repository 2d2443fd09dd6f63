//! `ev-agent` — the two agent kinds and what they do on their turn.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`kind`]       | `AgentKind`, `RescuerMode`, `VictimState`                  |
//! | [`context`]    | `StepContext<'a>`, the state lent to the active agent      |
//! | [`victim`]     | `VictimAgent`, `VictimOutcome`                             |
//! | [`rescuer`]    | `RescueAgent`, `RescuerOutcome`                            |
//! | [`population`] | `Population`, `VictimTable`, `AgentSlot`                   |
//!
//! # Turn discipline
//!
//! Only the agent currently being activated mutates the grid, the heat map,
//! or another agent, and only through the `&mut` borrows it is handed for
//! that turn.  The rescuer → victim "following" link is a plain
//! `Option<AgentId>` on the victim: neither agent owns the other.

pub mod context;
pub mod kind;
pub mod population;
pub mod rescuer;
pub mod victim;


pub use context::StepContext;
pub use kind::{AgentKind, RescuerMode, VictimState};
pub use population::{AgentSlot, Population, VictimTable};
pub use rescuer::{RescueAgent, RescuerOutcome};
pub use victim::{VictimAgent, VictimOutcome};
