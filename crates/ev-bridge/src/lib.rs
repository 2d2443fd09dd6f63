//! `ev-bridge` — a request/tick bridge for front ends that poll the
//! simulation one tick at a time.
//!
//! The bridge knows nothing about sockets or HTTP framing.  A transport
//! hands it the request path and writes the returned [`BridgeResponse`]
//! back verbatim:
//!
//! | Path     | Effect                 | Body                        |
//! |----------|------------------------|-----------------------------|
//! | `/step`  | one `Warehouse::step`  | JSON array of agent records |
//! | anything | none                   | `Invalid endpoint`          |

pub mod bridge;
pub mod error;


pub use bridge::{BridgeResponse, TickBridge, TickRequest};
pub use error::{BridgeError, BridgeResult};
