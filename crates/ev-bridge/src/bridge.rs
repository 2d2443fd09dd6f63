use ev_core::Tick;
use ev_sim::Warehouse;
use tracing::{info, warn};

use crate::BridgeResult;

pub const STEP_PATH: &str = "/step";
pub const INVALID_ENDPOINT: &str = "Invalid endpoint";

pub const CONTENT_JSON: &str = "application/json";
pub const CONTENT_TEXT: &str = "text/plain";

// ── TickRequest ───────────────────────────────────────────────────────────────

/// A parsed request path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TickRequest {
    /// Advance the simulation by one tick.
    Step,
    /// Any other path; carries the path for logging.
    Unknown(String),
}

impl TickRequest {
    /// Exact match on the path; query strings and trailing slashes are not
    /// stripped.
    pub fn parse(path: &str) -> Self {
        if path == STEP_PATH {
            TickRequest::Step
        } else {
            TickRequest::Unknown(path.to_owned())
        }
    }
}

// ── BridgeResponse ────────────────────────────────────────────────────────────

/// What a transport should send back.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BridgeResponse {
    /// HTTP-style status code.  Unknown paths still answer `200`, with the
    /// error carried in the body.
    pub status:       u16,
    pub content_type: &'static str,
    pub body:         String,
}

impl BridgeResponse {
    fn json(body: String) -> Self {
        Self { status: 200, content_type: CONTENT_JSON, body }
    }

    fn invalid() -> Self {
        Self { status: 200, content_type: CONTENT_TEXT, body: INVALID_ENDPOINT.to_owned() }
    }
}

// ── TickBridge ────────────────────────────────────────────────────────────────

/// Owns a [`Warehouse`] and advances it on demand.
pub struct TickBridge {
    warehouse: Warehouse,
}

impl TickBridge {
    pub fn new(warehouse: Warehouse) -> Self {
        Self { warehouse }
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    /// Current tick of the wrapped warehouse.
    pub fn tick(&self) -> Tick {
        self.warehouse.tick()
    }

    pub fn into_inner(self) -> Warehouse {
        self.warehouse
    }

    /// Route a request path.
    ///
    /// # Errors
    ///
    /// Only a failing tick or snapshot serialization is an error; unknown
    /// paths produce an ordinary `Invalid endpoint` response.
    pub fn handle(&mut self, path: &str) -> BridgeResult<BridgeResponse> {
        match TickRequest::parse(path) {
            TickRequest::Step => {
                let snapshot = self.warehouse.step()?;
                let body = serde_json::to_string(&snapshot)?;
                info!(
                    tick = %self.warehouse.tick(),
                    agents = snapshot.len(),
                    "step served"
                );
                Ok(BridgeResponse::json(body))
            }
            TickRequest::Unknown(path) => {
                warn!(%path, "unknown bridge endpoint");
                Ok(BridgeResponse::invalid())
            }
        }
    }
}
