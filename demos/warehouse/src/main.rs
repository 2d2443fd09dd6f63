//! warehouse — runs one evacuation scenario end to end.
//!
//! ```text
//! cargo run -p warehouse                      # built-in defaults
//! cargo run -p warehouse -- scenario.toml     # scenario from TOML
//! RUST_LOG=debug cargo run -p warehouse       # per-tick summaries
//! ```
//!
//! After the run the final floor is printed as ASCII, then a fresh copy of
//! the scenario is driven through the tick bridge the way a polling front
//! end would.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_bridge::TickBridge;
use ev_core::{AgentId, Cell, ScenarioConfig, Tick};
use ev_sim::{RunSummary, SimObserver, TickSummary, Warehouse, render_ascii};

// ── Constants ─────────────────────────────────────────────────────────────────

const PROGRESS_INTERVAL_TICKS: u64   = 10;
const BRIDGE_REQUESTS:         usize = 3;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ProgressObserver {
    rescues:      Vec<(Tick, AgentId, Cell)>,
    peak_guiding:  usize,
}

impl SimObserver for ProgressObserver {
    fn on_rescue(&mut self, tick: Tick, victim: AgentId, exit: Cell) {
        self.rescues.push((tick, victim, exit));
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.peak_guiding = self.peak_guiding.max(summary.guiding);
        if tick.0 % PROGRESS_INTERVAL_TICKS == 0 {
            info!(
                %tick,
                rescued = summary.rescued_total,
                remaining = summary.remaining,
                searching = summary.searching,
                guiding = summary.guiding,
                "progress"
            );
        }
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        info!(ticks = %summary.ticks, rescued = summary.rescued, "evacuation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> Result<ScenarioConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ScenarioConfig::load(&path)
            .with_context(|| format!("loading scenario {}", path.display())),
        None => Ok(ScenarioConfig::default()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;

    println!("=== warehouse evacuation ===");
    println!(
        "Floor: {}x{}  |  Victims: {}  |  Rescuers: {}  |  Seed: {}",
        config.width, config.height, config.victims, config.rescuers, config.seed
    );
    println!();

    // 1. Run to completion.
    let mut warehouse = Warehouse::initialize(config.clone())?;
    let mut observer = ProgressObserver::default();
    let t0 = Instant::now();
    let summary = warehouse.run(&mut observer)?;
    let elapsed = t0.elapsed();

    println!("{}", render_ascii(&warehouse));
    println!(
        "Ticks: {}  |  Rescued: {}  |  Remaining: {}  |  Peak guiding: {}  |  {:.2?}",
        summary.ticks.0, summary.rescued, summary.remaining, observer.peak_guiding, elapsed
    );
    if let Some((tick, victim, exit)) = observer.rescues.first() {
        println!("First rescue: {victim} at {exit} on {tick}");
    }
    if let Some((tick, victim, exit)) = observer.rescues.last() {
        println!("Last rescue:  {victim} at {exit} on {tick}");
    }
    println!();

    // 2. Same scenario, polled through the bridge.
    let mut bridge = TickBridge::new(Warehouse::initialize(config)?);
    for _ in 0..BRIDGE_REQUESTS {
        let response = bridge.handle("/step")?;
        println!(
            "GET /step  -> {} {} ({} bytes)",
            response.status,
            response.content_type,
            response.body.len()
        );
    }
    let response = bridge.handle("/")?;
    println!("GET /      -> {} {} {:?}", response.status, response.content_type, response.body);

    Ok(())
}
