//! Scenario and invariant tests for ev-sim.

use std::collections::HashMap;

use ev_agent::{AgentKind, Population, RescuerMode};
use ev_core::{AgentId, Cell, GuidePolicy, ScenarioConfig, SimRng, Tick};
use ev_spatial::{Grid, HeatMap};

use crate::{
    AgentSnapshot, NoopObserver, RunSummary, SimObserver, TickSummary, Warehouse, WarehouseBuilder,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 10×10 floor, single exit in the bottom-right corner.
fn small_config(victims: usize, rescuers: usize) -> ScenarioConfig {
    ScenarioConfig {
        width: 10,
        height: 10,
        exits: vec![Cell::new(9, 9)],
        victims,
        rescuers,
        max_ticks: 50,
        seed: 42,
        ..ScenarioConfig::default()
    }
}

/// One victim in the far corner, one rescuer on the exit that sees the
/// whole floor.
fn corner_rescue() -> Warehouse {
    WarehouseBuilder::new(small_config(1, 1))
        .victim_positions(vec![Cell::new(0, 0)])
        .visibility_radii(vec![9])
        .build()
        .unwrap()
}

fn in_bounds(snapshot: &[AgentSnapshot], width: u32, height: u32) -> bool {
    snapshot
        .iter()
        .all(|s| s.position.x < width && s.position.y < height)
}

// ── Initialization ────────────────────────────────────────────────────────────

#[cfg(test)]
mod init_tests {
    use super::*;

    #[test]
    fn default_scenario_places_everyone() {
        let w = Warehouse::initialize(ScenarioConfig::default()).unwrap();
        assert_eq!(w.population().len(), 35);
        assert_eq!(w.grid().agent_count(), 35);
        assert_eq!(w.tick(), Tick::ZERO);

        // Victims on distinct cells.
        let mut victim_cells: Vec<Cell> = w
            .population()
            .victims
            .iter()
            .map(|v| w.position(v.id).unwrap())
            .collect();
        victim_cells.sort();
        victim_cells.dedup();
        assert_eq!(victim_cells.len(), 25);

        // Rescuers on the primary exit, first three with the wide radius.
        for (i, r) in w.population().rescuers.iter().enumerate() {
            assert_eq!(w.position(r.id), Some(Cell::new(49, 29)));
            assert_eq!(r.mode, RescuerMode::Searching);
            assert_eq!(r.visibility, if i < 3 { 2 } else { 1 });
        }
    }

    #[test]
    fn heat_origin_starts_at_one() {
        let w = Warehouse::initialize(small_config(0, 0)).unwrap();
        assert_eq!(w.heat().value_at(Cell::new(0, 0)), 1);
        assert_eq!(w.heat().total(), 1);

        let cfg = ScenarioConfig { heat_origin: None, ..small_config(0, 0) };
        assert_eq!(Warehouse::initialize(cfg).unwrap().heat().total(), 0);
    }

    #[test]
    fn too_many_victims_is_grid_full() {
        let cfg = ScenarioConfig {
            width: 2,
            height: 2,
            exits: vec![Cell::new(1, 1)],
            victims: 5,
            rescuers: 1,
            ..ScenarioConfig::default()
        };
        let err = Warehouse::initialize(cfg).err().expect("must fail");
        assert!(
            matches!(err, crate::SimError::Spatial(ev_spatial::SpatialError::GridFull { .. })),
            "got {err}"
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = ScenarioConfig { exits: vec![], ..small_config(1, 1) };
        assert!(matches!(
            Warehouse::initialize(cfg),
            Err(crate::SimError::Scenario(_))
        ));
    }

    #[test]
    fn override_length_mismatch_errors() {
        let result = WarehouseBuilder::new(small_config(2, 1))
            .victim_positions(vec![Cell::new(0, 0)])
            .build();
        assert!(matches!(
            result,
            Err(crate::SimError::AgentCountMismatch { expected: 2, got: 1, .. })
        ));

        let result = WarehouseBuilder::new(small_config(2, 1))
            .visibility_radii(vec![1, 2])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_victim_cells_rejected() {
        let result = WarehouseBuilder::new(small_config(3, 1))
            .victim_positions(vec![Cell::new(1, 1), Cell::new(4, 2), Cell::new(1, 1)])
            .build();
        assert!(matches!(result, Err(crate::SimError::Config(_))));

        // Rescuers may share a cell, and may share one with a victim.
        let result = WarehouseBuilder::new(small_config(1, 2))
            .victim_positions(vec![Cell::new(4, 4)])
            .rescuer_positions(vec![Cell::new(4, 4), Cell::new(4, 4)])
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn zero_visibility_override_rejected() {
        let result = WarehouseBuilder::new(small_config(1, 1))
            .visibility_radii(vec![0])
            .build();
        assert!(matches!(result, Err(crate::SimError::Config(_))));
    }

    #[test]
    fn out_of_bounds_override_errors() {
        let result = WarehouseBuilder::new(small_config(1, 1))
            .victim_positions(vec![Cell::new(10, 0)])
            .build();
        assert!(matches!(
            result,
            Err(crate::SimError::Spatial(ev_spatial::SpatialError::OutOfBounds { .. }))
        ));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn step_advances_tick_and_reports_everyone() {
        let mut w = Warehouse::initialize(small_config(3, 2)).unwrap();
        let snap = w.step().unwrap();
        assert_eq!(w.tick(), Tick(1));
        assert_eq!(snap.len(), 5 - w.rescued_count());
        let kinds: Vec<AgentKind> = snap.iter().map(|s| s.kind).collect();
        // Population order: victims first.
        let first_rescuer = kinds.iter().position(|&k| k == AgentKind::Rescuer).unwrap();
        assert!(kinds[first_rescuer..].iter().all(|&k| k == AgentKind::Rescuer));
    }

    #[test]
    fn positions_stay_in_bounds() {
        let cfg = ScenarioConfig::default();
        let (width, height) = (cfg.width, cfg.height);
        let mut w = Warehouse::initialize(cfg).unwrap();
        for _ in 0..100 {
            let snap = w.step().unwrap();
            assert!(in_bounds(&snap, width, height), "tick {}", w.tick());
        }
    }

    #[test]
    fn rescued_victims_never_come_back() {
        let mut w = Warehouse::initialize(ScenarioConfig::default()).unwrap();
        let mut rescued: Vec<AgentId> = Vec::new();
        for _ in 0..150 {
            let snap = w.step().unwrap();
            for id in &rescued {
                assert!(w.victim(*id).unwrap().rescued, "{id} un-rescued");
                assert!(snap.iter().all(|s| s.id != *id), "{id} reappeared");
                assert_eq!(w.position(*id), None);
            }
            for v in w.population().victims.iter() {
                if v.rescued && !rescued.contains(&v.id) {
                    rescued.push(v.id);
                }
            }
        }
        assert_eq!(rescued.len(), w.rescued_count());
    }

    #[test]
    fn heat_rises_only_under_searching_rescuers() {
        let mut w = Warehouse::initialize(ScenarioConfig::default()).unwrap();
        for _ in 0..60 {
            let before = w.heat().clone();
            let mut searchers: HashMap<Cell, u64> = HashMap::new();
            for r in &w.population().rescuers {
                if r.mode == RescuerMode::Searching {
                    *searchers.entry(w.position(r.id).unwrap()).or_default() += 1;
                }
            }

            w.step().unwrap();

            for (cell, _) in w.grid().iter_cells() {
                let (old, new) = (before.value_at(cell), w.heat().value_at(cell));
                assert!(new >= old, "heat decreased at {cell}");
                assert!(
                    new - old <= searchers.get(&cell).copied().unwrap_or(0),
                    "unexpected heat at {cell}"
                );
            }
        }
    }

    #[test]
    fn no_rescuers_means_no_heat() {
        let mut w = Warehouse::initialize(small_config(4, 0)).unwrap();
        w.run_ticks(20, &mut NoopObserver).unwrap();
        assert_eq!(w.heat().total(), 1);
    }

    #[derive(Default)]
    struct TickCounter {
        started: usize,
        ended:   usize,
    }

    impl SimObserver for TickCounter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.started += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {
            self.ended += 1;
        }
    }

    #[test]
    fn failed_tick_halts_the_warehouse() {
        // A heat map smaller than the floor makes the rescuer's first
        // heat bump fail.
        // The victim stays off the grid so it idles whenever it goes first.
        let population = Population::new(1, &[1]);
        let mut grid = Grid::new(5, 5);
        grid.place_agent(AgentId(1), Cell::new(3, 3)).unwrap();
        let mut w = Warehouse::from_parts(
            small_config(1, 1),
            grid,
            HeatMap::new(1, 1),
            population,
            SimRng::new(1),
        );
        let mut counter = TickCounter::default();

        let err = w.step_with(&mut counter).err().expect("tick must fail");
        assert!(matches!(
            err,
            crate::SimError::Spatial(ev_spatial::SpatialError::OutOfBounds { .. })
        ));
        assert!(w.is_halted());
        assert_eq!(w.tick(), Tick::ZERO);
        assert_eq!((counter.started, counter.ended), (1, 0));

        // Later steps are refused without touching the observer.
        assert!(matches!(
            w.step_with(&mut counter),
            Err(crate::SimError::Halted { tick: Tick(0) })
        ));
        assert!(w.run(&mut counter).is_err());
        assert_eq!((counter.started, counter.ended), (1, 0));
    }

    #[test]
    fn healthy_warehouse_is_not_halted() {
        let mut w = Warehouse::initialize(small_config(2, 1)).unwrap();
        w.run_ticks(5, &mut NoopObserver).unwrap();
        assert!(!w.is_halted());
    }

    #[test]
    fn unknown_agent_activation_errors() {
        let mut w = Warehouse::initialize(small_config(1, 1)).unwrap();
        assert!(matches!(
            w.activate(AgentId(2)),
            Err(crate::SimError::UnknownAgent(AgentId(2)))
        ));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    struct Recorder {
        rescues:  Vec<(Tick, AgentId, Cell)>,
        ticks:    usize,
        finished: Option<RunSummary>,
    }

    impl SimObserver for Recorder {
        fn on_rescue(&mut self, tick: Tick, victim: AgentId, exit: Cell) {
            self.rescues.push((tick, victim, exit));
        }
        fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {
            self.ticks += 1;
        }
        fn on_sim_end(&mut self, summary: &RunSummary) {
            self.finished = Some(*summary);
        }
    }

    #[test]
    fn corner_victim_is_found_and_walked_out() {
        let mut w = corner_rescue();
        let mut rec = Recorder { rescues: vec![], ticks: 0, finished: None };
        let summary = w.run(&mut rec).unwrap();

        assert!(w.is_evacuated(), "not evacuated after {} ticks", summary.ticks);
        assert!(summary.ticks.0 <= 50);
        assert_eq!(summary.rescued, 1);
        assert_eq!(summary.remaining, 0);
        assert_eq!(rec.rescues.len(), 1);
        assert_eq!(rec.rescues[0].1, AgentId(0));
        assert_eq!(rec.rescues[0].2, Cell::new(9, 9));
        assert_eq!(rec.ticks as u64, summary.ticks.0);
        assert_eq!(rec.finished, Some(summary));

        // Only the rescuer remains visible afterwards.
        let snap = w.step().unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].kind, AgentKind::Rescuer);
        assert!(w.victim(AgentId(0)).unwrap().rescued);
    }

    #[test]
    fn nearest_exit_policy_also_evacuates() {
        let cfg = ScenarioConfig {
            exits: vec![Cell::new(0, 9), Cell::new(9, 9)],
            guide_policy: GuidePolicy::NearestExit,
            ..small_config(1, 1)
        };
        let mut w = WarehouseBuilder::new(cfg)
            .victim_positions(vec![Cell::new(1, 1)])
            .visibility_radii(vec![9])
            .build()
            .unwrap();
        w.run(&mut NoopObserver).unwrap();
        assert!(w.is_evacuated());
    }

    #[test]
    fn run_stops_at_max_ticks() {
        let cfg = ScenarioConfig { max_ticks: 3, ..ScenarioConfig::default() };
        let mut w = Warehouse::initialize(cfg).unwrap();
        let summary = w.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.ticks, Tick(3));
        assert!(summary.remaining > 0);
    }

    #[test]
    fn empty_warehouse_is_already_evacuated() {
        let mut w = Warehouse::initialize(small_config(0, 2)).unwrap();
        let summary = w.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.ticks, Tick::ZERO);
        assert!(w.is_evacuated());
    }

    #[test]
    fn first_mover_wins_the_victim() {
        let build = || {
            WarehouseBuilder::new(small_config(1, 2))
                .victim_positions(vec![Cell::new(4, 4)])
                .rescuer_positions(vec![Cell::new(4, 4), Cell::new(4, 4)])
                .build()
                .unwrap()
        };
        let (victim, a, b) = (AgentId(0), AgentId(1), AgentId(2));

        for (first, second) in [(a, b), (b, a)] {
            let mut w = build();
            w.activate(first).unwrap();
            w.activate(second).unwrap();
            assert_eq!(w.victim(victim).unwrap().followed_by, Some(first));
            assert_eq!(w.rescuer(first).unwrap().mode, RescuerMode::Guiding);
            assert_eq!(w.rescuer(first).unwrap().escorting, Some(victim));
            assert_eq!(w.rescuer(second).unwrap().mode, RescuerMode::Searching);
            assert_ne!(w.position(second), Some(Cell::new(4, 4)));
        }
    }
}

// ── Determinism and output ────────────────────────────────────────────────────

#[cfg(test)]
mod output_tests {
    use super::*;
    use crate::render::{EXIT, GUIDING_RESCUER, SEARCHING_RESCUER, VICTIM};
    use crate::{render_ascii, render_matrix};

    fn transcript(seed: u64, ticks: usize) -> Vec<String> {
        let cfg = ScenarioConfig { seed, ..ScenarioConfig::default() };
        let mut w = Warehouse::initialize(cfg).unwrap();
        (0..ticks)
            .map(|_| serde_json::to_string(&w.step().unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn same_seed_same_snapshots() {
        assert_eq!(transcript(7, 40), transcript(7, 40));
    }

    #[test]
    fn different_seed_different_snapshots() {
        assert_ne!(transcript(7, 40), transcript(8, 40));
    }

    #[test]
    fn snapshot_json_shape() {
        let w = corner_rescue();
        let json = serde_json::to_string(&w.snapshot()).unwrap();
        assert_eq!(
            json,
            r#"[{"id":0,"position":[0,0],"kind":"victim"},{"id":1,"position":[9,9],"kind":"rescuer"}]"#
        );
    }

    #[test]
    fn render_matrix_sentinels() {
        let cfg = ScenarioConfig {
            exits: vec![Cell::new(8, 9), Cell::new(9, 9)],
            ..small_config(1, 1)
        };
        let mut w = WarehouseBuilder::new(cfg)
            .victim_positions(vec![Cell::new(0, 0)])
            .rescuer_positions(vec![Cell::new(5, 5)])
            .build()
            .unwrap();

        let m = render_matrix(&w);
        assert_eq!(m.len(), 10);
        assert!(m.iter().all(|row| row.len() == 10));
        assert_eq!(m[0][0], VICTIM); // beats the heat origin
        assert_eq!(m[9][8], EXIT);
        assert_eq!(m[9][9], EXIT);
        assert_eq!(m[5][5], SEARCHING_RESCUER);
        assert_eq!(m[3][3], 0);

        // Stage a guiding rescuer on top of the victim.
        let rescuer = AgentId(1);
        let w2 = {
            let cfg = ScenarioConfig {
                exits: vec![Cell::new(9, 9)],
                ..small_config(1, 1)
            };
            let mut w2 = WarehouseBuilder::new(cfg)
                .victim_positions(vec![Cell::new(2, 2)])
                .rescuer_positions(vec![Cell::new(2, 2)])
                .build()
                .unwrap();
            w2.activate(rescuer).unwrap();
            w2
        };
        let m2 = render_matrix(&w2);
        assert_eq!(m2[2][2], GUIDING_RESCUER);

        // Heat shows through once the rescuer walks on.
        w.activate(rescuer).unwrap();
        assert_eq!(render_matrix(&w)[5][5], 1);
    }

    #[test]
    fn ascii_rendering() {
        let w = corner_rescue();
        let text = render_ascii(&w);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with('v'));
        assert!(lines[9].ends_with('s'));
        assert_eq!(lines[4], "..........");
    }
}
