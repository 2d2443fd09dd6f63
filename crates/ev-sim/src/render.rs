//! Render-matrix extraction for plotting front ends.
//!
//! The matrix is `height` rows of `width` integers.  Plain floor cells hold
//! their heat count (`>= 0`); the negative sentinels below mark exits and
//! agents, with agents painted last so they win over heat and exit marks.

use ev_agent::RescuerMode;

use crate::Warehouse;

pub const EXIT: i64 = -1;
pub const VICTIM: i64 = -2;
pub const SEARCHING_RESCUER: i64 = -3;
pub const GUIDING_RESCUER: i64 = -4;

/// Heat values plus exit and occupancy sentinels.
///
/// Agents are painted in population order, so a rescuer sharing a cell with
/// a victim shows as the rescuer.
pub fn render_matrix(warehouse: &Warehouse) -> Vec<Vec<i64>> {
    let heat = warehouse.heat();
    let mut matrix: Vec<Vec<i64>> = heat
        .rows()
        .map(|row| row.iter().map(|&count| i64::try_from(count).unwrap_or(i64::MAX)).collect())
        .collect();

    let mut paint = |x: u32, y: u32, value: i64| {
        if let Some(slot) = matrix.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            *slot = value;
        }
    };

    for exit in &warehouse.config().exits {
        paint(exit.x, exit.y, EXIT);
    }
    let population = warehouse.population();
    for victim in population.victims.iter().filter(|v| !v.rescued) {
        if let Some(cell) = warehouse.position(victim.id) {
            paint(cell.x, cell.y, VICTIM);
        }
    }
    for rescuer in &population.rescuers {
        if let Some(cell) = warehouse.position(rescuer.id) {
            let value = match rescuer.mode {
                RescuerMode::Searching => SEARCHING_RESCUER,
                RescuerMode::Guiding   => GUIDING_RESCUER,
            };
            paint(cell.x, cell.y, value);
        }
    }
    matrix
}

/// Terminal rendering of [`render_matrix`]: `.` unvisited floor, `:` visited
/// floor, `E` exit, `v` victim, `s`/`g` searching/guiding rescuer.
pub fn render_ascii(warehouse: &Warehouse) -> String {
    let matrix = render_matrix(warehouse);
    let mut out = String::with_capacity(matrix.len() * (warehouse.config().width as usize + 1));
    for row in &matrix {
        out.extend(row.iter().map(|&value| match value {
            EXIT              => 'E',
            VICTIM            => 'v',
            SEARCHING_RESCUER => 's',
            GUIDING_RESCUER   => 'g',
            0                 => '.',
            _                 => ':',
        }));
        out.push('\n');
    }
    out
}
