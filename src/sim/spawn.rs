//! Probabilistic spawning and food placement

use std::collections::HashSet;

use rand::Rng;

use super::entities::{Invader, PowerUp, PowerUpKind};
use super::grid::{Cell, Grid};
use super::state::GameState;

/// One spawn roll per tick.
///
/// A passing roll adds an invader (below the cap) and then takes a second,
/// flat-chance roll for a power-up, so power-ups appear at the product of the
/// two probabilities.
pub fn spawn_pass(state: &mut GameState) {
    let config = &state.config;
    let rng = &mut state.rng;

    if rng.random::<f64>() >= state.difficulty.invader_spawn_rate {
        return;
    }

    if state.invaders.len() < config.max_invaders {
        let column = rng.random_range(0..state.grid.width);
        let speed = state.difficulty.invader_speed(config);
        state.invaders.push(Invader::new(column, speed));
        log::trace!("Invader spawned in column {} at speed {:.2}", column, speed);
    }

    if rng.random::<f64>() < config.powerup_spawn_chance {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let column = rng.random_range(0..state.grid.width);
        state.powerups.push(PowerUp::new(kind, column, config));
        log::trace!("{:?} power-up spawned in column {}", kind, column);
    }
}

/// Cells food must not land on
pub fn occupied_cells(state: &GameState) -> HashSet<Cell> {
    state
        .snake
        .positions
        .iter()
        .copied()
        .chain(state.invaders.iter().map(|i| i.cell()))
        .chain(state.powerups.iter().map(|p| p.cell()))
        .collect()
}

/// Random probing, then a scan of free cells once `attempts` probes miss.
/// `None` only when every cell is occupied.
pub fn find_free_cell<R: Rng>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<Cell>,
    attempts: u32,
) -> Option<Cell> {
    if occupied.len() >= grid.cell_count() {
        return None;
    }
    for _ in 0..attempts {
        let cell = Cell::new(rng.random_range(0..grid.width), rng.random_range(0..grid.height));
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }

    log::warn!(
        "Food placement missed {} random probes, scanning free cells",
        attempts
    );
    let free: Vec<Cell> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Relocate the strawberry to a cell clear of snake, invaders and power-ups.
/// Leaves it in place if the grid is full.
pub fn place_food(state: &mut GameState) -> bool {
    let occupied = occupied_cells(state);
    let attempts = state.config.food_placement_attempts;
    match find_free_cell(&mut state.rng, &state.grid, &occupied, attempts) {
        Some(cell) => {
            state.food.position = cell;
            true
        }
        None => {
            log::warn!("No free cell for food; grid is full");
            false
        }
    }
}
