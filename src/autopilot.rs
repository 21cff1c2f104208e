//! Demo player
//!
//! Greedy steering toward the strawberry on the wrapped grid. Good enough to
//! keep headless runs alive for a while; it does not plan around bullets.

use crate::game::Command;
use crate::sim::{Cell, Direction, GamePhase, GameState, Grid};

/// Commands for the next tick
pub fn next_commands(state: &GameState) -> Vec<Command> {
    let mut commands = Vec::new();
    if state.phase != GamePhase::Playing {
        return commands;
    }

    if let Some(dir) = choose_direction(state) {
        if dir != state.snake.pending_direction {
            commands.push(Command::Direction(dir));
        }
    }

    if should_shoot(state) {
        commands.push(Command::Shoot);
    }
    commands
}

/// Best non-reversing direction: safe moves first, then shortest wrapped
/// distance to the food, then keep the current heading.
fn choose_direction(state: &GameState) -> Option<Direction> {
    let snake = &state.snake;
    let head = snake.head();
    let food = state.food.position;

    Direction::ALL
        .into_iter()
        .filter(|&dir| snake.positions.len() <= 1 || dir != snake.direction.opposite())
        .map(|dir| {
            let next = state.grid.step(head, dir);
            let safe = is_safe(state, next);
            let distance = wrapped_distance(&state.grid, next, food);
            let straight = dir == snake.direction;
            (dir, safe, distance, straight)
        })
        .min_by_key(|&(_, safe, distance, straight)| (!safe, distance, !straight))
        .map(|(dir, ..)| dir)
}

fn is_safe(state: &GameState, cell: Cell) -> bool {
    let snake = &state.snake;
    let body_len = if snake.growth_pending {
        snake.positions.len()
    } else {
        snake.positions.len().saturating_sub(1)
    };
    let hits_body = snake.positions.iter().take(body_len).any(|&c| c == cell);
    // Invaders fall into the row below them soon; treat both cells as unsafe
    let hits_invader = state.invaders.iter().any(|invader| {
        let at = invader.cell();
        at.x == cell.x && (at.y == cell.y || at.y + 1 == cell.y)
    });
    snake.shield_active || !(hits_body || hits_invader)
}

fn wrapped_distance(grid: &Grid, a: Cell, b: Cell) -> i32 {
    Grid::wrapped_offset(a.x, b.x, grid.width).abs()
        + Grid::wrapped_offset(a.y, b.y, grid.height).abs()
}

/// Fire when an invader sits above the head in the same column
fn should_shoot(state: &GameState) -> bool {
    let snake = &state.snake;
    if !snake.can_shoot {
        return false;
    }
    let head = snake.head();
    state
        .invaders
        .iter()
        .any(|invader| invader.fall.x == head.x && invader.cell().y < head.y)
}
