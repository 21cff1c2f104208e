//! Discrete playfield coordinates
//!
//! Only the snake head wraps; falling entities leave the grid instead.

use serde::{Deserialize, Serialize};

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cardinal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in cells (screen axes: y grows downward)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Immutable playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Wrap an arbitrary coordinate back onto the grid
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    /// Neighbouring cell one step in `dir`, wrapping at the edges
    pub fn step(&self, from: Cell, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        self.wrap(from.x + dx, from.y + dy)
    }

    /// Shortest signed offset from `from` to `to` along an axis of length `len`
    pub fn wrapped_offset(from: i32, to: i32, len: i32) -> i32 {
        let d = (to - from).rem_euclid(len);
        if d > len / 2 { d - len } else { d }
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Row-major iteration over every cell
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}
