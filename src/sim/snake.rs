//! The player snake
//!
//! Grid-stepping body plus timed power-up effects. Self-collision is reported,
//! never resolved here; the resolver decides whether a shield forgives it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Bullet, Heading};
use super::grid::{Cell, Direction, Grid};
use crate::config::GameConfig;

/// The head would land on the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfCollision {
    pub at: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied cells, head first
    pub positions: VecDeque<Cell>,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub growth_pending: bool,
    pub length: u32,
    pub speed_boost_ticks: u32,
    pub shield_active: bool,
    pub shield_ticks: u32,
    pub can_shoot: bool,
    pub shoot_ticks: u32,
    /// Monotonic timestamp of the last shot (ms)
    pub last_shot_ms: Option<u64>,
    pub shot_cooldown_ms: u64,
}

impl Snake {
    /// Straight snake with its head at `head`, body trailing behind `direction`
    pub fn new(
        head: Cell,
        direction: Direction,
        length: u32,
        grid: &Grid,
        shot_cooldown_ms: u64,
    ) -> Self {
        let length = length.max(1);
        let behind = direction.opposite();
        let mut positions = VecDeque::with_capacity(length as usize + 1);
        let mut cell = head;
        positions.push_back(cell);
        for _ in 1..length {
            cell = grid.step(cell, behind);
            positions.push_back(cell);
        }

        Self {
            positions,
            direction,
            pending_direction: direction,
            growth_pending: false,
            length,
            speed_boost_ticks: 0,
            shield_active: false,
            shield_ticks: 0,
            can_shoot: false,
            shoot_ticks: 0,
            last_shot_ms: None,
            shot_cooldown_ms,
        }
    }

    /// Round-start snake: centred, facing right
    pub fn spawn(config: &GameConfig, grid: &Grid) -> Self {
        Self::new(
            grid.center(),
            Direction::Right,
            config.initial_snake_length,
            grid,
            config.shot_cooldown_ms,
        )
    }

    pub fn head(&self) -> Cell {
        // positions is never empty: built with length >= 1 and only grows or
        // trades a tail cell for a new head
        self.positions[0]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.positions.contains(&cell)
    }

    /// Buffer the next facing. Reversal is ignored unless the snake is a
    /// single segment.
    pub fn set_pending_direction(&mut self, dir: Direction) {
        if self.positions.len() > 1 && dir == self.direction.opposite() {
            return;
        }
        self.pending_direction = dir;
    }

    pub fn next_head(&self, grid: &Grid) -> Cell {
        grid.step(self.head(), self.pending_direction)
    }

    /// Step one cell in the pending direction.
    ///
    /// The tail cell is excluded from the collision check unless growth is
    /// pending, since it vacates on the same step. On failure nothing moves.
    pub fn advance(&mut self, grid: &Grid) -> Result<(), SelfCollision> {
        let new_head = self.next_head(grid);
        let checked = if self.growth_pending {
            self.positions.len()
        } else {
            self.positions.len() - 1
        };
        if self.positions.iter().take(checked).any(|&c| c == new_head) {
            return Err(SelfCollision { at: new_head });
        }
        self.step_to(new_head);
        Ok(())
    }

    /// Step even though the new head overlaps the body (shield forgiveness)
    pub fn advance_through(&mut self, grid: &Grid) {
        let new_head = self.next_head(grid);
        self.step_to(new_head);
    }

    fn step_to(&mut self, new_head: Cell) {
        self.positions.push_front(new_head);
        self.direction = self.pending_direction;
        if self.growth_pending {
            self.growth_pending = false;
        } else {
            self.positions.pop_back();
        }
    }

    /// Grow by one segment on the next step. `length` counts the segment
    /// immediately; the body catches up when the step lands.
    pub fn request_grow(&mut self) {
        if !self.growth_pending {
            self.growth_pending = true;
            self.length += 1;
        }
    }

    pub fn activate_speed_boost(&mut self, ticks: u32) {
        self.speed_boost_ticks = ticks;
    }

    pub fn activate_shield(&mut self, ticks: u32) {
        self.shield_active = ticks > 0;
        self.shield_ticks = ticks;
    }

    pub fn activate_bullet_powerup(&mut self, ticks: u32) {
        self.can_shoot = ticks > 0;
        self.shoot_ticks = ticks;
    }

    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost_ticks > 0
    }

    /// Count down active effects; each drops exactly when its timer hits zero
    pub fn tick_powerups(&mut self) {
        self.speed_boost_ticks = self.speed_boost_ticks.saturating_sub(1);

        if self.shield_active {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.shield_active = false;
            }
        }

        if self.can_shoot {
            self.shoot_ticks = self.shoot_ticks.saturating_sub(1);
            if self.shoot_ticks == 0 {
                self.can_shoot = false;
            }
        }
    }

    /// Fire upward from the head if shooting is unlocked and off cooldown
    pub fn try_shoot(&mut self, now_ms: u64, config: &GameConfig) -> Option<Bullet> {
        if !self.can_shoot {
            return None;
        }
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) < self.shot_cooldown_ms {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);

        let head = self.head();
        let size = config.cell_size;
        let origin = Vec2::new(head.x as f32 * size + size / 2.0, head.y as f32 * size);
        Some(Bullet::new(origin, Heading::Up, config))
    }
}
