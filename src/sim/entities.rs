//! Food, invaders, bullets and power-ups
//!
//! Falling entities keep an integer column and a continuous row; bullets live
//! in screen units. None of them wrap.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::Cell;
use crate::config::GameConfig;

/// Result of advancing an entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    /// Left the playfield; remove it
    Expired,
}

/// Shared movement/geometry capability of the moving entities
pub trait Body {
    fn advance(&mut self, config: &GameConfig) -> Lifecycle;

    /// Collision rectangle in screen units
    fn bounds(&self, config: &GameConfig) -> Rect;
}

/// The strawberry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Cell,
}

/// Falling entity state shared by invaders and power-ups.
///
/// The row is recomputed from the age rather than summed per tick so that
/// `speed * ticks / base_rate` lands exactly on whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fall {
    pub x: i32,
    pub y: f32,
    /// Cells per second at the base tick rate
    pub speed: f32,
    pub age: u32,
}

impl Fall {
    pub fn new(x: i32, speed: f32) -> Self {
        Self {
            x,
            y: 0.0,
            speed,
            age: 0,
        }
    }

    fn advance(&mut self, config: &GameConfig) -> Lifecycle {
        self.age += 1;
        self.y = self.speed * self.age as f32 / config.base_tick_rate as f32;
        if self.y >= config.grid_height as f32 {
            Lifecycle::Expired
        } else {
            Lifecycle::Active
        }
    }

    /// Grid cell used for exact-match contact with the snake head
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y.floor() as i32)
    }

    fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::cell(self.cell(), config.cell_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invader {
    pub fall: Fall,
}

impl Invader {
    /// New invader at the top of `column`; speed already scaled by difficulty
    pub fn new(column: i32, speed: f32) -> Self {
        Self {
            fall: Fall::new(column, speed),
        }
    }

    pub fn cell(&self) -> Cell {
        self.fall.cell()
    }

    /// Independent per-tick roll to drop a bullet from the bottom of this cell
    pub fn maybe_fire<R: Rng>(&self, rng: &mut R, config: &GameConfig) -> Option<Bullet> {
        if rng.random::<f64>() >= config.invader_fire_rate {
            return None;
        }
        let cell = self.cell();
        let size = config.cell_size;
        let origin = Vec2::new(
            cell.x as f32 * size + size / 2.0,
            cell.y as f32 * size + size,
        );
        Some(Bullet::new(origin, Heading::Down, config))
    }
}

impl Body for Invader {
    fn advance(&mut self, config: &GameConfig) -> Lifecycle {
        self.fall.advance(config)
    }

    fn bounds(&self, config: &GameConfig) -> Rect {
        self.fall.bounds(config)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Shield,
    Bullet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] =
        [PowerUpKind::Speed, PowerUpKind::Shield, PowerUpKind::Bullet];

    /// Effect duration in ticks once collected
    pub fn duration(self, config: &GameConfig) -> u32 {
        match self {
            PowerUpKind::Speed => config.speed_boost_ticks,
            PowerUpKind::Shield => config.shield_ticks,
            PowerUpKind::Bullet => config.bullet_powerup_ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub fall: Fall,
    pub active_duration: u32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, column: i32, config: &GameConfig) -> Self {
        Self {
            kind,
            fall: Fall::new(column, config.powerup_speed),
            active_duration: kind.duration(config),
        }
    }

    pub fn cell(&self) -> Cell {
        self.fall.cell()
    }
}

impl Body for PowerUp {
    fn advance(&mut self, config: &GameConfig) -> Lifecycle {
        self.fall.advance(config)
    }

    fn bounds(&self, config: &GameConfig) -> Rect {
        self.fall.bounds(config)
    }
}

/// Vertical travel direction of a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Fired by the snake; threatens invaders
    Up,
    /// Fired by an invader; threatens the snake
    Down,
}

impl Heading {
    /// -1 up, +1 down (screen y grows downward)
    pub fn sign(self) -> i8 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Centre in screen units
    pub pos: Vec2,
    pub heading: Heading,
    pub speed: f32,
    pub size: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, heading: Heading, config: &GameConfig) -> Self {
        Self {
            pos,
            heading,
            speed: config.bullet_speed,
            size: Vec2::new(config.bullet_width, config.bullet_height),
        }
    }
}

impl Body for Bullet {
    fn advance(&mut self, config: &GameConfig) -> Lifecycle {
        self.pos.y += self.heading.sign() as f32 * self.speed;
        if self.pos.y < 0.0 || self.pos.y > config.screen_height() {
            Lifecycle::Expired
        } else {
            Lifecycle::Active
        }
    }

    fn bounds(&self, _config: &GameConfig) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}
