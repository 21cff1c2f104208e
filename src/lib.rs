//! Cosmic Snake - grid snake under an invader shower
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `game`: Round orchestration, pause/restart, command buffering
//! - `config`: Data-driven game balance
//! - `scoreboard`: In-memory session leaderboard
//! - `autopilot`: Demo player producing abstract commands

pub mod autopilot;
pub mod config;
pub mod game;
pub mod scoreboard;
pub mod sim;

pub use config::{ConfigError, GameConfig, Points};
pub use game::{Clock, Command, GameLoop, ManualClock, MonotonicClock};
pub use scoreboard::Scoreboard;

/// Default tuning values (overridable through [`GameConfig`])
pub mod consts {
    /// Playfield dimensions in cells
    pub const GRID_WIDTH: i32 = 40;
    pub const GRID_HEIGHT: i32 = 30;
    /// Size of one cell in screen units (pixels)
    pub const CELL_SIZE: f32 = 20.0;

    /// Base simulation rate (ticks per second)
    pub const BASE_TICK_RATE: u32 = 10;
    /// Extra ticks per second while the speed boost is active
    pub const SPEED_BOOST_RATE_BONUS: u32 = 5;

    /// Invader fall speed in cells per second at the base rate
    pub const INVADER_SPEED: f32 = 1.5;
    /// Probability of an invader spawn roll succeeding each tick
    pub const INVADER_SPAWN_RATE: f64 = 0.02;
    pub const MAX_INVADERS: usize = 10;
    /// Probability of each invader firing each tick
    pub const INVADER_FIRE_RATE: f64 = 0.005;

    /// Second roll a power-up spawn needs after the spawn roll passes
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.1;
    /// Power-ups drift slightly slower than invaders
    pub const POWERUP_SPEED: f32 = INVADER_SPEED * 0.8;

    /// Power-up durations in ticks (seconds * base rate)
    pub const SPEED_BOOST_TICKS: u32 = 5 * BASE_TICK_RATE;
    pub const SHIELD_TICKS: u32 = 5 * BASE_TICK_RATE;
    pub const BULLET_POWERUP_TICKS: u32 = 10 * BASE_TICK_RATE;

    /// Minimum time between two snake shots
    pub const SHOT_COOLDOWN_MS: u64 = 500;

    /// Bullets move in screen units per tick
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;

    pub const INITIAL_SNAKE_LENGTH: u32 = 3;

    /// Every this many points is one level
    pub const LEVEL_SCORE_STEP: u64 = 50;
    pub const SPAWN_RATE_STEP: f64 = 0.01;
    pub const SPEED_MULTIPLIER_STEP: f32 = 0.2;

    /// Random probes before food placement scans for a free cell
    pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;
}
