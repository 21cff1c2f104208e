//! Game balance configuration
//!
//! Loaded once per session (JSON, any subset of fields) and never mutated by
//! the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
}

/// Points awarded per scoring event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Points {
    pub food: u64,
    /// Invader destroyed by running into it with the shield up
    pub shield_kill: u64,
    pub powerup: u64,
    /// Invader destroyed by a snake bullet
    pub shot_kill: u64,
}

impl Default for Points {
    fn default() -> Self {
        Self {
            food: 10,
            shield_kill: 5,
            powerup: 15,
            shot_kill: 20,
        }
    }
}

/// Tuning table for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: f32,

    // === Timing ===
    pub base_tick_rate: u32,
    pub speed_boost_rate_bonus: u32,
    pub shot_cooldown_ms: u64,

    // === Invaders ===
    pub invader_speed: f32,
    pub invader_spawn_rate: f64,
    pub max_invaders: usize,
    pub invader_fire_rate: f64,

    // === Power-ups ===
    pub powerup_spawn_chance: f64,
    pub powerup_speed: f32,
    pub speed_boost_ticks: u32,
    pub shield_ticks: u32,
    pub bullet_powerup_ticks: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,

    // === Snake ===
    pub initial_snake_length: u32,
    pub food_placement_attempts: u32,

    // === Difficulty ===
    pub level_score_step: u64,
    pub spawn_rate_step: f64,
    pub speed_multiplier_step: f32,

    pub points: Points,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,

            base_tick_rate: BASE_TICK_RATE,
            speed_boost_rate_bonus: SPEED_BOOST_RATE_BONUS,
            shot_cooldown_ms: SHOT_COOLDOWN_MS,

            invader_speed: INVADER_SPEED,
            invader_spawn_rate: INVADER_SPAWN_RATE,
            max_invaders: MAX_INVADERS,
            invader_fire_rate: INVADER_FIRE_RATE,

            powerup_spawn_chance: POWERUP_SPAWN_CHANCE,
            powerup_speed: POWERUP_SPEED,
            speed_boost_ticks: SPEED_BOOST_TICKS,
            shield_ticks: SHIELD_TICKS,
            bullet_powerup_ticks: BULLET_POWERUP_TICKS,

            bullet_speed: BULLET_SPEED,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,

            initial_snake_length: INITIAL_SNAKE_LENGTH,
            food_placement_attempts: FOOD_PLACEMENT_ATTEMPTS,

            level_score_step: LEVEL_SCORE_STEP,
            spawn_rate_step: SPAWN_RATE_STEP,
            speed_multiplier_step: SPEED_MULTIPLIER_STEP,

            points: Points::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::Invalid("grid dimensions must be positive"));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid("cell_size must be positive"));
        }
        if self.base_tick_rate == 0 {
            return Err(ConfigError::Invalid("base_tick_rate must be non-zero"));
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid("initial_snake_length must be non-zero"));
        }
        if self.initial_snake_length as i64 > self.grid_width as i64 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must fit within the grid width",
            ));
        }
        if self.level_score_step == 0 {
            return Err(ConfigError::Invalid("level_score_step must be non-zero"));
        }
        if !(self.bullet_width > 0.0 && self.bullet_height > 0.0) {
            return Err(ConfigError::Invalid("bullet dimensions must be positive"));
        }
        for (field, value) in [
            ("invader_spawn_rate", self.invader_spawn_rate),
            ("invader_fire_rate", self.invader_fire_rate),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }
        Ok(())
    }

    /// Playfield size in screen units
    pub fn screen_width(&self) -> f32 {
        self.grid_width as f32 * self.cell_size
    }

    pub fn screen_height(&self) -> f32 {
        self.grid_height as f32 * self.cell_size
    }

    /// Ticks per second, raised while the speed boost is active
    pub fn tick_rate(&self, boosted: bool) -> u32 {
        if boosted {
            self.base_tick_rate + self.speed_boost_rate_bonus
        } else {
            self.base_tick_rate
        }
    }
}
