//! Immutable per-tick view handed to renderers and UI layers

use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;
use super::grid::{Cell, Direction};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    /// Head first
    pub cells: Vec<Cell>,
    pub direction: Direction,
    pub shield_active: bool,
    pub speed_active: bool,
    pub can_shoot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub x: f32,
    pub y: f32,
    /// -1 up (snake), +1 down (invader)
    pub direction: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub x: i32,
    pub y: i32,
}

/// Owned copy of everything a frame needs; never aliases live state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub snake: SnakeView,
    pub food: Cell,
    pub invaders: Vec<Cell>,
    pub bullets: Vec<BulletView>,
    pub powerups: Vec<PowerUpView>,
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let snake = &state.snake;
        Self {
            tick: state.time_ticks,
            snake: SnakeView {
                cells: snake.positions.iter().copied().collect(),
                direction: snake.direction,
                shield_active: snake.shield_active,
                speed_active: snake.speed_boost_active(),
                can_shoot: snake.can_shoot,
            },
            food: state.food.position,
            invaders: state.invaders.iter().map(|i| i.cell()).collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    x: b.pos.x,
                    y: b.pos.y,
                    direction: b.heading.sign(),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| {
                    let cell = p.cell();
                    PowerUpView {
                        kind: p.kind,
                        x: cell.x,
                        y: cell.y,
                    }
                })
                .collect(),
            score: state.score,
            level: state.level(),
            game_over: state.phase == GamePhase::GameOver,
            paused: state.phase == GamePhase::Paused,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
