//! Game state and core simulation types
//!
//! A round owns exactly one snake and one strawberry plus the falling and
//! flying entities; all of it is rebuilt when a new round starts.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::entities::{Bullet, Food, Invader, PowerUp, PowerUpKind};
use super::grid::{Cell, Grid};
use super::snake::Snake;
use super::spawn::place_food;
use crate::config::GameConfig;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Halted by the orchestrator; nothing ticks
    Paused,
    /// Round ended
    GameOver,
}

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    SelfCollision,
    InvaderContact,
    BulletHit,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    SelfCollisionForgiven { at: Cell },
    FoodEaten { at: Cell },
    LevelUp { level: u32 },
    InvaderShielded { at: Cell },
    PowerUpCollected { kind: PowerUpKind },
    InvaderShot { at: Cell },
    BulletAbsorbed,
    RoundOver { cause: TerminalCause },
}

/// Complete round state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub difficulty: Difficulty,
    pub snake: Snake,
    pub food: Food,
    /// Active invaders, in spawn order
    pub invaders: Vec<Invader>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub terminal_cause: Option<TerminalCause>,
}

impl GameState {
    /// Fresh round: centred snake, strawberry on a free cell
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Snake::spawn(&config, &grid);
        let difficulty = Difficulty::new(&config);

        let mut state = Self {
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            time_ticks: 0,
            score: 0,
            difficulty,
            snake,
            food: Food {
                position: Cell::default(),
            },
            invaders: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            terminal_cause: None,
            config,
        };

        place_food(&mut state);
        state
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add points and apply any level-ups they cross
    pub fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        let gained = self.difficulty.sync(self.score, &self.config);
        for offset in (0..gained).rev() {
            let level = self.difficulty.level - offset;
            log::debug!(
                "Level {} reached (spawn rate {:.3}, speed x{:.1})",
                level,
                self.difficulty.invader_spawn_rate,
                self.difficulty.invader_speed_multiplier
            );
            self.events.push(GameEvent::LevelUp { level });
        }
    }

    /// Terminal transition; the first cause wins
    pub fn end_round(&mut self, cause: TerminalCause) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.terminal_cause = Some(cause);
        self.events.push(GameEvent::RoundOver { cause });
        log::info!(
            "Round over ({:?}) after {} ticks: score {}, level {}",
            cause,
            self.time_ticks,
            self.score,
            self.level()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_layout() {
        let state = GameState::new(GameConfig::default(), 1234);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.head(), Cell::new(20, 15));
        assert_eq!(state.snake.positions.len(), 3);
        assert_eq!(state.level(), 1);
        assert!(!state.snake.occupies(state.food.position));
        assert!(state.grid.contains(state.food.position));
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(GameConfig::default(), 77);
        let b = GameState::new(GameConfig::default(), 77);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_award_emits_level_up_events() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.award(45);
        assert!(state.events.is_empty());
        state.award(60);
        assert_eq!(state.score, 105);
        assert_eq!(
            state.events,
            vec![GameEvent::LevelUp { level: 2 }, GameEvent::LevelUp { level: 3 }]
        );
    }

    #[test]
    fn test_first_terminal_cause_wins() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.end_round(TerminalCause::InvaderContact);
        state.end_round(TerminalCause::BulletHit);
        assert_eq!(state.terminal_cause, Some(TerminalCause::InvaderContact));
        assert_eq!(state.events.len(), 1);
    }
}
