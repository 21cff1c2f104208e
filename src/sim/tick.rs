//! Fixed-step simulation tick
//!
//! Data flows one way per tick: buffered input, snake step, power-up timers,
//! food, spawning, then invaders, power-ups and bullets (each moved and
//! resolved in its own pass). The whole tick runs atomically between inputs.

use super::collision::{
    resolve_bullets, resolve_food, resolve_invaders, resolve_powerups, resolve_snake_move,
};
use super::grid::Direction;
use super::spawn::spawn_pass;
use super::state::{GameEvent, GamePhase, GameState};

/// Input buffered since the previous tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction requests in arrival order
    pub directions: Vec<Direction>,
    /// Shoot request (at most one shot per tick)
    pub shoot: bool,
}

impl TickInput {
    pub fn clear(&mut self) {
        self.directions.clear();
        self.shoot = false;
    }
}

/// Advance the round by one tick. `now_ms` is a monotonic timestamp used only
/// for the shot cooldown. Does nothing unless the round is playing.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    for &dir in &input.directions {
        state.snake.set_pending_direction(dir);
    }
    if input.shoot {
        if let Some(bullet) = state.snake.try_shoot(now_ms, &state.config) {
            state.bullets.push(bullet);
            state.events.push(GameEvent::ShotFired);
        }
    }

    if !resolve_snake_move(state) {
        return;
    }
    state.snake.tick_powerups();
    resolve_food(state);

    spawn_pass(state);

    if !resolve_invaders(state) {
        return;
    }
    resolve_powerups(state);
    resolve_bullets(state);

    log::trace!(
        "tick {}: score {}, {} invaders, {} bullets, {} power-ups",
        state.time_ticks,
        state.score,
        state.invaders.len(),
        state.bullets.len(),
        state.powerups.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entities::Invader;
    use crate::sim::grid::Cell;
    use crate::sim::snake::Snake;
    use crate::sim::spawn::occupied_cells;
    use crate::sim::state::TerminalCause;
    use std::collections::VecDeque;

    fn quiet_config() -> GameConfig {
        GameConfig {
            invader_spawn_rate: 0.0,
            invader_fire_rate: 0.0,
            ..Default::default()
        }
    }

    fn state_with_snake_at(x: i32, y: i32) -> GameState {
        let mut state = GameState::new(quiet_config(), 12345);
        state.snake = Snake::new(Cell::new(x, y), Direction::Right, 3, &state.grid, 500);
        state.food.position = Cell::new(0, 0);
        state
    }

    #[test]
    fn test_eating_food_end_to_end() {
        let mut state = state_with_snake_at(10, 10);
        state.food.position = Cell::new(11, 10);

        tick(&mut state, &TickInput::default(), 0);

        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.snake.length, 4);
        assert_eq!(state.score, 10);
        assert!(state.events.contains(&GameEvent::FoodEaten {
            at: Cell::new(11, 10)
        }));
        assert!(!occupied_cells(&state).contains(&state.food.position));

        // The body catches up on the following step
        assert_eq!(state.snake.positions.len(), 3);
        tick(&mut state, &TickInput::default(), 100);
        assert_eq!(state.snake.positions.len(), 4);
        assert_eq!(state.snake.length, 4);
    }

    #[test]
    fn test_five_strawberries_level_up() {
        let mut state = state_with_snake_at(5, 5);
        for i in 0..10 {
            state.food.position = Cell::new(6 + i, 5);
            tick(&mut state, &TickInput::default(), 0);
        }
        assert_eq!(state.score, 100);
        assert_eq!(state.level(), 3);
        assert!((state.difficulty.invader_spawn_rate - 0.02).abs() < 1e-9);
        assert!((state.difficulty.invader_speed_multiplier - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut state = state_with_snake_at(10, 10);
        let input = TickInput {
            directions: vec![Direction::Left],
            shoot: false,
        };
        tick(&mut state, &input, 0);
        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_buffered_turns_keep_last_valid() {
        let mut state = state_with_snake_at(10, 10);
        let input = TickInput {
            directions: vec![Direction::Up, Direction::Down],
            shoot: false,
        };
        tick(&mut state, &input, 0);
        assert_eq!(state.snake.head(), Cell::new(10, 11));
    }

    #[test]
    fn test_wraparound_through_tick() {
        let mut state = state_with_snake_at(39, 4);
        tick(&mut state, &TickInput::default(), 0);
        assert_eq!(state.snake.head(), Cell::new(0, 4));
    }

    #[test]
    fn test_shielded_reversal_into_body_survives() {
        let mut state = state_with_snake_at(10, 10);
        // Length-5 hook so the new head lands mid-body
        state.snake.positions = VecDeque::from(vec![
            Cell::new(10, 10),
            Cell::new(11, 10),
            Cell::new(11, 11),
            Cell::new(10, 11),
            Cell::new(9, 11),
        ]);
        state.snake.length = 5;
        state.snake.direction = Direction::Left;
        state.snake.pending_direction = Direction::Left;
        state.snake.activate_shield(30);

        let input = TickInput {
            directions: vec![Direction::Down],
            shoot: false,
        };
        tick(&mut state, &input, 0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.head(), Cell::new(10, 11));
        assert!(state.snake.shield_active);
        // Forgiveness is free; only the normal per-tick countdown applies
        assert_eq!(state.snake.shield_ticks, 29);
        assert!(state.events.contains(&GameEvent::SelfCollisionForgiven {
            at: Cell::new(10, 11)
        }));
    }

    #[test]
    fn test_unshielded_self_collision_is_terminal() {
        let mut state = state_with_snake_at(10, 10);
        state.snake.positions = VecDeque::from(vec![
            Cell::new(10, 10),
            Cell::new(11, 10),
            Cell::new(11, 11),
            Cell::new(10, 11),
            Cell::new(9, 11),
        ]);
        state.snake.direction = Direction::Left;
        state.snake.pending_direction = Direction::Left;

        let input = TickInput {
            directions: vec![Direction::Down],
            shoot: false,
        };
        tick(&mut state, &input, 0);
        assert!(state.is_over());
        assert_eq!(state.terminal_cause, Some(TerminalCause::SelfCollision));

        // Terminal: further ticks are ignored
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), 0);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_invader_expires_after_two_hundred_ticks() {
        let mut state = GameState::new(quiet_config(), 12345);
        // Snake circles down column 30, away from the invader in column 5
        state.snake = Snake::new(Cell::new(30, 10), Direction::Down, 3, &state.grid, 500);
        state.food.position = Cell::new(0, 0);
        state.invaders.push(Invader::new(5, 1.5));

        // 30 rows at 1.5 / 10 rows per tick
        for _ in 0..199 {
            tick(&mut state, &TickInput::default(), 0);
        }
        assert_eq!(state.invaders.len(), 1);
        assert_eq!(state.invaders[0].cell(), Cell::new(5, 29));

        tick(&mut state, &TickInput::default(), 0);
        assert!(state.invaders.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shot_destroys_invader_above() {
        let mut state = state_with_snake_at(10, 10);
        state.snake.activate_bullet_powerup(100);
        // Invader well above the head in the next column the head moves into
        let mut invader = Invader::new(11, 1.5);
        invader.fall.age = 40; // row 6
        state.invaders.push(invader);

        let shoot = TickInput {
            directions: Vec::new(),
            shoot: true,
        };
        tick(&mut state, &shoot, 1_000);
        assert!(state.events.contains(&GameEvent::ShotFired));
        assert_eq!(state.bullets.len(), 1);

        // Bullet fired from column 10; move the invader there to meet it
        state.invaders[0].fall.x = 10;
        for _ in 0..20 {
            if state.invaders.is_empty() {
                break;
            }
            tick(&mut state, &TickInput::default(), 1_000);
        }
        assert!(state.invaders.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_shot_kill_can_cross_a_level() {
        let mut state = state_with_snake_at(10, 10);
        state.score = 40;
        state.snake.activate_bullet_powerup(100);
        let mut invader = Invader::new(10, 1.5);
        invader.fall.age = 40;
        state.invaders.push(invader);

        let shoot = TickInput {
            directions: Vec::new(),
            shoot: true,
        };
        tick(&mut state, &shoot, 1_000);
        assert_eq!(state.level(), 1);

        for _ in 0..20 {
            if state.invaders.is_empty() {
                break;
            }
            tick(&mut state, &TickInput::default(), 1_000);
        }
        assert!(state.invaders.is_empty());
        assert_eq!(state.score, 60);
        assert_eq!(state.level(), 2);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!((state.difficulty.invader_speed_multiplier - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_paused_state_is_frozen() {
        let mut state = state_with_snake_at(10, 10);
        state.phase = GamePhase::Paused;
        let before = state.snake.head();
        tick(&mut state, &TickInput::default(), 0);
        assert_eq!(state.snake.head(), before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_same_seed_and_inputs_replay_identically() {
        let config = GameConfig {
            invader_spawn_rate: 0.3,
            invader_fire_rate: 0.05,
            ..Default::default()
        };
        let mut state1 = GameState::new(config.clone(), 99999);
        let mut state2 = GameState::new(config, 99999);

        let inputs = [
            TickInput {
                directions: vec![Direction::Up],
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                directions: vec![Direction::Left],
                shoot: true,
            },
            TickInput::default(),
        ];

        for (i, input) in inputs.iter().cycle().take(60).enumerate() {
            tick(&mut state1, input, i as u64 * 100);
            tick(&mut state2, input, i as u64 * 100);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.invaders, state2.invaders);
        assert_eq!(state1.bullets, state2.bullets);
        assert_eq!(state1.snake.positions, state2.snake.positions);
        assert_eq!(state1.food, state2.food);
    }
}
