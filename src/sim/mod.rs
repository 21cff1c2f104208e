//! Grid simulation
//!
//! Everything that decides what happens in a round. Given the same seed,
//! config and input stream a round replays identically: the only clock
//! reading is the timestamp handed to `tick`, randomness comes from the
//! round's own PCG stream, and entities are visited in spawn order.

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod grid;
pub mod snake;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use difficulty::Difficulty;
pub use entities::{Body, Bullet, Fall, Food, Heading, Invader, Lifecycle, PowerUp, PowerUpKind};
pub use grid::{Cell, Direction, Grid};
pub use snake::{SelfCollision, Snake};
pub use snapshot::{BulletView, PowerUpView, SnakeView, Snapshot};
pub use spawn::{find_free_cell, place_food, spawn_pass};
pub use state::{GameEvent, GamePhase, GameState, TerminalCause};
pub use tick::{TickInput, tick};
