//! Collision detection and per-tick resolution
//!
//! Grid entities collide by exact cell match with the snake head. Bullets are
//! narrower than a cell, so anything involving a bullet is a rectangle overlap
//! test in screen units.
//!
//! Resolution runs in a fixed order each tick (self-collision, food, invaders,
//! power-ups, bullets). Moving entities are advanced inside their pass, so
//! movement and contact are interleaved per entity class.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Body, Heading, Lifecycle, PowerUpKind};
use super::grid::Cell;
use super::spawn::place_food;
use super::state::{GameEvent, GameState, TerminalCause};

/// Axis-aligned rectangle in screen units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    /// Full rectangle of a grid cell
    pub fn cell(cell: Cell, cell_size: f32) -> Self {
        Self::new(
            Vec2::new(cell.x as f32, cell.y as f32) * cell_size,
            Vec2::splat(cell_size),
        )
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Move the snake and settle self-collision. Returns `false` if the round ended.
///
/// An active shield forgives the collision: the snake steps through its own
/// body and the shield timer is left untouched.
pub fn resolve_snake_move(state: &mut GameState) -> bool {
    match state.snake.advance(&state.grid) {
        Ok(()) => true,
        Err(hit) if state.snake.shield_active => {
            log::trace!("Shield forgave self-collision at {:?}", hit.at);
            state.snake.advance_through(&state.grid);
            state.events.push(GameEvent::SelfCollisionForgiven { at: hit.at });
            true
        }
        Err(_) => {
            state.end_round(TerminalCause::SelfCollision);
            false
        }
    }
}

/// Head on the strawberry: grow, score, relocate
pub fn resolve_food(state: &mut GameState) {
    let head = state.snake.head();
    if head != state.food.position {
        return;
    }
    state.snake.request_grow();
    state.events.push(GameEvent::FoodEaten { at: head });
    state.award(state.config.points.food);
    place_food(state);
}

/// Advance invaders, settle head contact, let survivors fire.
/// Returns `false` if the round ended.
pub fn resolve_invaders(state: &mut GameState) -> bool {
    let config = &state.config;
    let head = state.snake.head();
    let shielded = state.snake.shield_active;
    let rng = &mut state.rng;
    let events = &mut state.events;

    let mut fired = Vec::new();
    let mut shield_kills = 0u64;
    let mut contact = false;

    state.invaders.retain_mut(|invader| {
        if contact {
            return true;
        }
        if invader.advance(config) == Lifecycle::Expired {
            return false;
        }
        if invader.cell() == head {
            if shielded {
                shield_kills += 1;
                events.push(GameEvent::InvaderShielded { at: head });
                return false;
            }
            contact = true;
            return true;
        }
        if let Some(bullet) = invader.maybe_fire(rng, config) {
            fired.push(bullet);
        }
        true
    });

    state.bullets.extend(fired);
    state.award(shield_kills * state.config.points.shield_kill);

    if contact {
        state.end_round(TerminalCause::InvaderContact);
        return false;
    }
    true
}

/// Advance power-ups and apply any the head collects
pub fn resolve_powerups(state: &mut GameState) {
    let config = &state.config;
    let head = state.snake.head();
    let mut collected = Vec::new();

    state.powerups.retain_mut(|powerup| {
        if powerup.advance(config) == Lifecycle::Expired {
            return false;
        }
        if powerup.cell() == head {
            collected.push((powerup.kind, powerup.active_duration));
            return false;
        }
        true
    });

    for (kind, ticks) in collected {
        match kind {
            PowerUpKind::Speed => state.snake.activate_speed_boost(ticks),
            PowerUpKind::Shield => state.snake.activate_shield(ticks),
            PowerUpKind::Bullet => state.snake.activate_bullet_powerup(ticks),
        }
        log::debug!("Collected {:?} power-up ({} ticks)", kind, ticks);
        state.events.push(GameEvent::PowerUpCollected { kind });
        state.award(state.config.points.powerup);
    }
}

/// Advance bullets and settle hits. Returns `false` if the round ended.
///
/// Upward bullets remove the first invader they overlap (iteration order).
/// Downward bullets end the round on any segment, except that a shielded head
/// absorbs them when it is the first segment hit.
pub fn resolve_bullets(state: &mut GameState) -> bool {
    let config = &state.config;
    let snake = &state.snake;
    let invaders = &mut state.invaders;
    let events = &mut state.events;

    let mut shot_kills = 0u64;
    let mut hit_snake = false;

    state.bullets.retain_mut(|bullet| {
        if hit_snake {
            return true;
        }
        if bullet.advance(config) == Lifecycle::Expired {
            return false;
        }
        let rect = bullet.bounds(config);
        match bullet.heading {
            Heading::Up => {
                let target = invaders
                    .iter()
                    .position(|invader| rect.overlaps(&invader.bounds(config)));
                match target {
                    Some(index) => {
                        let invader = invaders.remove(index);
                        shot_kills += 1;
                        events.push(GameEvent::InvaderShot { at: invader.cell() });
                        false
                    }
                    None => true,
                }
            }
            Heading::Down => {
                let segment = snake
                    .positions
                    .iter()
                    .position(|&cell| rect.overlaps(&Rect::cell(cell, config.cell_size)));
                match segment {
                    Some(0) if snake.shield_active => {
                        events.push(GameEvent::BulletAbsorbed);
                        false
                    }
                    Some(_) => {
                        hit_snake = true;
                        true
                    }
                    None => true,
                }
            }
        }
    });

    state.award(shot_kills * state.config.points.shot_kill);

    if hit_snake {
        state.end_round(TerminalCause::BulletHit);
        return false;
    }
    true
}
