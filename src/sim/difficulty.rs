//! Difficulty curve driven by cumulative score

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level: u32,
    /// Per-tick probability of the invader spawn roll passing
    pub invader_spawn_rate: f64,
    /// Scales the base invader speed for newly spawned invaders
    pub invader_speed_multiplier: f32,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 1,
            invader_spawn_rate: config.invader_spawn_rate,
            invader_speed_multiplier: 1.0,
        }
    }

    /// Nominal level for a score: one level per `level_score_step` points
    pub fn level_for_score(score: u64, config: &GameConfig) -> u32 {
        let steps = score / config.level_score_step;
        1 + u32::try_from(steps).unwrap_or(u32::MAX - 1)
    }

    /// Apply one additive increment per level crossed since the last sync.
    /// Returns the number of level-ups applied.
    pub fn sync(&mut self, score: u64, config: &GameConfig) -> u32 {
        let target = Self::level_for_score(score, config);
        let mut gained = 0;
        while self.level < target {
            self.level += 1;
            self.invader_spawn_rate += config.spawn_rate_step;
            self.invader_speed_multiplier += config.speed_multiplier_step;
            gained += 1;
        }
        gained
    }

    /// Speed of an invader spawned now
    pub fn invader_speed(&self, config: &GameConfig) -> f32 {
        config.invader_speed * self.invader_speed_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_level_one() {
        let config = GameConfig::default();
        let difficulty = Difficulty::new(&config);
        assert_eq!(difficulty.level, 1);
        assert_eq!(difficulty.invader_spawn_rate, config.invader_spawn_rate);
        assert_eq!(difficulty.invader_speed_multiplier, 1.0);
    }

    #[test]
    fn test_one_level_per_fifty_points() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        let mut level_ups = 0;
        for score in (10..=100).step_by(10) {
            level_ups += difficulty.sync(score, &config);
        }
        assert_eq!(level_ups, 2);
        assert_eq!(difficulty.level, 3);
        assert!((difficulty.invader_spawn_rate - 0.04).abs() < 1e-9);
        assert!((difficulty.invader_speed_multiplier - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        assert_eq!(difficulty.sync(100, &config), 2);
        assert_eq!(difficulty.sync(100, &config), 0);
        assert_eq!(difficulty.sync(120, &config), 0);
        assert_eq!(difficulty.level, 3);
    }

    #[test]
    fn test_jump_across_several_levels() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        assert_eq!(difficulty.sync(175, &config), 3);
        assert_eq!(difficulty.level, Difficulty::level_for_score(175, &config));
    }

    #[test]
    fn test_speed_scales_with_multiplier() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        difficulty.sync(50, &config);
        assert!((difficulty.invader_speed(&config) - 1.8).abs() < 1e-5);
    }
}
