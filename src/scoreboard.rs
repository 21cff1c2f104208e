//! Session leaderboard
//!
//! Tracks the best finished rounds of the current session, in memory only.

use serde::{Deserialize, Serialize};

use crate::sim::TerminalCause;

/// Maximum number of rounds to keep
pub const MAX_ENTRIES: usize = 10;

/// A finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Ticks survived
    pub ticks: u64,
    pub cause: Option<TerminalCause>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<RoundRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A scoring round places while the board has room or it beats the
    /// lowest kept round.
    pub fn qualifies(&self, score: u64) -> bool {
        match self.entries.get(MAX_ENTRIES - 1) {
            _ if score == 0 => false,
            Some(lowest) => score > lowest.score,
            None => true,
        }
    }

    /// Board position a round with `score` would take, counting from 1.
    /// Equal scores already on the board stay ahead.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score)
            .then(|| self.entries.partition_point(|e| e.score >= score) + 1)
    }

    /// Record a round; returns the rank achieved or None if it didn't place.
    /// Ties keep the earlier round ahead.
    pub fn add(&mut self, record: RoundRecord) -> Option<usize> {
        let rank = self.potential_rank(record.score)?;
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u64) -> RoundRecord {
        RoundRecord {
            score,
            level: 1,
            ticks: 0,
            cause: None,
        }
    }

    #[test]
    fn test_zero_never_places() {
        let mut board = Scoreboard::new();
        assert_eq!(board.add(record(0)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut board = Scoreboard::new();
        assert_eq!(board.add(record(30)), Some(1));
        assert_eq!(board.add(record(80)), Some(1));
        assert_eq!(board.add(record(50)), Some(2));
        assert_eq!(board.add(record(50)), Some(3));
        let scores: Vec<_> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![80, 50, 50, 30]);
        assert_eq!(board.top_score(), Some(80));
    }

    #[test]
    fn test_capped_at_max_entries() {
        let mut board = Scoreboard::new();
        for score in 1..=15 {
            board.add(record(score * 10));
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert!(!board.qualifies(60));
        assert_eq!(board.potential_rank(200), Some(1));
        assert_eq!(board.entries.last().map(|e| e.score), Some(60));
    }
}
