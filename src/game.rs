//! Round orchestration
//!
//! `GameLoop` owns the single `GameState`, buffers commands between ticks and
//! drives the Playing / Paused / GameOver transitions. Callers pace it: call
//! [`GameLoop::step`] once per [`GameLoop::tick_interval`].

use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::scoreboard::{RoundRecord, Scoreboard};
use crate::sim::{Direction, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};

/// Monotonic millisecond source for the shot cooldown
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Real monotonic time since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Explicitly advanced clock for headless runs and replays
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self { now_ms }
    }

    pub fn advance(&mut self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms = self.now_ms.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Abstract input from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Direction(Direction),
    Shoot,
    TogglePause,
    StartRound,
    Quit,
}

/// Session orchestrator
pub struct GameLoop<C: Clock = MonotonicClock> {
    config: GameConfig,
    session_seed: u64,
    /// Rounds started this session, including the current one
    round: u32,
    state: GameState,
    pending: TickInput,
    clock: C,
    scoreboard: Scoreboard,
    quit: bool,
}

impl GameLoop<MonotonicClock> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_clock(config, seed, MonotonicClock::new())
    }
}

impl<C: Clock> GameLoop<C> {
    /// Start a session; the first round begins immediately
    pub fn with_clock(config: GameConfig, seed: u64, clock: C) -> Self {
        let state = GameState::new(config.clone(), round_seed(seed, 0));
        log::info!("Round 1 started (seed {})", state.seed);
        Self {
            config,
            session_seed: seed,
            round: 1,
            state,
            pending: TickInput::default(),
            clock,
            scoreboard: Scoreboard::new(),
            quit: false,
        }
    }

    /// Apply a command. Gameplay input is buffered for the next tick and
    /// dropped while paused or after the round ended.
    pub fn handle(&mut self, command: Command) {
        if self.quit {
            return;
        }
        match command {
            Command::Direction(dir) => {
                if self.state.phase == GamePhase::Playing {
                    self.pending.directions.push(dir);
                }
            }
            Command::Shoot => {
                if self.state.phase == GamePhase::Playing {
                    self.pending.shoot = true;
                }
            }
            Command::TogglePause => self.toggle_pause(),
            Command::StartRound => self.start_round(),
            Command::Quit => {
                log::info!("Quit after {} round(s)", self.round);
                self.quit = true;
            }
        }
    }

    /// Throw away the current round and begin a fresh one
    pub fn start_round(&mut self) {
        let seed = round_seed(self.session_seed, self.round);
        self.round += 1;
        self.state = GameState::new(self.config.clone(), seed);
        self.pending.clear();
        log::info!("Round {} started (seed {})", self.round, seed);
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
            self.pending.clear();
            log::debug!("Paused at tick {}", self.state.time_ticks);
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
            log::debug!("Resumed at tick {}", self.state.time_ticks);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => {}
        }
    }

    /// Run one tick with the buffered input and return the resulting frame.
    /// Paused, finished or quit sessions return the current frame unchanged.
    pub fn step(&mut self) -> Snapshot {
        if !self.quit && self.state.phase == GamePhase::Playing {
            let input = std::mem::take(&mut self.pending);
            tick(&mut self.state, &input, self.clock.now_ms());

            if self.state.is_over() {
                self.record_round();
            }
        }
        self.snapshot()
    }

    fn record_round(&mut self) {
        let record = RoundRecord {
            score: self.state.score,
            level: self.state.level(),
            ticks: self.state.time_ticks,
            cause: self.state.terminal_cause,
        };
        if let Some(rank) = self.scoreboard.add(record) {
            log::info!("Score {} placed #{} this session", self.state.score, rank);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Wall-clock time the caller should wait between ticks
    pub fn tick_interval(&self) -> Duration {
        let rate = self.config.tick_rate(self.state.snake.speed_boost_active());
        Duration::from_micros(1_000_000 / u64::from(rate.max(1)))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_running(&self) -> bool {
        !self.quit
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

/// Per-round seed derived from the session seed
fn round_seed(session_seed: u64, round_index: u32) -> u64 {
    session_seed ^ (round_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
