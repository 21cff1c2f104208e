//! Cosmic Snake entry point
//!
//! Headless runner: plays rounds with the demo autopilot and reports the
//! session scoreboard. Frontends drive `GameLoop` directly instead.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use cosmic_snake::sim::GamePhase;
use cosmic_snake::{Clock, Command, GameConfig, GameLoop, ManualClock, autopilot};

#[derive(Parser, Debug)]
#[command(name = "cosmic-snake", version, about = "Headless Cosmic Snake runner")]
struct Args {
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Tick limit per round
    #[arg(long, default_value_t = 5_000)]
    max_ticks: u64,

    /// Rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep the tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Cosmic Snake (headless) starting with seed {seed}");

    if args.realtime {
        let game = GameLoop::new(config, seed);
        run(game, &args, |_, interval| std::thread::sleep(interval))
    } else {
        let game = GameLoop::with_clock(config, seed, ManualClock::default());
        run(game, &args, |game, interval| game.clock_mut().advance(interval))
    }
}

/// Play the requested rounds; `pace` waits out (or simulates) one tick interval
fn run<C: Clock>(
    mut game: GameLoop<C>,
    args: &Args,
    mut pace: impl FnMut(&mut GameLoop<C>, Duration),
) -> anyhow::Result<()> {
    for round in 1..=args.rounds {
        if round > 1 {
            game.handle(Command::StartRound);
        }

        while game.phase() == GamePhase::Playing && game.state().time_ticks < args.max_ticks {
            for command in autopilot::next_commands(game.state()) {
                game.handle(command);
            }
            let interval = game.tick_interval();
            game.step();
            pace(&mut game, interval);
        }

        let state = game.state();
        match state.terminal_cause {
            Some(cause) => log::info!(
                "Round {round}: score {} level {} after {} ticks ({cause:?})",
                state.score,
                state.level(),
                state.time_ticks
            ),
            None => log::info!(
                "Round {round}: tick limit reached with score {} level {}",
                state.score,
                state.level()
            ),
        }
    }

    print_scoreboard(&game);
    if args.json {
        let json = game
            .snapshot()
            .to_json()
            .context("failed to serialize snapshot")?;
        println!("{json}");
    }
    game.handle(Command::Quit);
    Ok(())
}

fn print_scoreboard<C: Clock>(game: &GameLoop<C>) {
    let board = game.scoreboard();
    if board.is_empty() {
        println!("No finished rounds scored.");
        return;
    }
    println!("Rank  Score  Level  Ticks");
    for (i, entry) in board.entries.iter().enumerate() {
        println!(
            "{:>4}  {:>5}  {:>5}  {:>5}",
            i + 1,
            entry.score,
            entry.level,
            entry.ticks
        );
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
