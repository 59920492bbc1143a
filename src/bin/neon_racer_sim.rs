//! Headless Neon Racer: replays autopilot races and prints a JSON summary.
//!
//! Nothing touches the terminal or the disk. The same arguments always print
//! the same summary, which makes this handy for tuning experiments:
//!
//! ```text
//! neon-racer-sim --seed 42 --sessions 10 --tuning tuning.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use neon_racer::core::SimpleRng;
use neon_racer::engine::{
    load_tuning, log_filter_from, replay, Autopilot, Driver, ManualClock, RaceResult, ReplayPlan,
    DEFAULT_LOG_FILTER,
};
use neon_racer::store::{KvHighScore, MemoryStore, HIGH_SCORE_KEY};
use neon_racer::types::{Tuning, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "neon-racer-sim", version, about = "Replay autopilot races without a terminal")]
struct Args {
    /// Seed for the spawn random source.
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Races to run back to back.
    #[arg(long, default_value_t = 5)]
    sessions: u32,

    /// Ticks per race before it is abandoned.
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u32,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = TICK_MS, value_parser = clap::value_parser!(u32).range(1..))]
    tick_ms: u32,

    /// JSON tuning table; missing fields keep their defaults.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// High score already on record.
    #[arg(long, default_value_t = 0)]
    high_score: u32,

    /// Pretty-print the summary.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct RaceSummary {
    session: u32,
    score: u32,
    level: u32,
    dodged: u32,
    ticks: u32,
    finished: bool,
    new_high_score: bool,
}

#[derive(Debug, Serialize)]
struct SimSummary {
    seed: u32,
    tick_ms: u32,
    sessions: Vec<RaceSummary>,
    high_score: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };

    let mut store = MemoryStore::new();
    if args.high_score > 0 {
        store = store.with_entry(HIGH_SCORE_KEY, &args.high_score.to_string());
    }
    let mut driver = Driver::new(
        KvHighScore::new(store),
        SimpleRng::new(args.seed),
        ManualClock::new(0),
        tuning,
    );

    let plan = ReplayPlan {
        races: args.sessions,
        max_frames: args.max_ticks,
        frame_ms: args.tick_ms,
    };
    let results = replay(&mut driver, Autopilot::default(), &plan);

    let summary = SimSummary {
        seed: args.seed,
        tick_ms: args.tick_ms,
        sessions: results.iter().zip(0..).map(summarize).collect(),
        high_score: driver.stored_high_score(),
    };
    let out = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{out}");
    Ok(())
}

fn summarize((r, session): (&RaceResult, u32)) -> RaceSummary {
    RaceSummary {
        session,
        score: r.score,
        level: r.level,
        dodged: r.dodged,
        ticks: r.frames,
        finished: r.finished,
        new_high_score: r.new_high_score,
    }
}

fn init_tracing() {
    let directive = log_filter_from(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
