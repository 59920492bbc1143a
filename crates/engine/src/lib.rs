//! Frame driving for Neon Racer.
//!
//! Connects the pure [`core`] session to the outside world: a [`Clock`] for
//! elapsed time, a [`HighScoreStore`](store::HighScoreStore) for the best
//! score, and env-driven [`RacerConfig`]. Also hosts the [`Autopilot`] used by
//! the headless simulator and the benchmarks.

pub mod autopilot;
pub mod clock;
pub mod config;
pub mod driver;
pub mod replay;

pub use neon_racer_core as core;
pub use neon_racer_store as store;
pub use neon_racer_types as types;

pub use autopilot::Autopilot;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{
    load_tuning, log_filter_from, ConfigError, RacerConfig, DEFAULT_LOG_FILTER, LOG_FILTER_VAR,
};
pub use driver::{Driver, MAX_PENDING_INTENTS};
pub use replay::{replay, RaceResult, ReplayPlan};
