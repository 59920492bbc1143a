//! Runtime configuration from environment variables.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::{Tuning, TuningError, TICK_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("tuning file {path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tuning file {path} is out of range: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: TuningError,
    },
}

/// Variable holding the tracing filter directive for both binaries.
pub const LOG_FILTER_VAR: &str = "NEON_RACER_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Tracing filter directive from [`LOG_FILTER_VAR`], or [`DEFAULT_LOG_FILTER`].
pub fn log_filter_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_FILTER_VAR)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Interactive runner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RacerConfig {
    pub seed: u32,
    pub save_path: PathBuf,
    pub tick_ms: u32,
    /// Always show the on-screen control strip.
    pub force_touch: bool,
    pub tuning_path: Option<PathBuf>,
    /// Theme override; wins over the stored preference.
    pub theme: Option<String>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl RacerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RacerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("NEON_RACER_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(wall_clock_seed);

        let save_path = non_empty("NEON_RACER_SAVE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("neon-racer.json"));

        let tick_ms = non_empty("NEON_RACER_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(TICK_MS);

        let force_touch = non_empty("NEON_RACER_TOUCH")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            seed,
            save_path,
            tick_ms,
            force_touch,
            tuning_path: non_empty("NEON_RACER_TUNING").map(PathBuf::from),
            theme: non_empty("NEON_RACER_THEME"),
            log_path: non_empty("NEON_RACER_LOG_PATH").map(PathBuf::from),
            log_filter: log_filter_from(&lookup),
        }
    }

    /// Tuning from `tuning_path`, or the defaults when none is configured.
    pub fn tuning(&self) -> Result<Tuning, ConfigError> {
        match &self.tuning_path {
            Some(path) => load_tuning(path),
            None => Ok(Tuning::default()),
        }
    }
}

/// Read a (possibly partial) tuning table from a JSON file and validate it.
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning: Tuning = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tuning.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tuning)
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
