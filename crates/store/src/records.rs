//! Typed records on top of a [`KeyValueStore`].

use tracing::warn;

use crate::kv::{KeyValueStore, StoreError};

/// Storage key of the best score.
pub const HIGH_SCORE_KEY: &str = "neon-racer-high-score";

/// Storage key of the selected color theme.
pub const THEME_KEY: &str = "portfolio-theme";

/// Where the best score lives between runs.
pub trait HighScoreStore {
    /// The stored best score; 0 when nothing (valid) is stored.
    fn high_score(&self) -> u32;

    fn set_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// High score kept as a decimal string under [`HIGH_SCORE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct KvHighScore<S> {
    store: S,
}

impl<S: KeyValueStore> KvHighScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> HighScoreStore for KvHighScore<S> {
    fn high_score(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(text)) => parse_score(&text),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "high score unavailable");
                0
            }
        }
    }

    fn set_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.store.set(HIGH_SCORE_KEY, &score.to_string())
    }
}

fn parse_score(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// Stored theme name, if any.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    match store.get(THEME_KEY) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "theme preference unavailable");
            None
        }
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, name: &str) -> Result<(), StoreError> {
    store.set(THEME_KEY, name)
}
