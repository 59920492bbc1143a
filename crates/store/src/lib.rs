//! Persistence for Neon Racer.
//!
//! The game only ever persists two small strings: the best score and the
//! selected color theme. Both go through the [`KeyValueStore`] trait so the
//! terminal binary can keep them in a JSON file while tests and the headless
//! simulator use memory.
//!
//! ```
//! use neon_racer_store::{HighScoreStore, KvHighScore, MemoryStore};
//!
//! let mut scores = KvHighScore::new(MemoryStore::new());
//! assert_eq!(scores.high_score(), 0);
//! scores.set_high_score(250).unwrap();
//! assert_eq!(scores.high_score(), 250);
//! ```

pub mod kv;
pub mod records;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use records::{
    load_theme, save_theme, HighScoreStore, KvHighScore, HIGH_SCORE_KEY, THEME_KEY,
};
