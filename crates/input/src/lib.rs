//! Input mapping (engine-facing).
//!
//! This crate is independent of any UI framework beyond `crossterm` key
//! codes. It maps key events into [`crate::types::GameIntent`], de-duplicates
//! held keys (including on terminals without key-release events), recognizes
//! swipes and on-screen taps, and drops intents that are invalid in the
//! current phase.

pub mod handler;
pub mod map;
pub mod touch;

pub use neon_racer_types as types;

pub use handler::InputMapper;
pub use map::{handle_key_event, is_theme_key, map_key, should_quit};
pub use touch::{
    is_touch_viewport, SwipeTracker, TapTarget, SWIPE_THRESHOLD_CELLS, SWIPE_THRESHOLD_PX,
};
