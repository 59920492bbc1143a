//! Terminal rendering for the race.
//!
//! There are no widgets here. The view paints a plain framebuffer from a
//! session snapshot and the renderer flushes only the cells that changed.
//!
//! - `game_view` is pure and unit-tested
//! - `renderer` owns the terminal (raw mode, alternate screen, mouse capture)
//! - `palette` holds the named color themes

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use neon_racer_core as core;
pub use neon_racer_input as input;
pub use neon_racer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{RaceView, TrackLayout, Viewport, HUD_ROWS, TOUCH_STRIP_ROWS};
pub use palette::{Palette, ThemeId};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
