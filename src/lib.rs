//! Neon Racer (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binaries, the
//! integration tests and the benchmarks can use `neon_racer::{core, engine, ...}`.

pub use neon_racer_core as core;
pub use neon_racer_engine as engine;
pub use neon_racer_input as input;
pub use neon_racer_store as store;
pub use neon_racer_term as term;
pub use neon_racer_types as types;
