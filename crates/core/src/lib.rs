//! Core race logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It has no
//! dependencies on terminals, clocks or storage:
//!
//! - **Deterministic**: the same random source and inputs replay the same race
//! - **Testable**: time only moves when the caller says so
//! - **Fast**: fixed-capacity containers, no allocation per tick
//!
//! # Module Structure
//!
//! - [`entity`]: obstacles, power-ups and the active modifier slot
//! - [`rng`]: the injectable [`RandomSource`] and its implementations
//! - [`scoring`]: dodge points, combo multiplier, level progression
//! - [`spawner`]: spawn rolls for traffic and pickups
//! - [`session`]: the [`GameSession`] state machine
//! - [`snapshot`]: read-only frame state for presenters
//!
//! # Rules
//!
//! - Three lanes; the player steers one lane at a time and can jump for 600ms
//! - Traffic (car, truck, bike) spawns at the top and drives toward the player
//! - Passing the player line unharmed is a dodge: points scale with the combo
//! - A hit costs a life, resets the combo and grants 1500ms of invincibility
//! - Every 15 dodges is a level: faster world, denser traffic
//! - Power-ups (shield, slow motion, double points) last a few seconds
//!
//! # Example
//!
//! ```
//! use neon_racer_core::{GameSession, SimpleRng};
//! use neon_racer_types::{GameIntent, GamePhase, Tuning};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut session = GameSession::new(0, Tuning::default());
//!
//! session.advance(16, &[GameIntent::Start, GameIntent::MoveLeft], &mut rng);
//! assert_eq!(session.phase(), GamePhase::Playing);
//!
//! for _ in 0..100 {
//!     session.advance(16, &[], &mut rng);
//! }
//! assert_eq!(session.now_ms(), 101 * 16);
//! ```

pub mod entity;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod spawner;

pub use neon_racer_types as types;

pub use entity::{ActivePowerUp, Obstacle, PowerUp};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{combo_multiplier_tenths, dodge_points, level_for_dodges};
pub use session::{GameSession, TickReport, MAX_OBSTACLES, MAX_POWER_UPS};
pub use snapshot::{ActivePowerUpView, ObstacleView, PowerUpView, SessionSnapshot};
