//! Shared types and tuning constants for Neon Racer.
//!
//! Everything here is plain data: the simulation core, the input mapper and the
//! terminal presenter all agree on these definitions and nothing else.
//!
//! # Track geometry
//!
//! The track is three lanes wide. Objects travel along a normalized progress
//! axis measured in "progress units":
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPAWN_PROGRESS` | 0.0 | Spawn edge (top of the track) |
//! | `HIT_BAND_START..=HIT_BAND_END` | 80..=95 | Obstacles here collide with the player |
//! | `PICKUP_BAND_START..=PICKUP_BAND_END` | 80..=100 | Power-ups here are collected |
//! | `SCORING_LINE` | 100.0 | The player line; crossing it uncollided is a dodge |
//! | `OFF_TRACK_PROGRESS` | 115.0 | Objects past this are removed |
//!
//! # Timing
//!
//! Time is measured in milliseconds on the session clock, which only moves when
//! the driver advances the simulation:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal frame interval (~60 FPS) |
//! | `MAX_TICK_MS` | 50 | Largest step simulated at once |
//! | `JUMP_MS` | 600 | Jump window (collisions suppressed) |
//! | `INVINCIBLE_MS` | 1500 | Damage grace window after a hit |
//!
//! # Examples
//!
//! ```
//! use neon_racer_types::{GameIntent, GamePhase, Lane, ObstacleKind};
//!
//! assert_eq!(Lane::Center.left(), Some(Lane::Left));
//! assert_eq!(Lane::Left.left(), None);
//!
//! assert!(GameIntent::Jump.is_valid_in(GamePhase::Playing));
//! assert!(!GameIntent::Jump.is_valid_in(GamePhase::GameOver));
//! assert!(GameIntent::Start.is_valid_in(GamePhase::GameOver));
//!
//! assert!(ObstacleKind::Bike.point_value() > ObstacleKind::Car.point_value());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of lanes on the track.
pub const LANE_COUNT: usize = 3;

/// Nominal frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Largest single step the simulation accepts; longer gaps are clamped.
pub const MAX_TICK_MS: u32 = 50;

/// Lives at the start of every session.
pub const START_LIVES: u8 = 3;

/// Combo counter ceiling.
pub const MAX_COMBO: u32 = 10;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 10;

/// Dodges needed per level.
pub const DODGES_PER_LEVEL: u32 = 15;

pub const SPAWN_PROGRESS: f32 = 0.0;
pub const HIT_BAND_START: f32 = 80.0;
pub const HIT_BAND_END: f32 = 95.0;
pub const PICKUP_BAND_START: f32 = 80.0;
pub const PICKUP_BAND_END: f32 = 100.0;
pub const SCORING_LINE: f32 = 100.0;
pub const OFF_TRACK_PROGRESS: f32 = 115.0;

/// Jump window in milliseconds.
pub const JUMP_MS: u32 = 600;

/// Post-collision invincibility window in milliseconds.
pub const INVINCIBLE_MS: u32 = 1500;

/// One of the three discrete tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The lane one step to the left, if any.
    pub fn left(self) -> Option<Self> {
        match self {
            Lane::Left => None,
            Lane::Center => Some(Lane::Left),
            Lane::Right => Some(Lane::Center),
        }
    }

    /// The lane one step to the right, if any.
    pub fn right(self) -> Option<Self> {
        match self {
            Lane::Left => Some(Lane::Center),
            Lane::Center => Some(Lane::Right),
            Lane::Right => None,
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Start,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Discrete player intents produced by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameIntent {
    /// Shift one lane to the left
    MoveLeft,
    /// Shift one lane to the right
    MoveRight,
    /// Hop over traffic for the jump window
    Jump,
    /// Start a new session (from the start screen or after game over)
    Start,
}

impl GameIntent {
    /// Whether this intent has any effect in `phase`.
    ///
    /// Steering and jumping only make sense while playing; starting only makes
    /// sense when no session is running.
    pub fn is_valid_in(self, phase: GamePhase) -> bool {
        match self {
            GameIntent::MoveLeft | GameIntent::MoveRight | GameIntent::Jump => {
                phase == GamePhase::Playing
            }
            GameIntent::Start => phase != GamePhase::Playing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameIntent::MoveLeft => "moveLeft",
            GameIntent::MoveRight => "moveRight",
            GameIntent::Jump => "jump",
            GameIntent::Start => "start",
        }
    }
}

/// Traffic variants. Each has its own approach speed and reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Car,
    Truck,
    Bike,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Car, ObstacleKind::Truck, ObstacleKind::Bike];

    /// Speed multiplier at level 1.
    pub fn base_speed_multiplier(self) -> f32 {
        match self {
            ObstacleKind::Car => 1.0,
            ObstacleKind::Truck => 0.8,
            ObstacleKind::Bike => 1.25,
        }
    }

    /// Points for dodging one of these before combo and power-up bonuses.
    pub fn point_value(self) -> u32 {
        match self {
            ObstacleKind::Car => 10,
            ObstacleKind::Truck => 15,
            ObstacleKind::Bike => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Car => "car",
            ObstacleKind::Truck => "truck",
            ObstacleKind::Bike => "bike",
        }
    }
}

/// Temporary modifiers. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Collisions do not cost lives
    Shield,
    /// World speed is halved
    SlowMotion,
    /// Dodge points are doubled
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoublePoints,
    ];

    /// HUD label.
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::SlowMotion => "SLOW-MO",
            PowerUpKind::DoublePoints => "2X POINTS",
        }
    }
}

/// Gameplay tuning table.
///
/// `Default` is the canonical game. Every field can be overridden from a JSON
/// document; missing fields keep their default value.
///
/// ```
/// use neon_racer_types::Tuning;
///
/// let t = Tuning::default();
/// assert_eq!(t.obstacle_spawn_interval_ms(1), 1400);
/// assert_eq!(t.obstacle_spawn_interval_ms(10), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World speed at level 1, in progress units per second.
    pub base_speed: f32,
    /// Speed added on each level up.
    pub speed_step: f32,
    /// Speed ceiling.
    pub max_speed: f32,
    /// World speed factor while SlowMotion is active.
    pub slow_motion_factor: f32,
    /// Power-ups approach at this fraction of world speed.
    pub power_up_speed_factor: f32,
    pub jump_ms: u32,
    pub invincible_ms: u32,
    pub obstacle_base_interval_ms: u32,
    pub obstacle_level_factor_ms: u32,
    pub obstacle_min_interval_ms: u32,
    /// Extra obstacle speed multiplier per level above 1.
    pub obstacle_level_step: f32,
    pub double_spawn_min_level: u32,
    pub double_spawn_chance: f32,
    pub power_up_interval_ms: u32,
    pub power_up_chance: f32,
    pub shield_ms: u32,
    pub slow_motion_ms: u32,
    pub double_points_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 40.0,
            speed_step: 5.0,
            max_speed: 80.0,
            slow_motion_factor: 0.5,
            power_up_speed_factor: 0.6,
            jump_ms: JUMP_MS,
            invincible_ms: INVINCIBLE_MS,
            obstacle_base_interval_ms: 1500,
            obstacle_level_factor_ms: 100,
            obstacle_min_interval_ms: 500,
            obstacle_level_step: 0.05,
            double_spawn_min_level: 5,
            double_spawn_chance: 0.3,
            power_up_interval_ms: 7000,
            power_up_chance: 0.4,
            shield_ms: 5000,
            slow_motion_ms: 4000,
            double_points_ms: 6000,
        }
    }
}

impl Tuning {
    /// Time between obstacle spawns at `level`.
    pub fn obstacle_spawn_interval_ms(&self, level: u32) -> u32 {
        self.obstacle_base_interval_ms
            .saturating_sub(level.saturating_mul(self.obstacle_level_factor_ms))
            .max(self.obstacle_min_interval_ms)
    }

    /// Speed multiplier for a freshly spawned obstacle of `kind` at `level`.
    pub fn obstacle_speed_multiplier(&self, kind: ObstacleKind, level: u32) -> f32 {
        kind.base_speed_multiplier() + level.saturating_sub(1) as f32 * self.obstacle_level_step
    }

    /// Fastest an obstacle can travel, in progress units per second.
    pub fn peak_obstacle_speed(&self) -> f32 {
        let fastest = ObstacleKind::ALL
            .iter()
            .map(|k| self.obstacle_speed_multiplier(*k, MAX_LEVEL))
            .fold(0.0f32, f32::max);
        self.base_speed.max(self.max_speed) * fastest
    }

    /// Reject tables the simulation cannot run correctly.
    ///
    /// Speeds and intervals must be positive, factors and chances must stay in
    /// `0..=1`, and no obstacle may cross the whole hit band in one clamped
    /// step, otherwise collisions would be missed.
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("base_speed", self.base_speed)?;
        positive("max_speed", self.max_speed)?;
        at_least_zero("speed_step", self.speed_step)?;
        at_least_zero("obstacle_level_step", self.obstacle_level_step)?;
        fraction("slow_motion_factor", self.slow_motion_factor, false)?;
        fraction("power_up_speed_factor", self.power_up_speed_factor, false)?;
        fraction("double_spawn_chance", self.double_spawn_chance, true)?;
        fraction("power_up_chance", self.power_up_chance, true)?;
        positive("obstacle_min_interval_ms", self.obstacle_min_interval_ms as f32)?;
        positive("power_up_interval_ms", self.power_up_interval_ms as f32)?;

        let band = HIT_BAND_END - HIT_BAND_START;
        let step = self.peak_obstacle_speed() * MAX_TICK_MS as f32 / 1000.0;
        if step >= band {
            return Err(TuningError::SkipsHitBand { step, band });
        }
        Ok(())
    }

    pub fn power_up_duration_ms(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Shield => self.shield_ms,
            PowerUpKind::SlowMotion => self.slow_motion_ms,
            PowerUpKind::DoublePoints => self.double_points_ms,
        }
    }
}

/// Why a [`Tuning`] table was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("obstacles can move {step} units in one step and skip the {band} unit hit band")]
    SkipsHitBand { step: f32, band: f32 },
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn at_least_zero(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "zero or more",
            value,
        })
    }
}

fn fraction(field: &'static str, value: f32, allow_zero: bool) -> Result<(), TuningError> {
    let low_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if low_ok && value <= 1.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: if allow_zero { "within 0..=1" } else { "within (0, 1]" },
            value,
        })
    }
}

/// Axis-aligned rectangle in presenter units (terminal cells or pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }
}
