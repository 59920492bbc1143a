//! Track entities: traffic, pickups and the active modifier slot.

use crate::types::{
    Lane, ObstacleKind, PowerUpKind, HIT_BAND_END, HIT_BAND_START, OFF_TRACK_PROGRESS,
    PICKUP_BAND_END, PICKUP_BAND_START, SCORING_LINE,
};

/// A piece of oncoming traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub progress: f32,
    pub kind: ObstacleKind,
    /// Fixed at spawn time from kind and level.
    pub speed_multiplier: f32,
    pub counted_for_score: bool,
    pub hit_player: bool,
}

impl Obstacle {
    pub fn in_hit_band(&self) -> bool {
        (HIT_BAND_START..=HIT_BAND_END).contains(&self.progress)
    }

    /// Crossed the player line without hitting anyone and not yet scored.
    pub fn ready_to_score(&self) -> bool {
        !self.counted_for_score && !self.hit_player && self.progress >= SCORING_LINE
    }

    pub fn off_track(&self) -> bool {
        self.progress > OFF_TRACK_PROGRESS
    }
}

/// A collectible modifier travelling down a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub lane: Lane,
    pub progress: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn in_pickup_band(&self) -> bool {
        (PICKUP_BAND_START..=PICKUP_BAND_END).contains(&self.progress)
    }

    pub fn off_track(&self) -> bool {
        self.progress > OFF_TRACK_PROGRESS
    }
}

/// The single active modifier slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Session-clock time at which the modifier stops applying.
    pub expires_at_ms: u64,
}

impl ActivePowerUp {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u32 {
        self.expires_at_ms.saturating_sub(now_ms).min(u32::MAX as u64) as u32
    }
}
