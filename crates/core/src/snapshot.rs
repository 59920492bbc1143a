//! Read-only view of a session, filled without allocation.

use arrayvec::ArrayVec;

use crate::entity::{Obstacle, PowerUp};
use crate::session::{MAX_OBSTACLES, MAX_POWER_UPS};
use crate::types::{GamePhase, Lane, ObstacleKind, PowerUpKind, START_LIVES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub id: u32,
    pub lane: Lane,
    pub progress: f32,
    pub kind: ObstacleKind,
    pub hit: bool,
}

impl From<&Obstacle> for ObstacleView {
    fn from(value: &Obstacle) -> Self {
        Self {
            id: value.id,
            lane: value.lane,
            progress: value.progress,
            kind: value.kind,
            hit: value.hit_player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpView {
    pub id: u32,
    pub lane: Lane,
    pub progress: f32,
    pub kind: PowerUpKind,
}

impl From<&PowerUp> for PowerUpView {
    fn from(value: &PowerUp) -> Self {
        Self {
            id: value.id,
            lane: value.lane,
            progress: value.progress,
            kind: value.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePowerUpView {
    pub kind: PowerUpKind,
    pub remaining_ms: u32,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub generation: u32,
    pub clock_ms: u64,
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    pub combo: u32,
    pub level: u32,
    pub dodged_count: u32,
    pub player_lane: Lane,
    pub is_jumping: bool,
    pub is_invincible: bool,
    pub active_power_up: Option<ActivePowerUpView>,
    pub speed: f32,
    pub obstacles: ArrayVec<ObstacleView, MAX_OBSTACLES>,
    pub power_ups: ArrayVec<PowerUpView, MAX_POWER_UPS>,
}

impl SessionSnapshot {
    pub fn playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Blink phase for the invincibility flash; toggles every 100ms.
    pub fn blink_on(&self) -> bool {
        !self.is_invincible || (self.clock_ms / 100) % 2 == 0
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Start,
            generation: 0,
            clock_ms: 0,
            score: 0,
            high_score: 0,
            lives: START_LIVES,
            combo: 0,
            level: 1,
            dodged_count: 0,
            player_lane: Lane::Center,
            is_jumping: false,
            is_invincible: false,
            active_power_up: None,
            speed: 0.0,
            obstacles: ArrayVec::new(),
            power_ups: ArrayVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_only_while_invincible() {
        let mut s = SessionSnapshot::default();
        s.clock_ms = 150;
        assert!(s.blink_on());
        s.is_invincible = true;
        assert!(!s.blink_on());
        s.clock_ms = 250;
        assert!(s.blink_on());
    }
}
