//! Deterministic driving policy for headless replay and benchmarks.
//!
//! The policy looks only at a [`SessionSnapshot`], so the same race always
//! gets the same decisions. It is not meant to be good, just plausible: it
//! steers away from traffic that is about to reach the player and jumps when
//! both neighbours are blocked.

use crate::core::SessionSnapshot;
use crate::types::{GameIntent, GamePhase, Lane, HIT_BAND_END};

/// Traffic closer than this is a threat.
const THREAT_PROGRESS: f32 = 60.0;

/// A lane is safe when nothing unhit sits in this window.
const BLOCKED_FROM: f32 = 45.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    /// Restart automatically after game over.
    pub auto_restart: bool,
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self { auto_restart }
    }

    /// At most one intent for this frame.
    pub fn decide(&self, snap: &SessionSnapshot) -> Option<GameIntent> {
        match snap.phase {
            GamePhase::Start => Some(GameIntent::Start),
            GamePhase::GameOver => self.auto_restart.then_some(GameIntent::Start),
            GamePhase::Playing => steer(snap),
        }
    }
}

fn steer(snap: &SessionSnapshot) -> Option<GameIntent> {
    let lane = snap.player_lane;
    if !lane_has_traffic(snap, lane, THREAT_PROGRESS) {
        return None;
    }

    let candidates = [
        (lane.left(), GameIntent::MoveLeft),
        (lane.right(), GameIntent::MoveRight),
    ];
    for (target, intent) in candidates {
        if let Some(target) = target {
            if !lane_has_traffic(snap, target, BLOCKED_FROM) {
                return Some(intent);
            }
        }
    }

    if snap.is_jumping {
        None
    } else {
        Some(GameIntent::Jump)
    }
}

fn lane_has_traffic(snap: &SessionSnapshot, lane: Lane, from: f32) -> bool {
    snap.obstacles
        .iter()
        .any(|o| !o.hit && o.lane == lane && o.progress >= from && o.progress <= HIT_BAND_END)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ObstacleView;
    use crate::types::ObstacleKind;

    fn playing_at(lane: Lane) -> SessionSnapshot {
        SessionSnapshot {
            phase: GamePhase::Playing,
            player_lane: lane,
            ..SessionSnapshot::default()
        }
    }

    fn add(snap: &mut SessionSnapshot, lane: Lane, progress: f32) {
        let id = snap.obstacles.len() as u32;
        snap.obstacles.push(ObstacleView {
            id,
            lane,
            progress,
            kind: ObstacleKind::Car,
            hit: false,
        });
    }

    #[test]
    fn starts_and_optionally_restarts() {
        let snap = SessionSnapshot::default();
        assert_eq!(Autopilot::new(false).decide(&snap), Some(GameIntent::Start));

        let over = SessionSnapshot {
            phase: GamePhase::GameOver,
            ..SessionSnapshot::default()
        };
        assert_eq!(Autopilot::new(false).decide(&over), None);
        assert_eq!(Autopilot::new(true).decide(&over), Some(GameIntent::Start));
    }

    #[test]
    fn idles_on_a_clear_lane() {
        let mut snap = playing_at(Lane::Center);
        add(&mut snap, Lane::Center, 20.0);
        add(&mut snap, Lane::Left, 85.0);
        assert_eq!(Autopilot::default().decide(&snap), None);
    }

    #[test]
    fn dodges_to_a_free_neighbour() {
        let mut snap = playing_at(Lane::Center);
        add(&mut snap, Lane::Center, 70.0);
        add(&mut snap, Lane::Left, 60.0);
        assert_eq!(
            Autopilot::default().decide(&snap),
            Some(GameIntent::MoveRight)
        );
    }

    #[test]
    fn jumps_when_boxed_in() {
        let mut snap = playing_at(Lane::Left);
        add(&mut snap, Lane::Left, 75.0);
        add(&mut snap, Lane::Center, 50.0);
        assert_eq!(Autopilot::default().decide(&snap), Some(GameIntent::Jump));

        snap.is_jumping = true;
        assert_eq!(Autopilot::default().decide(&snap), None);
    }
}
