//! Spawn rolls for traffic and power-ups.
//!
//! Only the dice live here; when to roll is the session's business. The order
//! in which values are drawn from the [`RandomSource`] is fixed so a scripted
//! source replays the exact same track:
//!
//! - obstacles: `[double gate]`, then `lane`, `kind` per obstacle
//!   (the second obstacle draws its lane from the two remaining lanes)
//! - power-ups: `gate`, then `lane`, `kind`

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::types::{Lane, ObstacleKind, PowerUpKind, Tuning, LANE_COUNT};

/// Lane/kind pairs for one obstacle spawn event.
pub type ObstacleRoll = ArrayVec<(Lane, ObstacleKind), 2>;

/// Roll the obstacles for one spawn event at `level`.
///
/// From `double_spawn_min_level` on, a gate with `double_spawn_chance` adds a
/// second obstacle on a different lane.
pub fn roll_obstacles<R: RandomSource + ?Sized>(
    rng: &mut R,
    level: u32,
    tuning: &Tuning,
) -> ObstacleRoll {
    let mut out = ObstacleRoll::new();

    let double = level >= tuning.double_spawn_min_level && rng.chance(tuning.double_spawn_chance);

    let first = random_lane(rng);
    out.push((first, random_obstacle_kind(rng)));

    if double {
        let others: ArrayVec<Lane, LANE_COUNT> =
            Lane::ALL.iter().copied().filter(|l| *l != first).collect();
        let second = others[rng.next_range(others.len() as u32) as usize];
        out.push((second, random_obstacle_kind(rng)));
    }

    out
}

/// Roll the gate for a power-up spawn; `None` when the gate fails.
pub fn roll_power_up<R: RandomSource + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
) -> Option<(Lane, PowerUpKind)> {
    if !rng.chance(tuning.power_up_chance) {
        return None;
    }
    let lane = random_lane(rng);
    let kind = PowerUpKind::ALL[rng.next_range(PowerUpKind::ALL.len() as u32) as usize];
    Some((lane, kind))
}

fn random_lane<R: RandomSource + ?Sized>(rng: &mut R) -> Lane {
    Lane::ALL[rng.next_range(LANE_COUNT as u32) as usize]
}

fn random_obstacle_kind<R: RandomSource + ?Sized>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.next_range(ObstacleKind::ALL.len() as u32) as usize]
}
