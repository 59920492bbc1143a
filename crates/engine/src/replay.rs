//! Headless replay: races driven by the [`Autopilot`] on a [`ManualClock`].
//!
//! Used by the `neon-racer-sim` binary and the benchmarks. With the same seed,
//! tuning and plan a replay always produces the same results.

use tracing::{debug, info};

use crate::autopilot::Autopilot;
use crate::clock::ManualClock;
use crate::core::{RandomSource, SessionSnapshot};
use crate::driver::Driver;
use crate::store::HighScoreStore;
use crate::types::{GameIntent, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayPlan {
    pub races: u32,
    /// Frames per race before it is abandoned.
    pub max_frames: u32,
    pub frame_ms: u32,
}

impl Default for ReplayPlan {
    fn default() -> Self {
        Self {
            races: 1,
            max_frames: 20_000,
            frame_ms: TICK_MS,
        }
    }
}

/// Outcome of one race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceResult {
    pub score: u32,
    pub level: u32,
    pub dodged: u32,
    pub frames: u32,
    /// False when the race hit `max_frames` before game over.
    pub finished: bool,
    pub new_high_score: bool,
}

/// Run `plan.races` races back to back.
///
/// A race that reaches `max_frames` is still in progress and cannot be
/// restarted, so the replay ends there.
pub fn replay<S, R>(
    driver: &mut Driver<S, R, ManualClock>,
    autopilot: Autopilot,
    plan: &ReplayPlan,
) -> Vec<RaceResult>
where
    S: HighScoreStore,
    R: RandomSource,
{
    let frame_ms = plan.frame_ms.max(1) as u64;
    let mut snap = SessionSnapshot::default();
    let mut results = Vec::with_capacity(plan.races as usize);

    for race in 0..plan.races {
        driver.push_intent(GameIntent::Start);

        let mut result = RaceResult {
            score: 0,
            level: 1,
            dodged: 0,
            frames: 0,
            finished: false,
            new_high_score: false,
        };
        while result.frames < plan.max_frames {
            driver.clock().advance(frame_ms);
            result.frames += 1;

            let report = driver.frame();
            result.new_high_score |= report.new_high_score.is_some();
            if report.game_over {
                result.finished = true;
                break;
            }

            driver.snapshot_into(&mut snap);
            if let Some(intent) = autopilot.decide(&snap) {
                driver.push_intent(intent);
            }
        }

        let session = driver.session();
        result.score = session.score();
        result.level = session.level();
        result.dodged = session.dodged_count();
        debug!(race, score = result.score, frames = result.frames, "race replayed");
        results.push(result);

        if !result.finished {
            info!(race, max_frames = plan.max_frames, "race capped; stopping replay");
            break;
        }
    }

    results
}
