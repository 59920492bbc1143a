//! Property tests for the session rules under arbitrary input and timing.

use proptest::prelude::*;

use neon_racer::core::{level_for_dodges, GameSession, SimpleRng, MAX_OBSTACLES};
use neon_racer::types::{
    GameIntent, GamePhase, PowerUpKind, Tuning, MAX_COMBO, MAX_LEVEL, MAX_TICK_MS, START_LIVES,
};

fn intents_from_mask(mask: u8) -> Vec<GameIntent> {
    [
        GameIntent::Start,
        GameIntent::MoveLeft,
        GameIntent::MoveRight,
        GameIntent::Jump,
    ]
    .into_iter()
    .enumerate()
    .filter(|(bit, _)| mask & (1 << bit) != 0)
    .map(|(_, intent)| intent)
    .collect()
}

fn step_strategy() -> impl Strategy<Value = Vec<(i64, u8)>> {
    prop::collection::vec((-5i64..90, 0u8..16), 1..600)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn race_counters_are_monotonic(seed in any::<u32>(), steps in step_strategy()) {
        let mut session = GameSession::new(0, Tuning::default());
        let mut rng = SimpleRng::new(seed);

        for (elapsed, mask) in steps {
            let before = session.snapshot();
            let report = session.advance(elapsed, &intents_from_mask(mask), &mut rng);
            let after = session.snapshot();

            prop_assert!(after.high_score >= before.high_score);
            prop_assert!(after.lives <= START_LIVES);
            prop_assert!(after.combo <= MAX_COMBO);
            prop_assert!(after.level >= 1 && after.level <= MAX_LEVEL);
            prop_assert_eq!(after.level, level_for_dodges(after.dodged_count));
            prop_assert!(after.obstacles.len() <= MAX_OBSTACLES);

            if after.generation != before.generation {
                continue;
            }
            // Same race: counters only move one way.
            prop_assert!(after.lives <= before.lives);
            prop_assert!(after.score >= before.score);
            prop_assert!(after.dodged_count >= before.dodged_count);
            prop_assert_eq!(after.score - before.score, report.points);
            prop_assert_eq!(after.dodged_count - before.dodged_count, report.dodged);
            prop_assert_eq!(u32::from(before.lives - after.lives), report.collisions);
        }
    }

    #[test]
    fn non_positive_elapsed_changes_nothing(seed in any::<u32>(), steps in step_strategy(), mask in 0u8..16) {
        let mut session = GameSession::new(0, Tuning::default());
        let mut rng = SimpleRng::new(seed);
        for (elapsed, m) in steps {
            session.advance(elapsed, &intents_from_mask(m), &mut rng);
        }

        let before = session.snapshot();
        let report = session.advance(0, &intents_from_mask(mask), &mut rng);
        prop_assert!(!report.advanced);
        prop_assert_eq!(session.snapshot(), before.clone());
        session.advance(-16, &intents_from_mask(mask), &mut rng);
        prop_assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn clock_moves_by_clamped_elapsed(seed in any::<u32>(), steps in step_strategy()) {
        let mut session = GameSession::new(0, Tuning::default());
        let mut rng = SimpleRng::new(seed);
        session.advance(TICK_MS_I64, &[GameIntent::Start], &mut rng);

        for (elapsed, mask) in steps {
            let before = session.snapshot();
            session.advance(elapsed, &intents_from_mask(mask), &mut rng);
            let after = session.snapshot();
            if after.generation != before.generation || before.phase != GamePhase::Playing {
                continue;
            }
            let expected = if elapsed > 0 { elapsed.min(MAX_TICK_MS as i64) as u64 } else { 0 };
            prop_assert_eq!(after.clock_ms, before.clock_ms + expected);
        }
    }

    #[test]
    fn collision_resets_combo_and_shield_blocks_it(seed in any::<u32>(), steps in step_strategy()) {
        let mut session = GameSession::new(0, Tuning::default());
        let mut rng = SimpleRng::new(seed);

        for (elapsed, mask) in steps {
            let before = session.snapshot();
            let report = session.advance(elapsed, &intents_from_mask(mask), &mut rng);
            let after = session.snapshot();
            if after.generation != before.generation {
                continue;
            }

            if report.collisions > 0 {
                prop_assert_eq!(after.combo, 0);
                prop_assert!(after.lives < before.lives);
            }
            let shielded = before.active_power_up.map(|a| a.kind) == Some(PowerUpKind::Shield);
            if shielded {
                prop_assert_eq!(report.collisions, 0);
            }
            if report.game_over {
                prop_assert_eq!(after.phase, GamePhase::GameOver);
                prop_assert_eq!(after.lives, 0);
                prop_assert!(after.high_score >= after.score);
            }
        }
    }
}

const TICK_MS_I64: i64 = neon_racer::types::TICK_MS as i64;
