//! Frame driver: owns a session and feeds it time, intents and randomness.
//!
//! The driver is the only place that knows about wall time and persistence.
//! Every frame it measures the time since the previous frame, hands the queued
//! intents and that Δt to [`GameSession::advance`], and writes the high score
//! when the session reports a new record. Snapshots carry the persisted high
//! score, so a record that failed to save is not shown as the best.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::core::{GameSession, RandomSource, SessionSnapshot, TickReport};
use crate::store::HighScoreStore;
use crate::types::{GameIntent, Tuning};

/// Intents buffered between two frames.
pub const MAX_PENDING_INTENTS: usize = 16;

pub struct Driver<S, R, C> {
    session: GameSession,
    store: S,
    rng: R,
    clock: C,
    pending: ArrayVec<GameIntent, MAX_PENDING_INTENTS>,
    last_frame_ms: u64,
    /// Last value read from or written to `store`.
    persisted_high_score: u32,
}

impl<S, R, C> Driver<S, R, C>
where
    S: HighScoreStore,
    R: RandomSource,
    C: Clock,
{
    /// Build a driver on the start screen, seeded with the stored high score.
    pub fn new(store: S, rng: R, clock: C, tuning: Tuning) -> Self {
        let high_score = store.high_score();
        let last_frame_ms = clock.now_ms();
        debug!(high_score, "driver ready");
        Self {
            session: GameSession::new(high_score, tuning),
            store,
            rng,
            clock,
            pending: ArrayVec::new(),
            last_frame_ms,
            persisted_high_score: high_score,
        }
    }

    /// Queue an intent for the next frame. Returns false when the queue is full.
    pub fn push_intent(&mut self, intent: GameIntent) -> bool {
        if self.pending.try_push(intent).is_err() {
            debug!(intent = intent.as_str(), "intent queue full; dropped");
            return false;
        }
        true
    }

    pub fn pending_intents(&self) -> &[GameIntent] {
        &self.pending
    }

    /// Run one frame.
    ///
    /// When no time has passed the session is left alone and the queued
    /// intents wait for the next frame.
    pub fn frame(&mut self) -> TickReport {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.last_frame_ms);
        if elapsed == 0 {
            return TickReport::default();
        }
        self.last_frame_ms = now;

        let elapsed = elapsed.min(i64::MAX as u64) as i64;
        let report = self.session.advance(elapsed, &self.pending, &mut self.rng);
        self.pending.clear();

        if let Some(score) = report.new_high_score {
            match self.store.set_high_score(score) {
                Ok(()) => self.persisted_high_score = score,
                Err(err) => warn!(error = %err, score, "failed to persist high score"),
            }
        }

        report
    }

    /// Session state for presentation, with `high_score` taken from the store.
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut out = self.session.snapshot();
        out.high_score = self.persisted_high_score;
        out
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
        out.high_score = self.persisted_high_score;
    }

    /// What the persistence layer currently holds.
    pub fn stored_high_score(&self) -> u32 {
        self.store.high_score()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
