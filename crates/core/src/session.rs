//! Game session - the whole mutable state of one race and its update rule.
//!
//! A [`GameSession`] is the only mutator of race state. It is driven by
//! [`GameSession::advance`], which first applies the intents gathered since the
//! previous tick and then steps the simulation by the elapsed time.
//!
//! Timed windows (jump, invincibility, power-up) are stored as expiry times on
//! the session clock and compared every tick. Resetting the session clears all
//! of them in the same step, so nothing from a previous race can leak into the
//! next one.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::entity::{ActivePowerUp, Obstacle, PowerUp};
use crate::rng::RandomSource;
use crate::scoring::{dodge_points, level_for_dodges};
use crate::snapshot::{ActivePowerUpView, ObstacleView, PowerUpView, SessionSnapshot};
use crate::spawner::{roll_obstacles, roll_power_up};
use crate::types::*;

/// Capacity of the obstacle list.
pub const MAX_OBSTACLES: usize = 32;

/// Capacity of the power-up list.
pub const MAX_POWER_UPS: usize = 4;

/// What a single call to [`GameSession::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// False when the tick was a no-op (non-positive Δt or no race running).
    pub advanced: bool,
    /// Simulated milliseconds after clamping.
    pub elapsed_ms: u32,
    pub intents_applied: u32,
    pub dodged: u32,
    pub points: u32,
    pub collisions: u32,
    pub level_up: bool,
    pub spawned_obstacles: u32,
    pub power_up_collected: Option<PowerUpKind>,
    pub game_over: bool,
    /// Set exactly when the stored high score must be rewritten.
    pub new_high_score: Option<u32>,
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct GameSession {
    tuning: Tuning,
    phase: GamePhase,
    /// Increments on every reset.
    generation: u32,
    /// Session clock; only moves inside `advance`.
    now_ms: u64,
    score: u32,
    high_score: u32,
    lives: u8,
    combo: u32,
    level: u32,
    dodged_count: u32,
    player_lane: Lane,
    jump_until_ms: Option<u64>,
    invincible_until_ms: Option<u64>,
    active_power_up: Option<ActivePowerUp>,
    speed: f32,
    obstacles: ArrayVec<Obstacle, MAX_OBSTACLES>,
    power_ups: ArrayVec<PowerUp, MAX_POWER_UPS>,
    last_obstacle_spawn_ms: u64,
    last_power_up_spawn_ms: u64,
    next_entity_id: u32,
}

impl GameSession {
    /// Create a session on the start screen.
    ///
    /// `high_score` is whatever the persistence layer currently holds.
    pub fn new(high_score: u32, tuning: Tuning) -> Self {
        let speed = tuning.base_speed;
        Self {
            tuning,
            phase: GamePhase::Start,
            generation: 0,
            now_ms: 0,
            score: 0,
            high_score,
            lives: START_LIVES,
            combo: 0,
            level: 1,
            dodged_count: 0,
            player_lane: Lane::Center,
            jump_until_ms: None,
            invincible_until_ms: None,
            active_power_up: None,
            speed,
            obstacles: ArrayVec::new(),
            power_ups: ArrayVec::new(),
            last_obstacle_spawn_ms: 0,
            last_power_up_spawn_ms: 0,
            next_entity_id: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn dodged_count(&self) -> u32 {
        self.dodged_count
    }

    pub fn player_lane(&self) -> Lane {
        self.player_lane
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_until_ms.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until_ms.is_some()
    }

    pub fn active_power_up(&self) -> Option<ActivePowerUp> {
        self.active_power_up
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// World speed after modifiers.
    pub fn effective_speed(&self) -> f32 {
        if self.power_up_is(PowerUpKind::SlowMotion) {
            self.speed * self.tuning.slow_motion_factor
        } else {
            self.speed
        }
    }

    fn power_up_is(&self, kind: PowerUpKind) -> bool {
        self.active_power_up.map(|a| a.kind) == Some(kind)
    }

    /// Apply one intent immediately.
    ///
    /// Returns false when the intent has no effect: wrong phase, lane boundary,
    /// or a jump while already airborne.
    pub fn apply_intent(&mut self, intent: GameIntent) -> bool {
        if !intent.is_valid_in(self.phase) {
            return false;
        }

        match intent {
            GameIntent::Start => {
                self.reset_for_race();
                true
            }
            GameIntent::MoveLeft => match self.player_lane.left() {
                Some(lane) => {
                    self.player_lane = lane;
                    true
                }
                None => false,
            },
            GameIntent::MoveRight => match self.player_lane.right() {
                Some(lane) => {
                    self.player_lane = lane;
                    true
                }
                None => false,
            },
            GameIntent::Jump => {
                if self.is_jumping() {
                    return false;
                }
                self.jump_until_ms = Some(self.now_ms + self.tuning.jump_ms as u64);
                true
            }
        }
    }

    /// Reset every race field and enter `Playing`.
    fn reset_for_race(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = GamePhase::Playing;
        self.now_ms = 0;
        self.score = 0;
        self.lives = START_LIVES;
        self.combo = 0;
        self.level = 1;
        self.dodged_count = 0;
        self.player_lane = Lane::Center;
        self.jump_until_ms = None;
        self.invincible_until_ms = None;
        self.active_power_up = None;
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.power_ups.clear();
        self.last_obstacle_spawn_ms = 0;
        self.last_power_up_spawn_ms = 0;
        self.next_entity_id = 0;

        debug!(generation = self.generation, "race started");
    }

    /// Apply `intents`, then step the simulation by `elapsed_ms`.
    ///
    /// A non-positive `elapsed_ms` is a complete no-op: the intents are *not*
    /// applied, so callers can keep them for the next tick. Steps longer than
    /// [`MAX_TICK_MS`] are clamped.
    pub fn advance<R: RandomSource + ?Sized>(
        &mut self,
        elapsed_ms: i64,
        intents: &[GameIntent],
        rng: &mut R,
    ) -> TickReport {
        let mut report = TickReport::default();
        if elapsed_ms <= 0 {
            return report;
        }

        for &intent in intents {
            if self.apply_intent(intent) {
                report.intents_applied += 1;
            }
        }

        if self.phase != GamePhase::Playing {
            return report;
        }

        let dt = elapsed_ms.min(MAX_TICK_MS as i64) as u32;
        report.advanced = true;
        report.elapsed_ms = dt;
        self.now_ms += dt as u64;
        self.expire_windows();

        let dt_s = dt as f32 / 1000.0;
        let effective_speed = self.effective_speed();

        self.move_obstacles(effective_speed, dt_s);
        self.score_dodges(&mut report);
        self.progress_level(&mut report);

        self.check_collision(&mut report);
        if self.phase == GamePhase::GameOver {
            return report;
        }

        self.move_power_ups(effective_speed, dt_s, &mut report);

        if let Some(active) = self.active_power_up {
            if active.is_expired(self.now_ms) {
                debug!(kind = ?active.kind, "power-up expired");
                self.active_power_up = None;
            }
        }

        self.spawn_obstacles(rng, &mut report);
        self.spawn_power_up(rng);

        report
    }

    fn expire_windows(&mut self) {
        let now = self.now_ms;
        if self.jump_until_ms.is_some_and(|t| now >= t) {
            self.jump_until_ms = None;
        }
        if self.invincible_until_ms.is_some_and(|t| now >= t) {
            self.invincible_until_ms = None;
        }
    }

    fn move_obstacles(&mut self, effective_speed: f32, dt_s: f32) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.progress += effective_speed * obstacle.speed_multiplier * dt_s;
        }
        self.obstacles.retain(|o| !o.off_track());
    }

    fn score_dodges(&mut self, report: &mut TickReport) {
        let double_points = self.power_up_is(PowerUpKind::DoublePoints);

        for obstacle in self.obstacles.iter_mut() {
            if !obstacle.ready_to_score() {
                continue;
            }
            obstacle.counted_for_score = true;

            let points = dodge_points(obstacle.kind, self.combo, double_points);
            self.score = self.score.saturating_add(points);
            self.dodged_count += 1;
            self.combo = (self.combo + 1).min(MAX_COMBO);

            report.dodged += 1;
            report.points += points;
        }

        // Scored traffic leaves the track.
        self.obstacles.retain(|o| !o.counted_for_score);
    }

    fn progress_level(&mut self, report: &mut TickReport) {
        let target = level_for_dodges(self.dodged_count);
        while self.level < target {
            self.level += 1;
            self.speed = (self.speed + self.tuning.speed_step).min(self.tuning.max_speed);
            report.level_up = true;
            debug!(level = self.level, speed = self.speed, "level up");
        }
    }

    fn check_collision(&mut self, report: &mut TickReport) {
        if self.is_jumping() || self.is_invincible() || self.power_up_is(PowerUpKind::Shield) {
            return;
        }

        let lane = self.player_lane;
        let Some(obstacle) = self
            .obstacles
            .iter_mut()
            .find(|o| !o.hit_player && o.lane == lane && o.in_hit_band())
        else {
            return;
        };
        obstacle.hit_player = true;

        self.on_collision(report);
    }

    fn on_collision(&mut self, report: &mut TickReport) {
        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        report.collisions += 1;

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            report.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
                report.new_high_score = Some(self.score);
            }
            debug!(
                generation = self.generation,
                score = self.score,
                high_score = self.high_score,
                "game over"
            );
        } else {
            self.invincible_until_ms = Some(self.now_ms + self.tuning.invincible_ms as u64);
        }
    }

    fn move_power_ups(&mut self, effective_speed: f32, dt_s: f32, report: &mut TickReport) {
        let rate = effective_speed * self.tuning.power_up_speed_factor;
        for power_up in self.power_ups.iter_mut() {
            power_up.progress += rate * dt_s;
        }
        self.power_ups.retain(|p| !p.off_track());

        let lane = self.player_lane;
        for power_up in self.power_ups.iter_mut() {
            if power_up.collected || power_up.lane != lane || !power_up.in_pickup_band() {
                continue;
            }
            power_up.collected = true;

            // A new pickup replaces whatever was active.
            self.active_power_up = Some(ActivePowerUp {
                kind: power_up.kind,
                expires_at_ms: self.now_ms + self.tuning.power_up_duration_ms(power_up.kind) as u64,
            });
            report.power_up_collected = Some(power_up.kind);
            debug!(kind = ?power_up.kind, "power-up collected");
        }
        self.power_ups.retain(|p| !p.collected);
    }

    fn spawn_obstacles<R: RandomSource + ?Sized>(&mut self, rng: &mut R, report: &mut TickReport) {
        let interval = self.tuning.obstacle_spawn_interval_ms(self.level) as u64;
        if self.now_ms.saturating_sub(self.last_obstacle_spawn_ms) < interval {
            return;
        }
        self.last_obstacle_spawn_ms = self.now_ms;

        for (lane, kind) in roll_obstacles(rng, self.level, &self.tuning) {
            let obstacle = Obstacle {
                id: self.next_entity_id,
                lane,
                progress: SPAWN_PROGRESS,
                kind,
                speed_multiplier: self.tuning.obstacle_speed_multiplier(kind, self.level),
                counted_for_score: false,
                hit_player: false,
            };
            if self.obstacles.try_push(obstacle).is_ok() {
                self.next_entity_id = self.next_entity_id.wrapping_add(1);
                report.spawned_obstacles += 1;
            }
        }
    }

    fn spawn_power_up<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let interval = self.tuning.power_up_interval_ms as u64;
        if self.now_ms.saturating_sub(self.last_power_up_spawn_ms) < interval {
            return;
        }
        self.last_power_up_spawn_ms = self.now_ms;

        if !self.power_ups.is_empty() {
            return;
        }
        if let Some((lane, kind)) = roll_power_up(rng, &self.tuning) {
            let power_up = PowerUp {
                id: self.next_entity_id,
                lane,
                progress: SPAWN_PROGRESS,
                kind,
                collected: false,
            };
            if self.power_ups.try_push(power_up).is_ok() {
                self.next_entity_id = self.next_entity_id.wrapping_add(1);
            }
        }
    }

    /// Copy the presentable state into `out` without allocating.
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.phase = self.phase;
        out.generation = self.generation;
        out.clock_ms = self.now_ms;
        out.score = self.score;
        out.high_score = self.high_score;
        out.lives = self.lives;
        out.combo = self.combo;
        out.level = self.level;
        out.dodged_count = self.dodged_count;
        out.player_lane = self.player_lane;
        out.is_jumping = self.is_jumping();
        out.is_invincible = self.is_invincible();
        out.speed = self.speed;
        out.active_power_up = self.active_power_up.map(|a| ActivePowerUpView {
            kind: a.kind,
            remaining_ms: a.remaining_ms(self.now_ms),
        });

        out.obstacles.clear();
        out.obstacles.extend(self.obstacles.iter().map(ObstacleView::from));
        out.power_ups.clear();
        out.power_ups.extend(self.power_ups.iter().map(PowerUpView::from));
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(0, Tuning::default())
    }
}
