//! Discrete-press input mapper for terminal and touch environments.
//!
//! A key produces its intent once when it goes down. Holding it does nothing
//! more until it is released. Terminals that do not report key releases get a
//! short timeout instead, so a tap does not turn into a permanently held key.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::map::map_key;
use crate::touch::{SwipeTracker, TapTarget};
use crate::types::{GameIntent, GamePhase};

// Without release events, a key counts as released this long after its last
// press or repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Left and right share one slot: pressing one replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Horizontal,
    Jump,
    Start,
}

const SLOT_COUNT: usize = 3;

impl Slot {
    fn of(intent: GameIntent) -> Self {
        match intent {
            GameIntent::MoveLeft | GameIntent::MoveRight => Slot::Horizontal,
            GameIntent::Jump => Slot::Jump,
            GameIntent::Start => Slot::Start,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    intent: GameIntent,
    last_seen: Instant,
}

/// Turns raw key and touch events into phase-valid intents.
#[derive(Debug, Clone)]
pub struct InputMapper {
    held: [Option<HeldKey>; SLOT_COUNT],
    key_release_timeout_ms: u32,
    /// Once the terminal has sent a release, releases are trusted and the
    /// timeout is no longer applied.
    release_events_seen: bool,
    swipe: SwipeTracker,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::with_swipe_threshold(crate::touch::SWIPE_THRESHOLD_PX)
    }

    pub fn with_swipe_threshold(threshold: i32) -> Self {
        Self {
            held: [None; SLOT_COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
            swipe: SwipeTracker::new(threshold),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, intent: GameIntent) -> bool {
        matches!(self.held[Slot::of(intent).index()], Some(h) if h.intent == intent)
    }

    /// A key went down. Returns the intent on the first press only, and only
    /// when it is valid in `phase`. A rejected press is not remembered.
    pub fn handle_key_press(&mut self, code: KeyCode, phase: GamePhase) -> Option<GameIntent> {
        let intent = map_key(code)?;
        self.expire_held();

        let now = Instant::now();
        let slot = &mut self.held[Slot::of(intent).index()];
        if let Some(held) = slot.as_mut() {
            if held.intent == intent {
                held.last_seen = now;
                return None;
            }
        }

        let intent = gate(intent, phase)?;
        *slot = Some(HeldKey {
            intent,
            last_seen: now,
        });
        Some(intent)
    }

    /// Auto-repeat of a held key: keeps it held, never fires.
    pub fn handle_key_repeat(&mut self, code: KeyCode) -> Option<GameIntent> {
        if let Some(intent) = map_key(code) {
            if let Some(held) = self.held[Slot::of(intent).index()].as_mut() {
                if held.intent == intent {
                    held.last_seen = Instant::now();
                }
            }
        }
        None
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events_seen = true;
        if let Some(intent) = map_key(code) {
            let slot = &mut self.held[Slot::of(intent).index()];
            if matches!(slot, Some(h) if h.intent == intent) {
                *slot = None;
            }
        }
    }

    /// Drop held keys whose release was never reported.
    pub fn update(&mut self) {
        self.expire_held();
    }

    fn expire_held(&mut self) {
        if self.release_events_seen {
            return;
        }
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for slot in &mut self.held {
            if matches!(slot, Some(h) if h.last_seen.elapsed() > timeout) {
                *slot = None;
            }
        }
    }

    pub fn handle_touch_start(&mut self, x: i32, y: i32) {
        self.swipe.start(x, y);
    }

    /// Finish a touch; a horizontal swipe past the threshold changes lane.
    pub fn handle_touch_end(&mut self, x: i32, y: i32, phase: GamePhase) -> Option<GameIntent> {
        gate(self.swipe.end(x, y)?, phase)
    }

    /// An on-screen button was tapped. Outside a race any tap starts one.
    pub fn handle_tap(&mut self, target: TapTarget, phase: GamePhase) -> Option<GameIntent> {
        if phase == GamePhase::Playing {
            gate(target.intent(), phase)
        } else {
            gate(GameIntent::Start, phase)
        }
    }

    pub fn reset(&mut self) {
        self.held = [None; SLOT_COUNT];
        self.swipe.cancel();
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn gate(intent: GameIntent, phase: GamePhase) -> Option<GameIntent> {
    intent.is_valid_in(phase).then_some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYING: GamePhase = GamePhase::Playing;

    // Simulate missing release events by aging every held key.
    fn backdate(im: &mut InputMapper, ms: u64) {
        for held in im.held.iter_mut().flatten() {
            held.last_seen = Instant::now() - Duration::from_millis(ms);
        }
    }

    #[test]
    fn test_press_fires_once_while_held() {
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), None);
        assert_eq!(im.handle_key_repeat(KeyCode::Left), None);
        // Alias of the same intent is the same held key.
        assert_eq!(im.handle_key_press(KeyCode::Char('a'), PLAYING), None);

        im.handle_key_release(KeyCode::Left);
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
    }

    #[test]
    fn test_different_keys_fire_independently() {
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Up, PLAYING), Some(GameIntent::Jump));
        assert_eq!(im.handle_key_press(KeyCode::Right, PLAYING), Some(GameIntent::MoveRight));
    }

    #[test]
    fn test_opposite_direction_replaces_held_direction() {
        // No release events at all.
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Right, PLAYING), Some(GameIntent::MoveRight));
        assert!(!im.is_held(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Char('d'), PLAYING), Some(GameIntent::MoveRight));
    }

    #[test]
    fn test_rejected_press_is_not_held() {
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        assert_eq!(im.handle_key_press(KeyCode::Left, GamePhase::GameOver), None);
        assert!(!im.is_held(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Enter, GamePhase::GameOver), Some(GameIntent::Start));
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut im = InputMapper::new();
        im.key_release_timeout_ms = 50;

        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
        assert!(im.is_held(GameIntent::MoveLeft));

        backdate(&mut im, 51);
        im.update();
        assert!(!im.is_held(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
    }

    #[test]
    fn test_other_keys_do_not_keep_a_key_held() {
        let mut im = InputMapper::new();
        im.key_release_timeout_ms = 50;

        im.handle_key_press(KeyCode::Left, PLAYING);
        backdate(&mut im, 51);
        assert_eq!(im.handle_key_press(KeyCode::Up, PLAYING), Some(GameIntent::Jump));
        assert!(!im.is_held(GameIntent::MoveLeft));
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let mut im = InputMapper::new();
        im.key_release_timeout_ms = 50;

        im.handle_key_press(KeyCode::Up, PLAYING);
        im.handle_key_release(KeyCode::Up);
        assert_eq!(im.handle_key_press(KeyCode::Right, PLAYING), Some(GameIntent::MoveRight));

        backdate(&mut im, 500);
        im.update();
        assert!(im.is_held(GameIntent::MoveRight));
        assert_eq!(im.handle_key_press(KeyCode::Right, PLAYING), None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let im = InputMapper::new();
        assert!(im.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_phase_gating() {
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        assert_eq!(im.handle_key_press(KeyCode::Left, GamePhase::Start), None);
        assert_eq!(im.handle_key_press(KeyCode::Enter, GamePhase::Playing), None);
        im.handle_key_release(KeyCode::Enter);
        assert_eq!(im.handle_key_press(KeyCode::Char('r'), GamePhase::GameOver), Some(GameIntent::Start));
        assert_eq!(im.handle_key_press(KeyCode::Char('x'), PLAYING), None);
    }

    #[test]
    fn test_swipe_and_tap() {
        let mut im = InputMapper::new();
        im.handle_touch_start(100, 400);
        assert_eq!(im.handle_touch_end(30, 410, PLAYING), Some(GameIntent::MoveLeft));

        im.handle_touch_start(100, 400);
        assert_eq!(im.handle_touch_end(180, 400, GamePhase::GameOver), None);

        assert_eq!(im.handle_tap(TapTarget::Jump, PLAYING), Some(GameIntent::Jump));
        assert_eq!(im.handle_tap(TapTarget::Right, PLAYING), Some(GameIntent::MoveRight));
        assert_eq!(im.handle_tap(TapTarget::Left, GamePhase::Start), Some(GameIntent::Start));
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut im = InputMapper::new().with_key_release_timeout_ms(10_000);
        im.handle_key_press(KeyCode::Left, PLAYING);
        im.handle_touch_start(0, 0);
        im.reset();
        assert!(!im.is_held(GameIntent::MoveLeft));
        assert_eq!(im.handle_touch_end(100, 0, PLAYING), None);
        assert_eq!(im.handle_key_press(KeyCode::Left, PLAYING), Some(GameIntent::MoveLeft));
    }
}
