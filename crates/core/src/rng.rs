//! Random sources for spawning.
//!
//! The session never owns its randomness: every call to
//! [`GameSession::advance`](crate::GameSession::advance) borrows a
//! [`RandomSource`], so callers decide between a seeded generator for real play
//! and a scripted one for exact replays in tests.

/// Source of uniformly distributed `u32` values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random value in `[0, max)`. `max == 0` yields 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Random value in `[0.0, 1.0)` built from the top 24 bits.
    fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current generator state; feeding it back into `new` resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Low LCG bits cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of raw values, cycling when exhausted.
///
/// An empty script yields zeros forever.
///
/// ```
/// use neon_racer_core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(vec![2, ScriptedRng::unit(0.75)]);
/// assert_eq!(rng.next_range(3), 2);
/// assert!(!rng.chance(0.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Raw value that `next_unit` maps back to (approximately) `u`.
    pub fn unit(u: f32) -> u32 {
        let clamped = u.clamp(0.0, 0.999_999);
        ((clamped * (1u32 << 24) as f32) as u32) << 8
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_covers_all_lanes() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = rng.next_range(3) as usize;
            assert!(v < 3);
            seen[v] = true;
        }
        assert!(seen.iter().all(|s| *s), "lanes seen: {:?}", seen);
    }

    #[test]
    fn test_next_unit_is_in_unit_interval() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = SimpleRng::new(42);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![1, 2]);
        assert_eq!(rng.next_u32(), 1);
        assert_eq!(rng.next_u32(), 2);
        assert_eq!(rng.next_u32(), 1);
        assert_eq!(rng.drawn(), 3);
    }

    #[test]
    fn test_scripted_unit_round_trips_for_chance() {
        let mut rng = ScriptedRng::new(vec![ScriptedRng::unit(0.2), ScriptedRng::unit(0.9)]);
        assert!(rng.chance(0.3));
        assert!(!rng.chance(0.3));
    }

    #[test]
    fn test_empty_script_yields_zero() {
        let mut rng = ScriptedRng::default();
        assert_eq!(rng.next_u32(), 0);
        assert_eq!(rng.next_range(3), 0);
        assert!(rng.chance(0.01));
    }
}
