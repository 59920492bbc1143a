//! Dodge scoring and level progression.
//!
//! Points for a dodge are `floor(value × dp × (1 + combo × 0.1))`, where `dp`
//! is 2 while DoublePoints is active and `combo` is the streak *before* this
//! dodge. The arithmetic is done in tenths so it stays exact.

use crate::types::{ObstacleKind, DODGES_PER_LEVEL, MAX_COMBO, MAX_LEVEL};

/// Combo multiplier expressed in tenths (combo 0 → 10, combo 10 → 20).
pub fn combo_multiplier_tenths(combo: u32) -> u32 {
    10 + combo.min(MAX_COMBO)
}

/// Points awarded for dodging one obstacle of `kind`.
pub fn dodge_points(kind: ObstacleKind, combo: u32, double_points: bool) -> u32 {
    let dp = if double_points { 2 } else { 1 };
    kind.point_value() * dp * combo_multiplier_tenths(combo) / 10
}

/// Level reached after `dodged` total dodges.
pub fn level_for_dodges(dodged: u32) -> u32 {
    (1 + dodged / DODGES_PER_LEVEL).min(MAX_LEVEL)
}
