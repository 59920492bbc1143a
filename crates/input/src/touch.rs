//! Swipe and tap recognition.
//!
//! Coordinates are presenter units: pixels on a touch screen, cells in a
//! terminal with mouse capture. Only the threshold differs.

use crate::types::{GameIntent, Rect};

/// Horizontal displacement that counts as a swipe, in pixels.
pub const SWIPE_THRESHOLD_PX: i32 = 50;

/// Same threshold for terminal cells.
pub const SWIPE_THRESHOLD_CELLS: i32 = 4;

/// Viewports this narrow get on-screen controls.
pub const TOUCH_VIEWPORT_MAX_WIDTH_PX: u32 = 768;

/// Whether on-screen tap targets should be shown.
pub fn is_touch_viewport(width_px: u32, touch_supported: bool) -> bool {
    touch_supported || width_px <= TOUCH_VIEWPORT_MAX_WIDTH_PX
}

/// One of the three on-screen buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapTarget {
    Left,
    Jump,
    Right,
}

impl TapTarget {
    pub fn intent(self) -> GameIntent {
        match self {
            TapTarget::Left => GameIntent::MoveLeft,
            TapTarget::Jump => GameIntent::Jump,
            TapTarget::Right => GameIntent::MoveRight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TapTarget::Left => "<",
            TapTarget::Jump => "JUMP",
            TapTarget::Right => ">",
        }
    }

    /// Which third of `area` contains the point.
    pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<TapTarget> {
        if !area.contains(x, y) {
            return None;
        }
        let third = (area.width / 3).max(1);
        let col = (x - area.x) / third;
        Some(match col {
            0 => TapTarget::Left,
            1 => TapTarget::Jump,
            _ => TapTarget::Right,
        })
    }

    /// Sub-rectangle of `area` drawn for this button.
    pub fn area_in(self, area: Rect) -> Rect {
        let third = area.width / 3;
        let (x, width) = match self {
            TapTarget::Left => (area.x, third),
            TapTarget::Jump => (area.x + third, third),
            TapTarget::Right => (area.x + 2 * third, area.width - 2 * third),
        };
        Rect::new(x, area.y, width, area.height)
    }
}

/// Tracks one touch from start to end.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<(i32, i32)>,
    threshold: i32,
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        Self {
            start: None,
            threshold: threshold.max(1),
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    /// Finish the touch. A horizontal move past the threshold is a lane change.
    pub fn end(&mut self, x: i32, _y: i32) -> Option<GameIntent> {
        let (sx, _) = self.start.take()?;
        let dx = x - sx;
        if dx >= self.threshold {
            Some(GameIntent::MoveRight)
        } else if dx <= -self.threshold {
            Some(GameIntent::MoveLeft)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}
