//! RaceView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It reads the snapshot and the palette and
//! nothing else, so it can be unit-tested.

use crate::core::{ObstacleView, PowerUpView, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::input::TapTarget;
use crate::palette::Palette;
use crate::types::{
    GamePhase, Lane, ObstacleKind, PowerUpKind, Rect, HIT_BAND_END, HIT_BAND_START, LANE_COUNT,
    OFF_TRACK_PROGRESS,
};

/// Rows above the track used by the HUD.
pub const HUD_ROWS: u16 = 2;

/// Rows below the track used by the on-screen controls.
pub const TOUCH_STRIP_ROWS: u16 = 3;

const MIN_TRACK_ROWS: u16 = 8;

/// Where the player car is drawn along the track.
const PLAYER_MARK: f32 = (HIT_BAND_START + HIT_BAND_END) / 2.0;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen rectangles for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackLayout {
    /// Track including its border.
    pub frame: Rect,
    /// On-screen controls, when shown.
    pub strip: Option<Rect>,
    lane_w: u16,
}

impl TrackLayout {
    pub fn inner_rows(&self) -> u16 {
        self.frame.height.saturating_sub(2)
    }

    /// Screen row for a progress value, if it is on the visible track.
    pub fn row_for(&self, progress: f32) -> Option<u16> {
        if progress < 0.0 {
            return None;
        }
        let inner = self.inner_rows();
        let r = (progress / OFF_TRACK_PROGRESS * inner as f32) as u16;
        (r < inner).then_some(self.frame.y + 1 + r)
    }

    pub fn player_row(&self) -> u16 {
        self.row_for(PLAYER_MARK)
            .unwrap_or(self.frame.y + self.inner_rows())
    }

    /// First column of a lane.
    pub fn lane_x(&self, lane: Lane) -> u16 {
        self.frame.x + 1 + lane.index() as u16 * (self.lane_w + 1)
    }

    pub fn lane_width(&self) -> u16 {
        self.lane_w
    }
}

/// Terminal renderer for the race.
#[derive(Debug, Clone, Copy)]
pub struct RaceView {
    /// Lane width in terminal columns.
    lane_w: u16,
    show_touch_controls: bool,
}

impl Default for RaceView {
    fn default() -> Self {
        Self {
            lane_w: 7,
            show_touch_controls: false,
        }
    }
}

impl RaceView {
    pub fn new(lane_w: u16) -> Self {
        Self {
            lane_w: lane_w.max(3),
            ..Self::default()
        }
    }

    pub fn with_touch_controls(mut self, show: bool) -> Self {
        self.show_touch_controls = show;
        self
    }

    pub fn shows_touch_controls(&self) -> bool {
        self.show_touch_controls
    }

    pub fn frame_width(&self) -> u16 {
        // Two borders plus a separator between neighbouring lanes.
        LANE_COUNT as u16 * self.lane_w + LANE_COUNT as u16 + 1
    }

    /// Track placement for `viewport`; `None` when it does not fit.
    pub fn layout(&self, viewport: Viewport) -> Option<TrackLayout> {
        let frame_w = self.frame_width();
        let strip_h = if self.show_touch_controls {
            TOUCH_STRIP_ROWS
        } else {
            0
        };
        if viewport.width < frame_w || viewport.height < HUD_ROWS + strip_h + MIN_TRACK_ROWS {
            return None;
        }

        let frame_h = viewport.height - HUD_ROWS - strip_h;
        let x = (viewport.width - frame_w) / 2;
        let frame = Rect::new(x, HUD_ROWS, frame_w, frame_h);
        let strip = (strip_h > 0).then(|| Rect::new(x, HUD_ROWS + frame_h, frame_w, strip_h));
        Some(TrackLayout {
            frame,
            strip,
            lane_w: self.lane_w,
        })
    }

    /// Area of the on-screen controls, for hit testing.
    pub fn touch_strip(&self, viewport: Viewport) -> Option<Rect> {
        self.layout(viewport).and_then(|l| l.strip)
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        palette: &Palette,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        let base = palette.base();
        fb.clear(crate::fb::Cell {
            ch: ' ',
            style: base,
        });

        let Some(layout) = self.layout(viewport) else {
            fb.put_str_centered(0, viewport.width, viewport.height / 2, "TERMINAL TOO SMALL", base.bold());
            return;
        };

        self.draw_track(fb, palette, &layout);
        for power_up in snap.power_ups.iter() {
            self.draw_power_up(fb, palette, &layout, power_up);
        }
        for obstacle in snap.obstacles.iter() {
            self.draw_obstacle(fb, palette, &layout, obstacle);
        }
        if snap.phase == GamePhase::Playing {
            self.draw_player(fb, palette, &layout, snap);
        }

        self.draw_hud(fb, palette, &layout, snap);

        match snap.phase {
            GamePhase::Start => self.draw_start_overlay(fb, palette, &layout, snap),
            GamePhase::GameOver => self.draw_game_over_overlay(fb, palette, &layout, snap),
            GamePhase::Playing => {}
        }

        if let Some(strip) = layout.strip {
            self.draw_touch_strip(fb, palette, strip, snap.phase);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, palette: &Palette, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, palette, viewport, &mut fb);
        fb
    }

    fn draw_track(&self, fb: &mut FrameBuffer, palette: &Palette, layout: &TrackLayout) {
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = layout.frame;
        let border = CellStyle::new(palette.primary, palette.background).bold();
        let road = CellStyle::new(palette.muted(), palette.road());

        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', road);

        fb.put_char(x, y, '┌', border);
        fb.put_char(x + w - 1, y, '┐', border);
        fb.put_char(x, y + h - 1, '└', border);
        fb.put_char(x + w - 1, y + h - 1, '┘', border);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', border);
            fb.put_char(x + dx, y + h - 1, '─', border);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', border);
            fb.put_char(x + w - 1, y + dy, '│', border);
        }

        // Dashed separators between lanes.
        for lane in [Lane::Left, Lane::Center] {
            let sx = layout.lane_x(lane) + self.lane_w;
            for dy in 1..h - 1 {
                let ch = if dy % 2 == 0 { '┆' } else { ' ' };
                fb.put_char(sx, y + dy, ch, road);
            }
        }
    }

    fn draw_obstacle(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        obstacle: &ObstacleView,
    ) {
        let Some(row) = layout.row_for(obstacle.progress) else {
            return;
        };
        let (fg, ch, rows) = match obstacle.kind {
            ObstacleKind::Car => (palette.primary, '█', 1),
            ObstacleKind::Truck => (palette.secondary.mix(palette.text(), 60), '▓', 2),
            ObstacleKind::Bike => (palette.accent, '▌', 1),
        };
        let mut style = CellStyle::new(fg, palette.road());
        if obstacle.hit {
            style = style.dim();
        }

        let (x, w) = self.vehicle_span(layout, obstacle.lane, obstacle.kind);
        for i in 0..rows {
            // Longer vehicles extend toward the top of the track.
            let Some(r) = row.checked_sub(i) else { break };
            if r <= layout.frame.y {
                break;
            }
            fb.fill_rect(x, r, w, 1, ch, style);
        }
    }

    fn vehicle_span(&self, layout: &TrackLayout, lane: Lane, kind: ObstacleKind) -> (u16, u16) {
        let w = match kind {
            ObstacleKind::Bike => 1,
            ObstacleKind::Car | ObstacleKind::Truck => self.lane_w.saturating_sub(2).max(1),
        };
        let x = layout.lane_x(lane) + (self.lane_w - w) / 2;
        (x, w)
    }

    fn draw_power_up(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        power_up: &PowerUpView,
    ) {
        let Some(row) = layout.row_for(power_up.progress) else {
            return;
        };
        let style = CellStyle::new(palette.background, palette.highlight()).bold();
        let x = layout.lane_x(power_up.lane) + (self.lane_w - 3) / 2;
        fb.put_char(x, row, '[', style);
        fb.put_char(x + 1, row, power_up_glyph(power_up.kind), style);
        fb.put_char(x + 2, row, ']', style);
    }

    fn draw_player(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        snap: &SessionSnapshot,
    ) {
        if !snap.blink_on() {
            return;
        }

        let shielded = snap.active_power_up.map(|a| a.kind) == Some(PowerUpKind::Shield);
        let bg = if shielded {
            palette.accent
        } else {
            palette.road()
        };
        let style = CellStyle::new(palette.highlight(), bg).bold();

        let row = if snap.is_jumping {
            layout.player_row().saturating_sub(1).max(layout.frame.y + 1)
        } else {
            layout.player_row()
        };
        let w = self.lane_w.saturating_sub(2).max(1);
        let x = layout.lane_x(snap.player_lane) + (self.lane_w - w) / 2;
        let ch = if snap.is_jumping { '▲' } else { '▀' };
        fb.fill_rect(x, row, w, 1, ch, style);
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        snap: &SessionSnapshot,
    ) {
        let label = CellStyle::new(palette.muted(), palette.background);
        let value = CellStyle::new(palette.text(), palette.background).bold();
        let heart = CellStyle::new(palette.accent, palette.background).bold();

        let x0 = layout.frame.x;
        let y = 0;

        // Lives, level, combo multiplier.
        let mut x = x0;
        for _ in 0..snap.lives {
            fb.put_char(x, y, '♥', heart);
            x += 1;
        }
        x += 2;
        x = fb.put_str(x, y, "LVL ", label);
        x = fb.put_u32(x, y, snap.level, value);
        x += 2;
        x = fb.put_str(x, y, "COMBO x", label);
        let tenths = 10 + snap.combo;
        x = fb.put_u32(x, y, tenths / 10, value);
        x = fb.put_str(x, y, ".", value);
        fb.put_u32(x, y, tenths % 10, value);

        // Score, high score, power-up.
        let y = 1;
        let mut x = fb.put_str(x0, y, "SCORE ", label);
        x = fb.put_u32(x, y, snap.score, value);
        x += 2;
        x = fb.put_str(x, y, "HI ", label);
        x = fb.put_u32(x, y, snap.high_score, value);
        if let Some(active) = snap.active_power_up {
            let pu = CellStyle::new(palette.background, palette.accent).bold();
            x += 2;
            x = fb.put_str(x, y, active.kind.label(), pu);
            x = fb.put_str(x, y, " ", pu);
            x = fb.put_u32(x, y, active.remaining_ms.div_ceil(1000), pu);
            fb.put_str(x, y, "s", pu);
        }
    }

    fn draw_start_overlay(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        snap: &SessionSnapshot,
    ) {
        let Rect { x, y, width, height } = layout.frame;
        let title = CellStyle::new(palette.accent, palette.background).bold();
        let text = CellStyle::new(palette.text(), palette.background);
        let mid = y + height / 2;

        fb.put_str_centered(x, width, mid.saturating_sub(3), " NEON RACER ", title);
        fb.put_str_centered(x, width, mid.saturating_sub(1), " ENTER to start ", text);
        fb.put_str_centered(x, width, mid, " ←/→ steer  ↑ jump ", text);
        fb.put_str_centered(x, width, mid + 1, " t theme  q quit ", text);
        if snap.high_score > 0 {
            let hx = fb.put_str(x + width / 2 - 5, mid + 3, " BEST ", text);
            fb.put_u32(hx, mid + 3, snap.high_score, title);
        }
    }

    fn draw_game_over_overlay(
        &self,
        fb: &mut FrameBuffer,
        palette: &Palette,
        layout: &TrackLayout,
        snap: &SessionSnapshot,
    ) {
        let Rect { x, y, width, height } = layout.frame;
        let title = CellStyle::new(palette.accent, palette.background).bold();
        let text = CellStyle::new(palette.text(), palette.background);
        let mid = y + height / 2;

        fb.put_str_centered(x, width, mid.saturating_sub(3), " GAME OVER ", title);
        let sx = fb.put_str(x + width / 2 - 6, mid.saturating_sub(1), " SCORE ", text);
        fb.put_u32(sx, mid.saturating_sub(1), snap.score, title);
        if snap.score > 0 && snap.score == snap.high_score {
            fb.put_str_centered(x, width, mid, " NEW HIGH SCORE! ", title);
        }
        fb.put_str_centered(x, width, mid + 2, " R to race again ", text);
    }

    fn draw_touch_strip(&self, fb: &mut FrameBuffer, palette: &Palette, strip: Rect, phase: GamePhase) {
        let button = CellStyle::new(palette.text(), palette.secondary).bold();
        let gap = CellStyle::new(palette.text(), palette.background);
        for target in [TapTarget::Left, TapTarget::Jump, TapTarget::Right] {
            let r = target.area_in(strip);
            if r.width < 2 {
                continue;
            }
            fb.fill_rect(r.x, r.y, r.width, r.height, ' ', button);
            // One column gap so the buttons read as separate.
            fb.fill_rect(r.x + r.width - 1, r.y, 1, r.height, ' ', gap);
            let label = if phase == GamePhase::Playing {
                target.label()
            } else {
                "START"
            };
            fb.put_str_centered(r.x, r.width - 1, r.y + r.height / 2, label, button);
        }
    }
}

fn power_up_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::Shield => 'S',
        PowerUpKind::SlowMotion => 'Z',
        PowerUpKind::DoublePoints => '2',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_centers_track_below_hud() {
        let view = RaceView::default();
        assert_eq!(view.frame_width(), 25);
        let l = view.layout(Viewport::new(40, 30)).unwrap();
        assert_eq!(l.frame, Rect::new(7, HUD_ROWS, 25, 28));
        assert_eq!(l.strip, None);
        assert_eq!(l.lane_x(Lane::Left), 8);
        assert_eq!(l.lane_x(Lane::Center), 16);
        assert_eq!(l.lane_x(Lane::Right), 24);
    }

    #[test]
    fn progress_maps_top_to_bottom() {
        let l = RaceView::default().layout(Viewport::new(40, 30)).unwrap();
        assert_eq!(l.row_for(0.0), Some(3));
        assert_eq!(l.row_for(-1.0), None);
        assert_eq!(l.row_for(OFF_TRACK_PROGRESS), None);
        let a = l.row_for(40.0).unwrap();
        let b = l.row_for(80.0).unwrap();
        assert!(a < b);
        assert!(b <= l.player_row());
        assert!(l.player_row() < l.frame.y + l.frame.height - 1);
    }

    #[test]
    fn touch_strip_sits_under_track() {
        let view = RaceView::default().with_touch_controls(true);
        let vp = Viewport::new(40, 30);
        let l = view.layout(vp).unwrap();
        let strip = view.touch_strip(vp).unwrap();
        assert_eq!(strip.y, l.frame.y + l.frame.height);
        assert_eq!(strip.y + strip.height, 30);
        assert_eq!(strip.width, l.frame.width);
    }

    #[test]
    fn too_small_viewport_has_no_layout() {
        let view = RaceView::default();
        assert!(view.layout(Viewport::new(20, 30)).is_none());
        assert!(view.layout(Viewport::new(40, 9)).is_none());
        let fb = view.render(&SessionSnapshot::default(), &Palette::default(), Viewport::new(20, 5));
        assert!(fb.row_text(2).contains("SMALL"));
    }
}
