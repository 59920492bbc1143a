use neon_racer::core::{ActivePowerUpView, ObstacleView, PowerUpView, SessionSnapshot};
use neon_racer::input::TapTarget;
use neon_racer::term::{FrameBuffer, RaceView, ThemeId, Viewport};
use neon_racer::types::{GamePhase, Lane, ObstacleKind, PowerUpKind};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn playing() -> SessionSnapshot {
    SessionSnapshot {
        phase: GamePhase::Playing,
        generation: 1,
        ..SessionSnapshot::default()
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 40,
    height: 30,
};

#[test]
fn start_screen_shows_title_and_best() {
    let snap = SessionSnapshot {
        high_score: 480,
        ..SessionSnapshot::default()
    };
    let fb = RaceView::default().render(&snap, &ThemeId::Ocean.palette(), VIEWPORT);
    let text = screen_text(&fb);
    assert!(text.contains("NEON RACER"));
    assert!(text.contains("ENTER to start"));
    assert!(text.contains("BEST 480"));
}

#[test]
fn hud_shows_lives_level_combo_and_power_up() {
    let mut snap = playing();
    snap.lives = 2;
    snap.level = 3;
    snap.combo = 5;
    snap.score = 120;
    snap.high_score = 450;
    snap.active_power_up = Some(ActivePowerUpView {
        kind: PowerUpKind::Shield,
        remaining_ms: 2_100,
    });

    let fb = RaceView::default().render(&snap, &ThemeId::default().palette(), VIEWPORT);
    let row0 = fb.row_text(0);
    let row1 = fb.row_text(1);
    assert_eq!(row0.matches('♥').count(), 2);
    assert!(row0.contains("LVL 3"));
    assert!(row0.contains("COMBO x1.5"));
    assert!(row1.contains("SCORE 120"));
    assert!(row1.contains("HI 450"));
    assert!(row1.contains("SHIELD 3s"));
}

#[test]
fn traffic_and_player_land_in_their_lanes() {
    let view = RaceView::default();
    let layout = view.layout(VIEWPORT).unwrap();

    let mut snap = playing();
    snap.player_lane = Lane::Right;
    snap.obstacles.push(ObstacleView {
        id: 0,
        lane: Lane::Left,
        progress: 40.0,
        kind: ObstacleKind::Car,
        hit: false,
    });
    snap.power_ups.push(PowerUpView {
        id: 1,
        lane: Lane::Center,
        progress: 20.0,
        kind: PowerUpKind::SlowMotion,
    });

    let fb = view.render(&snap, &ThemeId::Gold.palette(), VIEWPORT);

    let car_row = layout.row_for(40.0).unwrap();
    let car_x = layout.lane_x(Lane::Left) + 1;
    assert_eq!(fb.get(car_x, car_row).unwrap().ch, '█');

    let pu_row = layout.row_for(20.0).unwrap();
    assert!(fb.row_text(pu_row).contains("[Z]"));

    let player_x = layout.lane_x(Lane::Right) + 1;
    assert_eq!(fb.get(player_x, layout.player_row()).unwrap().ch, '▀');
    assert_ne!(fb.get(layout.lane_x(Lane::Center) + 1, layout.player_row()).unwrap().ch, '▀');
}

#[test]
fn jumping_player_is_drawn_raised() {
    let view = RaceView::default();
    let layout = view.layout(VIEWPORT).unwrap();
    let mut snap = playing();
    snap.is_jumping = true;

    let fb = view.render(&snap, &ThemeId::default().palette(), VIEWPORT);
    let x = layout.lane_x(Lane::Center) + 1;
    assert_eq!(fb.get(x, layout.player_row() - 1).unwrap().ch, '▲');
}

#[test]
fn game_over_celebrates_a_new_record_only() {
    let view = RaceView::default();
    let palette = ThemeId::Crimson.palette();

    let mut snap = SessionSnapshot {
        phase: GamePhase::GameOver,
        lives: 0,
        score: 300,
        high_score: 300,
        ..SessionSnapshot::default()
    };
    let text = screen_text(&view.render(&snap, &palette, VIEWPORT));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("SCORE 300"));
    assert!(text.contains("NEW HIGH SCORE!"));

    snap.high_score = 900;
    let text = screen_text(&view.render(&snap, &palette, VIEWPORT));
    assert!(text.contains("GAME OVER"));
    assert!(!text.contains("NEW HIGH SCORE!"));
}

#[test]
fn touch_strip_labels_follow_phase() {
    let view = RaceView::default().with_touch_controls(true);
    let strip = view.touch_strip(VIEWPORT).unwrap();
    let label_row = strip.y + strip.height / 2;

    let fb = view.render(&playing(), &ThemeId::Emerald.palette(), VIEWPORT);
    let row = fb.row_text(label_row);
    assert!(row.contains('<'));
    assert!(row.contains("JUMP"));
    assert!(row.contains('>'));

    let fb = view.render(&SessionSnapshot::default(), &ThemeId::Emerald.palette(), VIEWPORT);
    assert!(fb.row_text(label_row).contains("START"));

    // Every column of the strip maps to a button.
    for x in strip.x..strip.x + strip.width {
        assert!(TapTarget::hit_test(strip, x, strip.y).is_some());
    }
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let view = RaceView::default();
    let palette = ThemeId::Cyber.palette();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&playing(), &palette, Viewport::new(60, 32), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 32));

    view.render_into(&playing(), &palette, Viewport::new(10, 4), &mut fb);
    assert_eq!((fb.width(), fb.height()), (10, 4));
    assert!(screen_text(&fb).contains("TERMINAL"));
}
