//! Terminal Neon Racer runner (default binary).
//!
//! Keyboard and mouse come from crossterm; frames go through the diffing
//! framebuffer renderer. Configuration is read from `NEON_RACER_*` variables
//! (see `RacerConfig`). Logs only go to a file, since stdout is the screen.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use neon_racer::core::{SessionSnapshot, SimpleRng};
use neon_racer::engine::{Driver, MonotonicClock, RacerConfig, DEFAULT_LOG_FILTER};
use neon_racer::input::{
    is_theme_key, is_touch_viewport, should_quit, InputMapper, TapTarget, SWIPE_THRESHOLD_CELLS,
};
use neon_racer::store::{load_theme, save_theme, JsonFileStore, KvHighScore};
use neon_racer::term::{FrameBuffer, RaceView, TerminalRenderer, ThemeId, Viewport};
use neon_racer::types::{GameIntent, GamePhase, Rect, Tuning};

fn main() -> Result<()> {
    let config = RacerConfig::from_env();
    init_tracing(&config)?;

    let mut term = TerminalRenderer::new().with_mouse_capture(true);
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "racer stopped");
    }
    result
}

fn init_tracing(config: &RacerConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RacerConfig) -> Result<()> {
    let tuning = config.tuning().unwrap_or_else(|err| {
        warn!(error = %err, "falling back to default tuning");
        Tuning::default()
    });

    let file = JsonFileStore::open(&config.save_path).unwrap_or_else(|err| {
        warn!(error = %err, "save file unreadable; starting fresh");
        JsonFileStore::empty(&config.save_path)
    });
    let mut theme = config
        .theme
        .as_deref()
        .and_then(ThemeId::parse)
        .or_else(|| load_theme(&file).and_then(|name| ThemeId::parse(&name)))
        .unwrap_or_default();
    let mut palette = theme.palette();

    let mut driver = Driver::new(
        KvHighScore::new(file),
        SimpleRng::new(config.seed),
        MonotonicClock::new(),
        tuning,
    );
    info!(
        seed = config.seed,
        theme = theme.name(),
        high_score = driver.stored_high_score(),
        "racer ready"
    );

    let view = RaceView::default().with_touch_controls(touch_controls(config.force_touch));
    let mut input = InputMapper::with_swipe_threshold(SWIPE_THRESHOLD_CELLS);
    let mut press: Option<(u16, u16)> = None;

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        driver.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&snap, &palette, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = tick_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if is_theme_key(key) {
                            theme = theme.next();
                            palette = theme.palette();
                            if let Err(err) = save_theme(driver.store_mut().inner_mut(), theme.name()) {
                                warn!(error = %err, "failed to persist theme");
                            }
                            continue;
                        }
                        if let Some(intent) = input.handle_key_press(key.code, snap.phase) {
                            driver.push_intent(intent);
                        }
                    }
                    KeyEventKind::Repeat => {
                        input.handle_key_repeat(key.code);
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Mouse(mouse) => {
                    let strip = view.touch_strip(viewport);
                    if let Some(intent) = handle_mouse(mouse, snap.phase, strip, &mut input, &mut press) {
                        driver.push_intent(intent);
                    }
                }
                _ => {}
            }
        }

        // Frame.
        if last_frame.elapsed() >= tick_duration {
            last_frame = Instant::now();
            input.update();

            let report = driver.frame();
            if report.game_over {
                info!(
                    score = driver.session().score(),
                    level = driver.session().level(),
                    dodged = driver.session().dodged_count(),
                    "race over"
                );
            }
            if let Some(score) = report.new_high_score {
                info!(score, "new high score");
            }
        }
    }
}

/// The control strip is shown on narrow pixel viewports or when forced.
/// Terminals that do not report pixel sizes only get it when forced.
fn touch_controls(force: bool) -> bool {
    terminal::window_size()
        .ok()
        .map(|size| size.width as u32)
        .filter(|px| *px > 0)
        .map_or(force, |px| is_touch_viewport(px, force))
}

/// Left-button drags are swipes; clicks on the strip are taps. Outside a race
/// any click starts one.
fn handle_mouse(
    mouse: MouseEvent,
    phase: GamePhase,
    strip: Option<Rect>,
    input: &mut InputMapper,
    press: &mut Option<(u16, u16)>,
) -> Option<GameIntent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            input.handle_touch_start(mouse.column as i32, mouse.row as i32);
            *press = Some((mouse.column, mouse.row));
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let (x, y) = press.take()?;
            if let Some(intent) = input.handle_touch_end(mouse.column as i32, mouse.row as i32, phase) {
                return Some(intent);
            }
            match strip.and_then(|s| TapTarget::hit_test(s, x, y)) {
                Some(target) => input.handle_tap(target, phase),
                None if phase != GamePhase::Playing => Some(GameIntent::Start),
                None => None,
            }
        }
        _ => None,
    }
}
