//! End-to-end tests across the workspace crates.

use neon_racer::core::{GameSession, ScriptedRng, SimpleRng};
use neon_racer::engine::{replay, Autopilot, Clock, Driver, ManualClock, ReplayPlan};
use neon_racer::store::{
    load_theme, save_theme, HighScoreStore, JsonFileStore, KeyValueStore, KvHighScore,
    MemoryStore, HIGH_SCORE_KEY,
};
use neon_racer::types::{GameIntent, GamePhase, Lane, Tuning, TICK_MS};

/// One left-lane car for the player to dodge, then center-lane traffic until
/// all lives are gone: a 10 point race.
fn record_then_crash() -> ScriptedRng {
    ScriptedRng::new(vec![0, 0, 1, 0, 1, 0, 1, 0])
}

fn race_to_game_over<S: HighScoreStore>(d: &mut Driver<S, ScriptedRng, ManualClock>) -> bool {
    d.push_intent(GameIntent::Start);
    for _ in 0..2_000 {
        d.clock().advance(TICK_MS as u64);
        if d.frame().game_over {
            return true;
        }
    }
    false
}

#[test]
fn facade_exposes_every_crate() {
    let session = GameSession::default();
    assert_eq!(session.phase(), GamePhase::Start);
    assert_eq!(session.player_lane(), Lane::Center);
    assert_eq!(neon_racer::term::RaceView::default().frame_width(), 25);
    assert!(neon_racer::input::map_key(crossterm::event::KeyCode::Enter).is_some());
}

#[test]
fn high_score_survives_restart_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    {
        let store = KvHighScore::new(JsonFileStore::open(&path).unwrap());
        let mut d = Driver::new(store, record_then_crash(), ManualClock::new(0), Tuning::default());
        assert!(race_to_game_over(&mut d));
        assert_eq!(d.session().score(), 10);
    }

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc[HIGH_SCORE_KEY], "10");

    let store = KvHighScore::new(JsonFileStore::open(&path).unwrap());
    let d = Driver::new(store, SimpleRng::new(1), ManualClock::new(0), Tuning::default());
    assert_eq!(d.session().high_score(), 10);
    assert_eq!(d.snapshot().high_score, 10);
}

#[test]
fn theme_and_high_score_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut file = JsonFileStore::open(&path).unwrap();
    save_theme(&mut file, "cyber").unwrap();
    let mut scores = KvHighScore::new(file);
    scores.set_high_score(420).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(load_theme(&reopened).as_deref(), Some("cyber"));
    assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("420"));
}

#[test]
fn corrupt_high_score_reads_as_zero() {
    let store = MemoryStore::new().with_entry(HIGH_SCORE_KEY, "not a number");
    let d = Driver::new(
        KvHighScore::new(store),
        SimpleRng::new(5),
        ManualClock::new(0),
        Tuning::default(),
    );
    assert_eq!(d.session().high_score(), 0);
}

#[test]
fn replay_is_deterministic_per_seed() {
    let plan = ReplayPlan {
        races: 3,
        max_frames: 15_000,
        frame_ms: TICK_MS,
    };
    let run = |seed| {
        let mut d = Driver::new(
            KvHighScore::new(MemoryStore::new()),
            SimpleRng::new(seed),
            ManualClock::new(0),
            Tuning::default(),
        );
        let results = replay(&mut d, Autopilot::default(), &plan);
        (results, d.stored_high_score())
    };

    assert_eq!(run(11), run(11));
    assert_eq!(run(12345), run(12345));
}

#[test]
fn stored_high_score_is_max_over_races() {
    let plan = ReplayPlan {
        races: 6,
        ..ReplayPlan::default()
    };
    let mut d = Driver::new(
        KvHighScore::new(MemoryStore::new()),
        SimpleRng::new(2024),
        ManualClock::new(0),
        Tuning::default(),
    );
    let results = replay(&mut d, Autopilot::default(), &plan);

    let mut best = 0;
    for r in results.iter().filter(|r| r.finished) {
        assert_eq!(r.new_high_score, r.score > best);
        best = best.max(r.score);
    }
    assert_eq!(d.stored_high_score(), best);
    assert_eq!(d.session().high_score(), best);
}

#[test]
fn session_and_driver_agree_on_the_same_inputs() {
    let mut session = GameSession::new(0, Tuning::default());
    let mut rng = SimpleRng::new(77);

    let mut d = Driver::new(
        KvHighScore::new(MemoryStore::new()),
        SimpleRng::new(77),
        ManualClock::new(0),
        Tuning::default(),
    );

    let script = [
        (GameIntent::Start, 16),
        (GameIntent::MoveLeft, 33),
        (GameIntent::Jump, 20),
        (GameIntent::MoveRight, 48),
    ];
    for round in 0..50 {
        for (intent, ms) in script {
            let direct = session.advance(ms, &[intent], &mut rng);
            d.push_intent(intent);
            d.clock().advance(ms as u64);
            let driven = d.frame();
            assert_eq!(direct, driven, "round {round}");
        }
    }
    assert_eq!(session.snapshot(), d.snapshot());
    assert_eq!(d.clock().now_ms(), 50 * (16 + 33 + 20 + 48));
}
