// Integration tests (native) for the star-catcher game core.
// The engine is pure Rust with an injected seed, so these run under plain
// `cargo test` on the host with no browser involved.

use star_catcher::engine::{Engine, EngineParams, Phase, Star};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 320.0;

/// Params with the random spawner disabled so scenarios control the exact
/// star population.
fn quiet_params() -> EngineParams {
    EngineParams {
        spawn_chance: 0.0,
        ..EngineParams::default()
    }
}

fn quiet_engine() -> Engine {
    Engine::new(WIDTH, HEIGHT, quiet_params(), 7)
}

fn star_at(x: f64, y: f64) -> Star {
    Star {
        x,
        y,
        radius: 5.0,
        vy: 2.0,
        glow: false,
    }
}

#[test]
fn catch_scenario_scores_and_removes_star() {
    let mut engine = quiet_engine();
    let paddle_center = engine.paddle().x + engine.paddle().width / 2.0;
    // One step of fall (vy = 2) puts the star's bottom edge into the paddle.
    let y = engine.paddle().y - 5.0;
    engine.add_star(star_at(paddle_center, y));

    let events = engine.step();

    assert_eq!(events.caught, 1);
    assert_eq!(events.missed, 0);
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.misses(), 0);
    assert!(engine.stars().is_empty());
    assert_eq!(engine.phase(), Phase::Running);
}

#[test]
fn star_beside_paddle_falls_through() {
    let mut engine = quiet_engine();
    // Same height as a catch, but horizontally clear of the paddle.
    let y = engine.paddle().y - 5.0;
    engine.add_star(star_at(engine.paddle().x - 50.0, y));

    let events = engine.step();

    assert_eq!(events.caught, 0);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.stars().len(), 1);
}

#[test]
fn three_misses_end_the_session() {
    let mut engine = quiet_engine();
    // Three stars already past the paddle, one frame from crossing the
    // bottom boundary, far from the paddle horizontally.
    for _ in 0..3 {
        engine.add_star(star_at(10.0, HEIGHT + 4.0));
    }

    let events = engine.step();

    assert_eq!(events.missed, 3);
    assert!(events.ended);
    assert_eq!(engine.misses(), 3);
    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(!engine.is_running());
}

#[test]
fn game_over_freezes_counters_until_reset() {
    let mut engine = quiet_engine();
    for _ in 0..3 {
        engine.add_star(star_at(10.0, HEIGHT + 4.0));
    }
    engine.step();
    assert_eq!(engine.phase(), Phase::GameOver);

    // Further frames are no-ops even with a catchable star queued.
    let paddle_center = engine.paddle().x + engine.paddle().width / 2.0;
    engine.add_star(star_at(paddle_center, engine.paddle().y - 5.0));
    for _ in 0..10 {
        let events = engine.step();
        assert_eq!(events.caught, 0);
        assert_eq!(events.missed, 0);
        assert!(!events.ended);
    }
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.misses(), 3);

    engine.reset();
    assert!(engine.is_running());
    let events = engine.step();
    assert_eq!(events.caught + events.missed, 0);
}

#[test]
fn final_miss_stops_processing_remaining_stars() {
    let mut engine = quiet_engine();
    // Two misses up front, one frame each.
    for _ in 0..2 {
        engine.add_star(star_at(10.0, HEIGHT + 4.0));
        engine.step();
    }
    assert_eq!(engine.misses(), 2);

    // First star records the terminal miss; the second is mid-field and must
    // survive the frame untouched.
    engine.add_star(star_at(10.0, HEIGHT + 4.0));
    engine.add_star(star_at(10.0, HEIGHT / 2.0));

    let events = engine.step();

    assert!(events.ended);
    assert_eq!(events.missed, 1);
    assert_eq!(engine.stars().len(), 1);
}

#[test]
fn collision_wins_over_exit_when_both_apply() {
    // Stretch the paddle below the bottom boundary so a star can overlap it
    // while its top edge is already past the field. The collision test runs
    // first and must short-circuit the miss.
    let params = EngineParams {
        spawn_chance: 0.0,
        paddle_bottom_offset: 10.0,
        paddle_height: 40.0,
        ..EngineParams::default()
    };
    let mut engine = Engine::new(WIDTH, HEIGHT, params, 7);
    let paddle_center = engine.paddle().x + engine.paddle().width / 2.0;
    // After one step the star sits at y = HEIGHT + 8 with radius 5: top edge
    // past the boundary (exit predicate holds) and inside the paddle's
    // y-range (collision predicate holds).
    engine.add_star(star_at(paddle_center, HEIGHT + 6.0));

    let events = engine.step();

    assert_eq!(events.caught, 1);
    assert_eq!(events.missed, 0);
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.misses(), 0);
    assert!(engine.stars().is_empty());
}

#[test]
fn paddle_stays_clamped_for_any_input_sequence() {
    let mut engine = quiet_engine();
    let max_x = WIDTH - engine.paddle().width;

    engine.key_down("ArrowRight");
    for _ in 0..500 {
        engine.step();
        let x = engine.paddle().x;
        assert!((0.0..=max_x).contains(&x), "paddle escaped right: {x}");
    }
    assert_eq!(engine.paddle().x, max_x);

    engine.key_down("a");
    for _ in 0..500 {
        engine.step();
        let x = engine.paddle().x;
        assert!((0.0..=max_x).contains(&x), "paddle escaped left: {x}");
    }
    assert_eq!(engine.paddle().x, 0.0);
}

#[test]
fn key_matching_is_case_insensitive_and_dual_mapped() {
    let mut engine = quiet_engine();

    for key in ["ArrowLeft", "arrowleft", "a", "A"] {
        engine.key_up("d");
        assert_eq!(engine.paddle().dx, 0.0);
        engine.key_down(key);
        assert_eq!(engine.paddle().dx, -engine.paddle().speed, "key {key}");
    }
    for key in ["ArrowRight", "ARROWRIGHT", "d", "D"] {
        engine.key_up("A");
        engine.key_down(key);
        assert_eq!(engine.paddle().dx, engine.paddle().speed, "key {key}");
    }

    // Unmapped keys change nothing.
    engine.key_down("w");
    assert_eq!(engine.paddle().dx, engine.paddle().speed);
    engine.key_up("w");
    assert_eq!(engine.paddle().dx, engine.paddle().speed);

    // Releasing either key of the pair stops movement.
    engine.key_up("ArrowRight");
    assert_eq!(engine.paddle().dx, 0.0);
}

#[test]
fn reset_is_idempotent_from_any_state() {
    let mut engine = Engine::new(WIDTH, HEIGHT, EngineParams::default(), 99);
    // Dirty the session: move the paddle, score, miss out.
    engine.key_down("d");
    for _ in 0..40 {
        engine.step();
    }
    for _ in 0..3 {
        engine.add_star(star_at(10.0, HEIGHT + 4.0));
    }
    engine.key_up("d");
    while engine.is_running() {
        engine.step();
    }
    assert_eq!(engine.phase(), Phase::GameOver);

    for _ in 0..2 {
        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.misses(), 0);
        assert!(engine.stars().is_empty());
        assert_eq!(engine.phase(), Phase::Running);
        let centered = WIDTH / 2.0 - engine.paddle().width / 2.0;
        assert_eq!(engine.paddle().x, centered);
    }
}

#[test]
fn counters_never_decrease_within_a_session() {
    let mut engine = Engine::new(WIDTH, HEIGHT, EngineParams::default(), 42);
    let mut last_score = 0;
    let mut last_misses = 0;
    while engine.is_running() {
        engine.step();
        assert!(engine.score() >= last_score);
        assert!(engine.misses() >= last_misses);
        last_score = engine.score();
        last_misses = engine.misses();
    }
    assert_eq!(engine.misses(), 3);
}

#[test]
fn spawned_stars_respect_parameter_bounds() {
    let params = EngineParams {
        spawn_chance: 1.0,
        ..EngineParams::default()
    };
    let mut engine = Engine::new(WIDTH, HEIGHT, params, 1234);
    for _ in 0..50 {
        engine.step();
        if !engine.is_running() {
            engine.reset();
        }
    }
    assert!(!engine.stars().is_empty());
    for star in engine.stars() {
        assert!((3.0..8.0).contains(&star.radius), "radius {}", star.radius);
        assert!((1.3..2.8).contains(&star.vy), "speed {}", star.vy);
        assert!(star.x >= 0.0 && star.x <= WIDTH);
    }
}
