//! Star-catcher game core.
//!
//! Pure simulation: no `web_sys`, no timers, no canvas. The browser adapter in
//! [`crate::game`] owns an [`Engine`], forwards keyboard events to it, calls
//! [`Engine::step`] once per animation frame and renders whatever state it
//! finds afterwards. Tests drive `step()` synchronously with a fixed seed, so
//! every outcome here is deterministic.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Tunable constants for one engine instance. `Default` matches the live
/// site; tests override individual fields (most often `spawn_chance: 0.0`)
/// to get a quiet play-field.
#[derive(Clone, Copy, Debug)]
pub struct EngineParams {
    pub paddle_width: f64,
    pub paddle_height: f64,
    pub paddle_speed: f64,
    /// Distance from the bottom boundary to the paddle's top edge.
    pub paddle_bottom_offset: f64,
    /// Per-frame probability of spawning one star.
    pub spawn_chance: f64,
    /// Misses that end the session.
    pub miss_limit: u32,
    /// Star diameter range, px. Radius ends up at half of this.
    pub star_min_size: f64,
    pub star_max_size: f64,
    /// Star fall speed range, px per frame.
    pub star_min_speed: f64,
    pub star_max_speed: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            paddle_width: 100.0,
            paddle_height: 16.0,
            paddle_speed: 6.0,
            paddle_bottom_offset: 28.0,
            spawn_chance: 0.03,
            miss_limit: 3,
            star_min_size: 6.0,
            star_max_size: 16.0,
            star_min_speed: 1.3,
            star_max_speed: 2.8,
        }
    }
}

/// A falling star. Owned exclusively by the engine's live collection; removed
/// the same frame it is caught or crosses the bottom boundary.
#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Downward speed, px per frame.
    pub vy: f64,
    /// Cosmetic only: rendered brighter with a larger shadow blur.
    pub glow: bool,
}

/// Player-controlled paddle. `dx` is velocity, not position: key-down sets it
/// to ±speed, key-up zeroes it.
#[derive(Clone, Copy, Debug)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub dx: f64,
}

/// Session phase. `GameOver` freezes all state until `reset()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// What happened during one `step()`. The adapter uses this to only touch the
/// DOM counters on frames where they actually changed.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepEvents {
    pub caught: u32,
    pub missed: u32,
    /// True on the single step where the miss limit was reached.
    pub ended: bool,
}

/// One game session over a fixed-size play-field.
pub struct Engine {
    width: f64,
    height: f64,
    params: EngineParams,
    paddle: Paddle,
    stars: Vec<Star>,
    score: u32,
    misses: u32,
    phase: Phase,
    rng: StdRng,
}

impl Engine {
    pub fn new(width: f64, height: f64, params: EngineParams, seed: u64) -> Self {
        let paddle = Paddle {
            x: width / 2.0 - params.paddle_width / 2.0,
            y: height - params.paddle_bottom_offset,
            width: params.paddle_width,
            height: params.paddle_height,
            speed: params.paddle_speed,
            dx: 0.0,
        };
        Self {
            width,
            height,
            params,
            paddle,
            stars: Vec::new(),
            score: 0,
            misses: 0,
            phase: Phase::Running,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a fresh session: empty star collection, zeroed counters, paddle
    /// re-centered, phase back to `Running`. Idempotent from any phase. A
    /// held movement key keeps its velocity across the restart.
    pub fn reset(&mut self) {
        self.stars.clear();
        self.score = 0;
        self.misses = 0;
        self.phase = Phase::Running;
        self.paddle.x = self.width / 2.0 - self.paddle.width / 2.0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Insert a star directly, bypassing the random spawner. The adapter
    /// never calls this; tests use it to set up exact scenarios.
    pub fn add_star(&mut self, star: Star) {
        self.stars.push(star);
    }

    /// Key-down handler. Matching is case-insensitive; arrows and the A/D
    /// pair map to the same directions.
    pub fn key_down(&mut self, key: &str) {
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "arrowleft" | "a" => self.paddle.dx = -self.paddle.speed,
            "arrowright" | "d" => self.paddle.dx = self.paddle.speed,
            _ => {}
        }
    }

    /// Key-up handler. Releasing any mapped key stops the paddle, so a
    /// key-down/key-up race resolves to whichever event arrived last.
    pub fn key_up(&mut self, key: &str) {
        let key = key.to_ascii_lowercase();
        if matches!(key.as_str(), "arrowleft" | "arrowright" | "a" | "d") {
            self.paddle.dx = 0.0;
        }
    }

    /// Advance the simulation by one frame. A no-op once the session has
    /// ended.
    ///
    /// Order per frame: move and clamp the paddle, maybe spawn one star, then
    /// advance every star and settle it. The collision test runs before the
    /// exit test and short-circuits it, so a star that overlaps the paddle
    /// while already past the bottom boundary scores and never counts as a
    /// miss. The step that records the final miss stops processing the
    /// remaining stars.
    pub fn step(&mut self) -> StepEvents {
        let mut events = StepEvents::default();
        if self.phase != Phase::Running {
            return events;
        }

        self.paddle.x = (self.paddle.x + self.paddle.dx)
            .min(self.width - self.paddle.width)
            .max(0.0);

        if self.rng.gen_bool(self.params.spawn_chance) {
            self.spawn_star();
        }

        let mut i = 0;
        while i < self.stars.len() {
            self.stars[i].y += self.stars[i].vy;
            let star = self.stars[i];

            if self.hits_paddle(&star) {
                self.score += 1;
                events.caught += 1;
                self.stars.remove(i);
                continue;
            }

            if star.y - star.radius > self.height {
                self.misses += 1;
                events.missed += 1;
                self.stars.remove(i);
                if self.misses >= self.params.miss_limit {
                    self.phase = Phase::GameOver;
                    events.ended = true;
                    break;
                }
                continue;
            }

            i += 1;
        }

        events
    }

    /// Axis-aligned overlap between the star's bounding circle and the paddle
    /// rectangle, per axis.
    fn hits_paddle(&self, star: &Star) -> bool {
        let p = &self.paddle;
        let within_x = star.x + star.radius > p.x && star.x - star.radius < p.x + p.width;
        let within_y = star.y + star.radius > p.y && star.y - star.radius < p.y + p.height;
        within_x && within_y
    }

    fn spawn_star(&mut self) {
        let size = self
            .rng
            .gen_range(self.params.star_min_size..self.params.star_max_size);
        let star = Star {
            x: self.rng.gen_range(0.0..(self.width - size).max(1.0)),
            y: -size,
            radius: size / 2.0,
            vy: self
                .rng
                .gen_range(self.params.star_min_speed..self.params.star_max_speed),
            glow: self.rng.gen_bool(0.5),
        };
        self.stars.push(star);
    }
}
