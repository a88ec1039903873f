//! Browser adapter for the star-catcher engine.
//!
//! Everything DOM-flavored lives here: canvas + 2d context lookup, keyboard
//! listeners, the restart button, score/miss counter writes and the
//! `requestAnimationFrame` loop. The engine itself (in [`crate::engine`]) is
//! stepped once per frame and rendered from its public accessors.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window, window};

use crate::engine::{Engine, EngineParams, StepEvents};

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    engine: Engine,
    /// True while a frame-callback chain is live. Guards restart against
    /// scheduling a second concurrent loop.
    scheduled: bool,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = const { RefCell::new(None) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Wire up the mini game if the page carries a `#gameCanvas`. Pages without
/// one (or without a 2d context) simply skip the feature.
pub fn init(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let Some(el) = doc.get_element_by_id("gameCanvas") else {
        return Ok(());
    };
    let canvas: HtmlCanvasElement = el.dyn_into()?;
    let Some(ctx_obj) = canvas.get_context("2d")? else {
        return Ok(());
    };
    let ctx: CanvasRenderingContext2d = ctx_obj.dyn_into()?;

    // Seed spawn randomness from the page clock; determinism only matters in
    // tests, which construct their own engines.
    let seed = win
        .performance()
        .map(|p| p.now())
        .unwrap_or(0.0)
        .to_bits();
    let engine = Engine::new(
        canvas.width() as f64,
        canvas.height() as f64,
        EngineParams::default(),
        seed,
    );

    write_counter(doc, "score", engine.score());
    write_counter(doc, "misses", engine.misses());

    GAME_STATE.with(|cell| {
        cell.replace(Some(GameState {
            canvas,
            ctx,
            engine,
            scheduled: false,
        }))
    });

    // Movement keys listen on the document so the canvas needs no focus.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.engine.key_down(&evt.key());
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.engine.key_up(&evt.key());
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(btn) = doc.get_element_by_id("restartBtn") {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.engine.reset();
                }
            });
            if let Some(doc) = window().and_then(|w| w.document()) {
                write_counter(&doc, "score", 0);
                write_counter(&doc, "misses", 0);
            }
            ensure_loop();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    ensure_loop();
    Ok(())
}

/// Start the frame loop unless one is already scheduled. The loop stops
/// rescheduling itself the frame the session ends; restart calls back in here
/// to resume.
fn ensure_loop() {
    let already = GAME_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        match guard.as_mut() {
            Some(state) if !state.scheduled => {
                state.scheduled = true;
                false
            }
            _ => true,
        }
    });
    if already {
        return;
    }

    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep = GAME_STATE.with(|cell| {
            let mut keep = false;
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.engine.is_running() {
                    let events = state.engine.step();
                    render(state, ts);
                    publish(&events, state);
                    keep = state.engine.is_running();
                }
                state.scheduled = keep;
            }
            keep
        });
        if keep {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Push per-frame counter changes (and the game-over overlay) out to the
/// page. Counters are only written on frames where they moved.
fn publish(events: &StepEvents, state: &GameState) {
    if events.caught > 0 || events.missed > 0 {
        if let Some(doc) = window().and_then(|w| w.document()) {
            if events.caught > 0 {
                write_counter(&doc, "score", state.engine.score());
            }
            if events.missed > 0 {
                write_counter(&doc, "misses", state.engine.misses());
            }
        }
    }
    if events.ended {
        draw_game_over(state);
    }
}

/// Missing counter elements are tolerated by skipping the write.
fn write_counter(doc: &Document, id: &str, value: u32) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(&value.to_string()));
    }
}

fn render(state: &GameState, ts: f64) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    let ctx = &state.ctx;

    ctx.clear_rect(0.0, 0.0, w, h);
    draw_background(ctx, w, h, ts);
    draw_paddle(state);

    ctx.save();
    ctx.set_shadow_color("#6ae3ff");
    for star in state.engine.stars() {
        ctx.begin_path();
        ctx.arc(star.x, star.y, star.radius, 0.0, std::f64::consts::TAU)
            .ok();
        ctx.set_fill_style_str(if star.glow {
            "rgba(255,255,255,0.9)"
        } else {
            "rgba(255,255,255,0.7)"
        });
        ctx.set_shadow_blur(if star.glow { 20.0 } else { 8.0 });
        ctx.fill();
    }
    ctx.restore();
}

/// Faint drifting dots, phase-shifted per index off the frame timestamp.
/// Pure decoration; no game state involved.
fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64, ts: f64) {
    ctx.save();
    ctx.set_fill_style_str("rgba(255,255,255,0.03)");
    for i in 0..40 {
        let x = ((i as f64 + ts / 900.0).sin() + 1.0) / 2.0 * w;
        let y = ((i as f64 + ts / 1000.0).cos() + 1.0) / 2.0 * h;
        ctx.begin_path();
        ctx.arc(x, y, 1.2, 0.0, std::f64::consts::TAU).ok();
        ctx.fill();
    }
    ctx.restore();
}

fn draw_paddle(state: &GameState) {
    let ctx = &state.ctx;
    let p = state.engine.paddle();
    ctx.save();
    let grad = ctx.create_linear_gradient(p.x, p.y, p.x + p.width, p.y);
    grad.add_color_stop(0.0, "#6ae3ff").ok();
    grad.add_color_stop(1.0, "#b28dff").ok();
    ctx.set_fill_style_canvas_gradient(&grad);
    round_rect(ctx, p.x, p.y, p.width, p.height, 8.0);
    ctx.fill();
    ctx.restore();
}

/// Rounded-rect path via arc-to corners (canvas `roundRect` is still patchy
/// across the web-sys surface we target).
fn round_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
}

/// Translucent end-of-session overlay, drawn once on the frame that recorded
/// the final miss.
fn draw_game_over(state: &GameState) {
    let ctx = &state.ctx;
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    ctx.save();
    ctx.set_fill_style_str("rgba(0,0,0,0.5)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#fff");
    ctx.set_text_align("center");
    ctx.set_font("bold 28px Inter, sans-serif");
    ctx.fill_text("Game Over", w / 2.0, h / 2.0 - 20.0).ok();
    ctx.set_font("16px Inter, sans-serif");
    ctx.fill_text(
        &format!("Score: {}", state.engine.score()),
        w / 2.0,
        h / 2.0 + 10.0,
    )
    .ok();
    ctx.restore();
}
