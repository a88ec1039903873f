//! Star Catcher site crate.
//!
//! Rust/WASM port of the personal-site front-end: theme toggle (manual plus a
//! photo-brightness heuristic), client-side contact-form validation, and the
//! star-catcher canvas mini game. The game core in [`engine`] is pure and
//! deterministic; all browser access lives in the adapter modules.

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod form;
pub mod theme;

mod game;
mod page;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire every page feature. Each collaborator tolerates missing DOM elements
/// by skipping itself, so the same bundle works on pages that only carry a
/// subset of the markup.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    theme::init(&win, &doc)?;
    page::init(&doc)?;
    form::init(&doc)?;
    game::init(&win, &doc)?;
    Ok(())
}
