//! Theme preference collaborator.
//!
//! Two ways to change theme: the manual toggle button, and a heuristic that
//! samples the portrait photo and picks light or dark to match its average
//! brightness. The chosen theme is a single `"theme"` string in localStorage
//! and a `data-theme` attribute on the document element; everything else is
//! CSS on the page side.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Window};

const THEME_KEY: &str = "theme";
const LIGHT: &str = "light";
const DARK: &str = "dark";

/// Side length of the offscreen canvas the photo is downsampled into before
/// averaging. 32x32 is plenty for a brightness estimate.
const SAMPLE_SIZE: u32 = 32;

/// Rec. 709 luma average over RGBA pixel data, 0..=255. Alpha is ignored.
pub fn average_luma(rgba: &[u8]) -> f64 {
    let mut sum = 0.0;
    let mut pixels = 0usize;
    for px in rgba.chunks_exact(4) {
        sum += 0.2126 * px[0] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[2] as f64;
        pixels += 1;
    }
    if pixels == 0 { 0.0 } else { sum / pixels as f64 }
}

/// Bright photos get the light theme, dark photos the dark one.
pub fn theme_for_luma(avg: f64) -> &'static str {
    if avg > 127.0 { LIGHT } else { DARK }
}

/// Apply the stored preference and wire the two theme controls. Buttons that
/// are absent from the page are skipped.
pub fn init(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let stored = read_stored_theme(win);
    apply_theme(doc, stored.as_deref());

    if let Some(btn) = doc.get_element_by_id("themeToggle") {
        let win2 = win.clone();
        let doc2 = doc.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let is_light = doc2
                .document_element()
                .and_then(|root| root.get_attribute("data-theme"))
                .is_some_and(|t| t == LIGHT);
            let next = if is_light { DARK } else { LIGHT };
            apply_theme(&doc2, Some(next));
            store_theme(&win2, next);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(btn) = doc.get_element_by_id("swapTheme") {
        let win2 = win.clone();
        let doc2 = doc.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let _ = match_theme_to_photo(&win2, &doc2);
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Light sets `data-theme="light"` on the root element; anything else clears
/// the attribute and falls back to the default dark styling.
fn apply_theme(doc: &Document, theme: Option<&str>) {
    if let Some(root) = doc.document_element() {
        if theme == Some(LIGHT) {
            root.set_attribute("data-theme", LIGHT).ok();
        } else {
            root.remove_attribute("data-theme").ok();
        }
    }
}

fn read_stored_theme(win: &Window) -> Option<String> {
    win.local_storage()
        .ok()
        .flatten()
        .and_then(|store| store.get_item(THEME_KEY).ok().flatten())
}

/// Storage failures (quota, private mode) are not surfaced to the caller.
fn store_theme(win: &Window, theme: &str) {
    if let Ok(Some(store)) = win.local_storage() {
        let _ = store.set_item(THEME_KEY, theme);
    }
}

/// Sample `#photo img` into a small offscreen canvas and set the theme to
/// match its average brightness. Cross-origin images block the pixel read;
/// in that case the operation is abandoned and the theme stays as it was.
fn match_theme_to_photo(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let Some(img_el) = doc.query_selector("#photo img")? else {
        return Ok(());
    };
    let img: HtmlImageElement = img_el.dyn_into()?;

    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_width(SAMPLE_SIZE);
    canvas.set_height(SAMPLE_SIZE);
    let Some(ctx_obj) = canvas.get_context("2d")? else {
        return Ok(());
    };
    let ctx: CanvasRenderingContext2d = ctx_obj.dyn_into()?;

    let side = SAMPLE_SIZE as f64;
    if ctx
        .draw_image_with_html_image_element_and_dw_and_dh(&img, 0.0, 0.0, side, side)
        .is_err()
    {
        return Ok(());
    }
    let Ok(data) = ctx.get_image_data(0.0, 0.0, side, side) else {
        return Ok(());
    };

    let next = theme_for_luma(average_luma(&data.data()));
    apply_theme(doc, Some(next));
    store_theme(win, next);
    Ok(())
}
