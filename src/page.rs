//! Small page glue: footer year fill and smooth scrolling for in-page nav
//! links. Neither touches the game or theme state.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

pub fn init(doc: &Document) -> Result<(), JsValue> {
    if let Some(el) = doc.get_element_by_id("year") {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }

    let links = doc.query_selector_all(".nav-links a")?;
    for i in 0..links.length() {
        let Some(node) = links.item(i) else { continue };
        let Ok(link) = node.dyn_into::<Element>() else {
            continue;
        };
        let doc2 = doc.clone();
        let link2 = link.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(href) = link2.get_attribute("href") else {
                return;
            };
            if !href.starts_with('#') {
                return;
            }
            evt.prevent_default();
            if let Ok(Some(target)) = doc2.query_selector(&href) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
