//! Contact-form validation (client only).
//!
//! The checks themselves are pure functions over the trimmed field values so
//! they run under native `cargo test`; the DOM wiring below them writes the
//! per-field messages into `.error[data-for="<id>"]` slots and a transient
//! status line. There is no backend: a valid submission is acknowledged
//! locally and the form is cleared.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, window};

pub const NAME_ERROR: &str = "Please enter your name.";
pub const EMAIL_ERROR: &str = "Enter a valid email.";
pub const MESSAGE_ERROR: &str = "Please write at least 10 characters.";

const STATUS_TEXT: &str = "Thanks! Your message was captured locally.";
const STATUS_CLEAR_MS: i32 = 4000;
const MIN_MESSAGE_CHARS: usize = 10;

/// Per-field outcome: `None` means the field passed, `Some` carries the
/// message to show inline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Check all three fields. Inputs are expected pre-trimmed (the DOM glue
/// trims on read).
pub fn validate(name: &str, email: &str, message: &str) -> Validation {
    Validation {
        name: if name.is_empty() {
            Some(NAME_ERROR)
        } else {
            None
        },
        email: if looks_like_email(email) {
            None
        } else {
            Some(EMAIL_ERROR)
        },
        message: if message.chars().count() >= MIN_MESSAGE_CHARS {
            None
        } else {
            Some(MESSAGE_ERROR)
        },
    }
}

/// Loose shape check: no whitespace, something before an `@`, and a dot with
/// characters on both sides somewhere after it. Deliverability is the
/// mail server's problem.
pub fn looks_like_email(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = s.find('@') else {
        return false;
    };
    if at == 0 {
        return false;
    }
    let domain = &s[at + 1..];
    match domain.rfind('.') {
        Some(dot) => dot >= 1 && dot + 1 < domain.len(),
        None => false,
    }
}

/// Wire submit handling onto `#contactForm` if present.
pub fn init(doc: &Document) -> Result<(), JsValue> {
    let Some(form_el) = doc.get_element_by_id("contactForm") else {
        return Ok(());
    };
    let form: HtmlFormElement = form_el.dyn_into()?;

    let doc2 = doc.clone();
    let form2 = form.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        evt.prevent_default();

        let name = field_value(&doc2, "name");
        let email = field_value(&doc2, "email");
        let message = field_value(&doc2, "message");

        let outcome = validate(&name, &email, &message);
        set_error(&doc2, "name", outcome.name);
        set_error(&doc2, "email", outcome.email);
        set_error(&doc2, "message", outcome.message);
        if !outcome.is_ok() {
            return;
        }

        form2.reset();
        if let Some(status) = doc2.get_element_by_id("formStatus") {
            status.set_text_content(Some(STATUS_TEXT));
            schedule_status_clear(status);
        }
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Trimmed value of an input or textarea by id; absent fields read as empty
/// and fail validation naturally.
fn field_value(doc: &Document, id: &str) -> String {
    let Some(el) = doc.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value().trim().to_string();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value().trim().to_string();
    }
    String::new()
}

fn set_error(doc: &Document, id: &str, message: Option<&'static str>) {
    let selector = format!(".error[data-for=\"{id}\"]");
    if let Ok(Some(el)) = doc.query_selector(&selector) {
        el.set_text_content(Some(message.unwrap_or("")));
    }
}

/// Clear the status line a few seconds after a successful submit.
fn schedule_status_clear(status: web_sys::Element) {
    if let Some(win) = window() {
        let cb = Closure::once_into_js(move || {
            status.set_text_content(Some(""));
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            STATUS_CLEAR_MS,
        );
    }
}
