//! Toast notifications.
//!
//! Toasts stack in the top-right corner, close on click and disappear after
//! the notice's duration.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event};

use bozor_core::Notice;

use crate::dom;

const TOAST_CLASS: &str = "bozor-toast";
const TOAST_SPACING_PX: usize = 56;
const TOAST_MARGIN_PX: usize = 16;

/// Inline style of a toast; `slot` is its position in the stack.
#[must_use]
pub fn toast_style(color: &str, slot: usize) -> String {
    let top = TOAST_MARGIN_PX + slot * TOAST_SPACING_PX;
    format!(
        "position:fixed;top:{top}px;right:{TOAST_MARGIN_PX}px;z-index:9999;\
         padding:12px 16px;border-radius:4px;color:#fff;background:{color};\
         cursor:pointer;box-shadow:0 2px 6px rgba(0,0,0,.2)"
    )
}

/// Show `notice` as a toast. Does nothing on pages without a `<body>`.
pub fn show(document: &Document, notice: &Notice) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        dom::console_warn("cart widget: cannot create toast");
        return;
    };

    let slot = dom::query_all(document, &format!(".{TOAST_CLASS}")).len();
    toast.set_class_name(TOAST_CLASS);
    if toast.set_attribute("role", "status").is_err()
        || toast
            .set_attribute("style", &toast_style(&notice.color, slot))
            .is_err()
    {
        dom::console_warn("cart widget: cannot style toast");
    }
    toast.set_text_content(Some(&notice.message));

    if body.append_child(&toast).is_err() {
        return;
    }

    close_on_click(&toast);
    let expiring = toast.clone();
    Timeout::new(notice.duration_ms, move || expiring.remove()).forget();
}

fn close_on_click(toast: &Element) {
    let target = toast.clone();
    let on_click = Closure::once(move |_: Event| target.remove());
    if toast
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .is_err()
    {
        dom::console_warn("cart widget: toast cannot be dismissed");
    }
    on_click.forget();
}
