//! Small DOM helpers. Every lookup degrades to `None` instead of failing.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

#[must_use]
pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First element matching `selector`.
#[must_use]
pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// All elements matching `selector`, in document order.
#[must_use]
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// First `<input>` matching `selector`.
#[must_use]
pub fn input(root: &Document, selector: &str) -> Option<HtmlInputElement> {
    query(root, selector)?.dyn_into::<HtmlInputElement>().ok()
}

/// Value of the first `<input>` matching `selector`.
#[must_use]
pub fn input_value(root: &Document, selector: &str) -> Option<String> {
    input(root, selector).map(|el| el.value())
}

/// Set the value of the first `<input>` matching `selector`, if any.
pub fn set_input_value(root: &Document, selector: &str, value: &str) {
    if let Some(el) = input(root, selector) {
        el.set_value(value);
    }
}

/// Set the text of the element with `id`, if any.
pub fn set_text_by_id(root: &Document, id: &str, text: &str) {
    if let Some(el) = root.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

pub fn console_error(message: &str) {
    web_sys::console::error_1(&message.into());
}
