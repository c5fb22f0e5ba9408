//! Event wiring between the page and the cart.
//!
//! Each handler borrows the cart for the whole operation; setting
//! `innerHTML` or input values does not dispatch events, so handlers never
//! re-enter.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rust_decimal::Decimal;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement};

use bozor_core::{AddMode, CartError, CartStore, ItemId, Outcome, parse_quantity};

use crate::config::WidgetConfig;
use crate::controls::{AddControl, BUTTON_ATTRIBUTES, PAGE_INPUTS, RowAction, format_set_input};
use crate::storage::LocalStorage;
use crate::surface::DomSurface;
use crate::{SharedCart, dom};

const ADD_BUTTONS: &str = ".add-cart";
const ADD_SET_BUTTONS: &str = ".add-cart-set";
const AMOUNT_INPUT: &str = ".amountOfProduct";
const SET_INPUT: &str = ".amountOfSet";

type Engine = CartStore<LocalStorage, DomSurface>;

/// Which product page inputs to rewrite after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputSync {
    Both,
    AmountOnly,
    SetOnly,
}

/// Attach every cart listener present on the page.
pub fn bind(cart: &SharedCart, document: &Document, config: &WidgetConfig) {
    bind_add_buttons(cart, document);
    bind_add_set_buttons(cart, document);
    bind_amount_input(cart, document);
    bind_set_input(cart, document);
    bind_delete_buttons(cart, document, &config.delete_button_id);
    bind_clear_button(cart, document, &config.clear_button_id);
    bind_cart_list(cart, document, &config.cart_list_id);
}

/// Paint badge, list and totals once after `delay_ms`.
pub fn schedule_first_paint(cart: &SharedCart, delay_ms: u32) {
    let cart = Rc::clone(cart);
    Timeout::new(delay_ms, move || {
        with_cart(&cart, Engine::redraw);
    })
    .forget();
}

fn bind_add_buttons(cart: &SharedCart, document: &Document) {
    for button in dom::query_all(document, ADD_BUTTONS) {
        let cart = Rc::clone(cart);
        let doc = document.clone();
        let source = button.clone();
        listen(&button, "click", move |_| {
            let Some(control) =
                AddControl::read(&BUTTON_ATTRIBUTES, |name| source.get_attribute(name))
            else {
                return;
            };
            with_cart(&cart, |cart| {
                cart.add_units(
                    &control.product,
                    Decimal::ONE,
                    AddMode::Accumulate,
                    control.set_size,
                )?;
                sync_inputs(cart, &doc, &control, InputSync::Both)
            });
        });
    }
}

fn bind_add_set_buttons(cart: &SharedCart, document: &Document) {
    for button in dom::query_all(document, ADD_SET_BUTTONS) {
        let cart = Rc::clone(cart);
        let doc = document.clone();
        let source = button.clone();
        listen(&button, "click", move |_| {
            let Some(control) =
                AddControl::read(&BUTTON_ATTRIBUTES, |name| source.get_attribute(name))
            else {
                return;
            };
            with_cart(&cart, |cart| {
                cart.add_set_units(
                    &control.product,
                    control.set_size,
                    Decimal::ONE,
                    AddMode::Accumulate,
                )?;
                sync_inputs(cart, &doc, &control, InputSync::Both)
            });
        });
    }
}

fn bind_amount_input(cart: &SharedCart, document: &Document) {
    let Some(input) = dom::input(document, AMOUNT_INPUT) else {
        return;
    };
    let cart = Rc::clone(cart);
    let doc = document.clone();
    let source = input.clone();
    listen(&input, "input", move |_| {
        let Some(control) = page_product(&doc) else {
            return;
        };
        let Some(quantity) = parse_quantity(&source.value()) else {
            return;
        };
        with_cart(&cart, |cart| {
            cart.add_units(&control.product, quantity, AddMode::Replace, control.set_size)?;
            sync_inputs(cart, &doc, &control, InputSync::SetOnly)
        });
    });
}

fn bind_set_input(cart: &SharedCart, document: &Document) {
    let Some(input) = dom::input(document, SET_INPUT) else {
        return;
    };
    let cart = Rc::clone(cart);
    let doc = document.clone();
    let source = input.clone();
    listen(&input, "input", move |_| {
        let Some(control) = page_product(&doc) else {
            return;
        };
        let Some(sets) = parse_quantity(&source.value()) else {
            return;
        };
        with_cart(&cart, |cart| {
            cart.add_set_units(&control.product, control.set_size, sets, AddMode::Replace)?;
            sync_inputs(cart, &doc, &control, InputSync::AmountOnly)
        });
    });
}

fn bind_delete_buttons(cart: &SharedCart, document: &Document, button_id: &str) {
    // Pages repeat this id, so select every match rather than the first
    for button in dom::query_all(document, &format!("#{button_id}")) {
        let cart = Rc::clone(cart);
        let source = button.clone();
        listen(&button, "click", move |_| {
            let Some(id) = source.get_attribute("data-item-id") else {
                return;
            };
            let name = source.get_attribute("data-item-name").unwrap_or_default();
            with_cart(&cart, |cart| cart.remove(&ItemId::new(id), &name));
        });
    }
}

fn bind_clear_button(cart: &SharedCart, document: &Document, button_id: &str) {
    let Some(button) = document.get_element_by_id(button_id) else {
        return;
    };
    let cart = Rc::clone(cart);
    listen(&button, "click", move |_| {
        with_cart(&cart, Engine::clear_all);
    });
}

/// Row buttons and quantity inputs are re-rendered on every change, so the
/// list itself carries delegated listeners.
fn bind_cart_list(cart: &SharedCart, document: &Document, list_id: &str) {
    let Some(list) = document.get_element_by_id(list_id) else {
        return;
    };

    let click_cart = Rc::clone(cart);
    let click_doc = document.clone();
    listen(&list, "click", move |event| {
        let Some(button) = event_element(&event)
            .and_then(|el| el.closest("[data-action]").ok().flatten())
        else {
            return;
        };
        let Some(action) = button
            .get_attribute("data-action")
            .as_deref()
            .and_then(RowAction::parse)
        else {
            return;
        };
        let Some(id) = button.get_attribute("data-item-id").map(ItemId::new) else {
            return;
        };
        let set_size = page_set_size(&click_doc);
        with_cart(&click_cart, |cart| match action {
            RowAction::Increase => cart.increase(&id),
            RowAction::Decrease => cart.decrease(&id, set_size),
            RowAction::Delete => cart.delete_item(&id),
        });
    });

    let change_cart = Rc::clone(cart);
    let change_doc = document.clone();
    let list_id = list_id.to_string();
    listen(&list, "change", move |event| {
        let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(id) = input.get_attribute("data-item-id").map(ItemId::new) else {
            return;
        };
        let element: &Element = input.as_ref();
        let had_focus = change_doc
            .active_element()
            .is_some_and(|active| &active == element);

        let raw = input.value();
        let outcome = with_cart(&change_cart, |cart| cart.update_from_text_input(&id, &raw));
        if outcome == Some(Outcome::Updated) && had_focus {
            refocus_quantity(&change_doc, &list_id, &id);
        }
    });
}

/// Rewrite the product page amount and set inputs from the counter mirror.
fn sync_inputs(
    cart: &Engine,
    document: &Document,
    control: &AddControl,
    which: InputSync,
) -> Result<(), CartError> {
    let id = &control.product.id;
    if which != InputSync::SetOnly {
        let count = cart.counter(id)?;
        dom::set_input_value(document, AMOUNT_INPUT, &count.normalize().to_string());
    }
    if which != InputSync::AmountOnly {
        let sets = cart.set_count_for(id, control.set_size)?;
        dom::set_input_value(document, SET_INPUT, &format_set_input(sets));
    }
    Ok(())
}

fn page_product(document: &Document) -> Option<AddControl> {
    AddControl::read(&PAGE_INPUTS, |selector| dom::input_value(document, selector))
}

/// Set size of the product page, one elsewhere. Rows fall back to it only
/// when their own set size is unknown.
fn page_set_size(document: &Document) -> Decimal {
    dom::input_value(document, PAGE_INPUTS.set_size)
        .and_then(|raw| parse_quantity(&raw))
        .filter(|size| *size > Decimal::ZERO)
        .unwrap_or(Decimal::ONE)
}

fn refocus_quantity(document: &Document, list_id: &str, id: &ItemId) {
    let selector = format!("#{list_id} input[data-item-id]");
    let replacement = dom::query_all(document, &selector)
        .into_iter()
        .find(|el| el.get_attribute("data-item-id").as_deref() == Some(id.as_str()))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if let Some(input) = replacement
        && input.focus().is_err()
    {
        dom::console_warn("cart widget: cannot refocus quantity input");
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Run `op` on the cart, logging failures. Returns `None` when the cart is
/// already borrowed or the operation failed.
fn with_cart<T>(
    cart: &SharedCart,
    op: impl FnOnce(&mut Engine) -> Result<T, CartError>,
) -> Option<T> {
    let Ok(mut engine) = cart.try_borrow_mut() else {
        dom::console_warn("cart widget: cart busy, event dropped");
        return None;
    };
    match op(&mut *engine) {
        Ok(value) => Some(value),
        Err(e) => {
            dom::console_error(&format!("cart widget: {e}"));
            None
        }
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        dom::console_warn(&format!("cart widget: cannot listen for {event}"));
    }
    closure.forget();
}
