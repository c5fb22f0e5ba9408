//! Bozor Widget - Browser binding of the cart.
//!
//! Loaded as a WASM module on every storefront page. It keeps the cart in
//! `localStorage` and wires the page's cart controls to [`bozor_core::CartStore`].
//!
//! # Page contract
//!
//! - `.add-cart` / `.add-cart-set` buttons carrying `data-item-id`,
//!   `data-item-name`, `data-item-price-uzs`, `data-item-cover`,
//!   `data-item-set` and `data-item-amount`
//! - `.amountOfProduct` / `.amountOfSet` inputs on the product page, next to
//!   hidden `.productSingleId`, `.productName`, `.productPriceUzs`,
//!   `.productCover`, `.productSetAmount` and `.productTotalAmount` inputs
//! - `#itemCount`, `#cartList`, `#totalPrice`, `#totalSinglePriceUzs`
//! - `#deleteFromCart` and `#clearCartButton` buttons
//!
//! Missing elements are skipped; a page only needs the parts it shows.

// wasm-bindgen glue expands to unsafe blocks
#![allow(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Event};

use bozor_core::{CartStore, StoreError};

pub mod config;
pub mod controls;
pub mod dom;
pub mod events;
pub mod storage;
pub mod surface;
pub mod template;
pub mod toast;

pub use config::WidgetConfig;
pub use storage::LocalStorage;
pub use surface::DomSurface;

/// The cart as shared by every event handler on the page.
pub type SharedCart = Rc<RefCell<CartStore<LocalStorage, DomSurface>>>;

/// Errors that prevent the widget from starting.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = dom::document() else {
        dom::console_error("cart widget: no document");
        return;
    };

    if still_loading(&document.ready_state()) {
        let target = document.clone();
        let on_ready = Closure::once(move |_: Event| run(&document));
        if target
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .is_err()
        {
            dom::console_error("cart widget: cannot wait for DOMContentLoaded");
        }
        on_ready.forget();
    } else {
        run(&document);
    }
}

/// `document.readyState` before `DOMContentLoaded`.
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn run(document: &Document) {
    if let Err(e) = mount(document) {
        dom::console_error(&format!("cart widget: {e}"));
    }
}

/// Build the cart for `document`, bind its controls and schedule the first paint.
///
/// # Errors
///
/// Returns `WidgetError` if `localStorage` is unavailable.
pub fn mount(document: &Document) -> Result<SharedCart, WidgetError> {
    let config = WidgetConfig::from_document(document);
    let store = LocalStorage::from_window()?;
    let surface = DomSurface::new(document.clone(), config.clone());
    let cart = Rc::new(RefCell::new(CartStore::with_surface(
        store,
        surface,
        config.cart_config(),
    )));

    events::bind(&cart, document, &config);
    events::schedule_first_paint(&cart, config.init_delay_ms);
    Ok(cart)
}
