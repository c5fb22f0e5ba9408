//! Integration tests for the Bozor cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bozor-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Engine invariants over random operation sequences
//! - `cart_scenarios` - End-to-end cart flows against the in-memory store
//! - `file_store` - Cart state persisted through the JSON file store

use rust_decimal::Decimal;

use bozor_core::{CartConfig, CartStore, ProductRef, RecordingSurface, Store};

/// A product priced in whole sum.
#[must_use]
pub fn product(id: &str, price: i64) -> ProductRef {
    ProductRef::new(id, format!("Product {id}"), Decimal::from(price), "/img/p.jpg")
}

/// Engine over `store` recording everything pushed to the page.
pub fn engine<S: Store>(store: S) -> CartStore<S, RecordingSurface> {
    CartStore::with_surface(store, RecordingSurface::new(), CartConfig::default())
}
