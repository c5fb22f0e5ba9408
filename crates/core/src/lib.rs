//! Bozor Core - Cart state engine and shared types.
//!
//! This crate provides everything the cart needs that does not touch a real
//! browser or filesystem:
//! - `widget` - WASM binding over `localStorage` and the page DOM
//! - `cli` - Command-line driver over a JSON file store
//!
//! # Architecture
//!
//! The cart is a flat list of [`CartItem`] records persisted under a single
//! key of a [`Store`], with a per-item counter key mirroring each quantity.
//! [`CartStore`] owns the state transitions; presentation is pushed through
//! the [`CartSurface`] trait so the engine stays testable with
//! [`MemoryStore`] and [`RecordingSurface`].
//!
//! # Modules
//!
//! - [`types`] - Item ids, cart items, notices, quantity arithmetic
//! - [`store`] - Key/value storage abstraction and the in-memory backend
//! - [`cart`] - The cart engine, its surface trait and the display projection
//! - [`config`] - Storage keys and notification texts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod store;
pub mod types;

mod lenient;

pub use cart::{
    AddMode, CURRENCY_SUFFIX, CartError, CartRow, CartStore, CartSurface, CartView, NullSurface,
    Outcome, RecordingSurface, SurfaceEvent,
};
pub use config::CartConfig;
pub use store::{MemoryStore, Store, StoreError};
pub use types::*;
