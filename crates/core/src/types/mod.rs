//! Core types for the cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod item;
pub mod notice;
pub mod price;

pub use id::ItemId;
pub use item::{Cart, CartItem, ProductRef};
pub use notice::{Notice, NoticeKind};
pub use price::{format_uzs, parse_quantity, set_count};
