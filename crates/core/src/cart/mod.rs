//! The cart engine.
//!
//! [`CartStore`] loads the cart snapshot from a [`Store`], applies one
//! operation, persists the new snapshot, rewrites the per-item counter
//! mirrors from it, and only then pushes the result to its [`CartSurface`].
//! Every operation runs to completion; there is nothing to cancel.
//!
//! # Invariants
//!
//! After any operation returns `Ok`:
//! - no line has `qty <= 0` or a non-positive set count after a set change,
//! - `product_<id>` equals the line's `qty` for every line,
//! - no `product_<id>` key exists for an id that is not in the cart,
//! - the `cart` key is absent when the cart is empty.

mod surface;
mod view;

pub use surface::{CartSurface, NullSurface, RecordingSurface, SurfaceEvent};
pub use view::{CURRENCY_SUFFIX, CartRow, CartView};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::CartConfig;
use crate::lenient;
use crate::store::{Store, StoreError};
use crate::types::price::round_whole;
use crate::types::{Cart, CartItem, ItemId, NoticeKind, ProductRef, parse_quantity, set_count};

/// Cart engine errors.
///
/// Only backend failures surface here. Malformed stored data and bad user
/// input never fail an operation.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How an add combines with an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddMode {
    /// Add to the current quantity.
    #[default]
    Accumulate,
    /// Overwrite the current quantity.
    Replace,
}

/// What an operation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new line was appended.
    Inserted,
    /// An existing line changed.
    Updated,
    /// A line was removed.
    Removed,
    /// The whole namespace was cleared.
    Cleared,
    /// Nothing changed (unknown id, rejected input, ...).
    Unchanged,
}

/// Cart state container over an injected store and surface.
#[derive(Debug)]
pub struct CartStore<S, U = NullSurface> {
    store: S,
    surface: U,
    config: CartConfig,
}

impl<S: Store> CartStore<S> {
    /// A cart with default configuration and no surface.
    pub fn new(store: S) -> Self {
        Self::with_surface(store, NullSurface, CartConfig::default())
    }
}

impl<S: Store, U: CartSurface> CartStore<S, U> {
    pub const fn with_surface(store: S, surface: U, config: CartConfig) -> Self {
        Self {
            store,
            surface,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn surface(&self) -> &U {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    pub fn into_parts(self) -> (S, U) {
        (self.store, self.surface)
    }

    /// Current cart contents.
    ///
    /// Lines with a non-positive quantity can only come from damaged
    /// snapshots; they are dropped here and disappear on the next write.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn cart(&self) -> Result<Cart, CartError> {
        let Some(raw) = self.store.get(&self.config.cart_key)? else {
            return Ok(Cart::new());
        };
        let mut cart = Cart::from_json(&raw);
        let broken: Vec<ItemId> = cart
            .iter()
            .filter(|item| item.qty <= Decimal::ZERO)
            .map(|item| item.id.clone())
            .collect();
        for id in &broken {
            warn!(item_id = %id, "Dropping stored line with non-positive quantity");
            cart.remove(id);
        }
        Ok(cart)
    }

    /// Add units of a product.
    ///
    /// Inserts a line with `quantity` when the product is not in the cart
    /// (`mode` is ignored then), otherwise adds to or replaces the quantity.
    /// The set count is recomputed as `qty / set_size` and a positive
    /// `set_size` is stored on the line. A resulting quantity of zero or less
    /// removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self, product), fields(item_id = %product.id))]
    pub fn add_units(
        &mut self,
        product: &ProductRef,
        quantity: Decimal,
        mode: AddMode,
        set_size: Decimal,
    ) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;

        let outcome = match cart.get_mut(&product.id) {
            None if quantity <= Decimal::ZERO => {
                debug!(%quantity, "Ignoring non-positive add for new line");
                return Ok(Outcome::Unchanged);
            }
            None => {
                let set = set_count(quantity, set_size);
                cart.push(CartItem::new(product, quantity, set).with_set_size(set_size));
                Outcome::Inserted
            }
            Some(item) => {
                let qty = match mode {
                    AddMode::Accumulate => item.qty.saturating_add(quantity),
                    AddMode::Replace => quantity,
                };
                if qty <= Decimal::ZERO {
                    cart.remove(&product.id);
                    Outcome::Removed
                } else {
                    item.qty = qty;
                    item.set = set_count(qty, set_size);
                    if set_size > Decimal::ZERO {
                        item.set_size = set_size;
                    }
                    Outcome::Updated
                }
            }
        };

        let notice = match outcome {
            Outcome::Removed => NoticeKind::Removed,
            _ => NoticeKind::Added,
        };
        self.commit(&cart, Some(notice))?;
        debug!(?outcome, "Units added");
        Ok(outcome)
    }

    /// Add whole sets of a product.
    ///
    /// A new line gets `set = set_count` and `qty = set_size * set_count`. An
    /// existing line accumulates sets, or takes `set_count` as is with
    /// [`AddMode::Replace`]; its quantity follows as `set_size * set`.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self, product), fields(item_id = %product.id))]
    pub fn add_set_units(
        &mut self,
        product: &ProductRef,
        set_size: Decimal,
        set_count: Decimal,
        mode: AddMode,
    ) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;

        let outcome = match cart.get_mut(&product.id) {
            None => {
                let qty = set_size.saturating_mul(set_count);
                if qty <= Decimal::ZERO || set_count <= Decimal::ZERO {
                    debug!(%qty, "Ignoring non-positive set add for new line");
                    return Ok(Outcome::Unchanged);
                }
                cart.push(CartItem::new(product, qty, set_count).with_set_size(set_size));
                Outcome::Inserted
            }
            Some(item) => {
                let set = match mode {
                    AddMode::Accumulate => item.set.saturating_add(set_count),
                    AddMode::Replace => set_count,
                };
                let qty = set_size.saturating_mul(set);
                if qty <= Decimal::ZERO || set <= Decimal::ZERO {
                    cart.remove(&product.id);
                    Outcome::Removed
                } else {
                    item.set = set;
                    item.qty = qty;
                    item.set_size = set_size;
                    Outcome::Updated
                }
            }
        };

        let notice = match outcome {
            Outcome::Removed => NoticeKind::Removed,
            _ => NoticeKind::Added,
        };
        self.commit(&cart, Some(notice))?;
        Ok(outcome)
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn increase(&mut self, id: &ItemId) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;
        let Some(item) = cart.get_mut(id) else {
            return Ok(Outcome::Unchanged);
        };
        item.qty = item.qty.saturating_add(Decimal::ONE);

        self.commit(&cart, None)?;
        Ok(Outcome::Updated)
    }

    /// Take one unit off a line, removing it when nothing is left.
    ///
    /// The set count is recomputed with the line's own set size. `set_size`
    /// is used only for lines whose size is unknown.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn decrease(&mut self, id: &ItemId, set_size: Decimal) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;
        let Some(item) = cart.get_mut(id) else {
            return Ok(Outcome::Unchanged);
        };

        let qty = item.qty.saturating_sub(Decimal::ONE);
        let outcome = if qty <= Decimal::ZERO {
            cart.remove(id);
            Outcome::Removed
        } else {
            let size = item.units_per_set().unwrap_or(set_size);
            item.qty = qty;
            item.set = set_count(qty, size);
            Outcome::Updated
        };

        let notice = (outcome == Outcome::Removed).then_some(NoticeKind::Removed);
        self.commit(&cart, notice)?;
        Ok(outcome)
    }

    /// Take one set off a line.
    ///
    /// The set count is rounded to a whole number first, so `2.5` sets become
    /// `2`. The quantity follows from the line's own set size, falling back to
    /// `set_size`. A line with no sets is left alone.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn decrease_set(&mut self, id: &ItemId, set_size: Decimal) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;
        let Some(item) = cart.get_mut(id) else {
            return Ok(Outcome::Unchanged);
        };
        if item.set <= Decimal::ZERO {
            return Ok(Outcome::Unchanged);
        }

        let size = item.units_per_set().unwrap_or(set_size);
        let set = round_whole(item.set).saturating_sub(Decimal::ONE);
        let qty = set.saturating_mul(size);
        let outcome = if set <= Decimal::ZERO || qty <= Decimal::ZERO {
            cart.remove(id);
            Outcome::Removed
        } else {
            item.set = set;
            item.qty = qty;
            Outcome::Updated
        };

        let notice = (outcome == Outcome::Removed).then_some(NoticeKind::Removed);
        self.commit(&cart, notice)?;
        Ok(outcome)
    }

    /// Set a line's quantity from a text field.
    ///
    /// Input that is not a number of at least one is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn update_from_text_input(&mut self, id: &ItemId, raw: &str) -> Result<Outcome, CartError> {
        let Some(qty) = parse_quantity(raw).filter(|qty| *qty >= Decimal::ONE) else {
            debug!("Ignoring quantity input");
            return Ok(Outcome::Unchanged);
        };

        let mut cart = self.cart()?;
        let Some(item) = cart.get_mut(id) else {
            return Ok(Outcome::Unchanged);
        };
        item.qty = qty;

        self.commit(&cart, None)?;
        Ok(Outcome::Updated)
    }

    /// Remove a product from the cart.
    ///
    /// Afterwards the line and its counter key are both gone. The removal
    /// notice is shown even when the product was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &ItemId, name: &str) -> Result<Outcome, CartError> {
        debug!(name, "Removing product");
        self.remove_line(id)
    }

    /// Delete a line from the cart. Same postcondition as [`Self::remove`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn delete_item(&mut self, id: &ItemId) -> Result<Outcome, CartError> {
        self.remove_line(id)
    }

    /// Erase the entire storage namespace, not only cart keys.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store fails.
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) -> Result<Outcome, CartError> {
        self.store.clear()?;
        self.refresh(&Cart::new())?;
        let notice = self.config.notice(NoticeKind::Cleared);
        self.surface.notify(&notice);
        debug!("Cart cleared");
        Ok(Outcome::Cleared)
    }

    /// Project the stored cart and push it to the surface.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn render(&mut self) -> Result<CartView, CartError> {
        let cart = self.cart()?;
        let view = CartView::from(&cart);
        self.surface.render(&view);
        Ok(view)
    }

    /// Push badge and cart list to the surface without changing anything.
    ///
    /// Used for the first paint after page load.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn redraw(&mut self) -> Result<CartView, CartError> {
        let cart = self.cart()?;
        self.refresh(&cart)?;
        Ok(CartView::from(&cart))
    }

    /// Sum of every counter mirror, for the cart icon badge.
    ///
    /// Scans all keys with the counter prefix; unparsable values count as zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be enumerated.
    pub fn total_item_count(&self) -> Result<Decimal, CartError> {
        let counters = self.store.scan_prefix(&self.config.counter_prefix)?;
        Ok(counters
            .iter()
            .map(|(_, value)| lenient::decimal_from_str(value))
            .fold(Decimal::ZERO, Decimal::saturating_add))
    }

    /// Counter mirror of one product, zero when missing or malformed.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn counter(&self, id: &ItemId) -> Result<Decimal, CartError> {
        let key = id.counter_key(&self.config.counter_prefix);
        Ok(self
            .store
            .get(&key)?
            .map_or(Decimal::ZERO, |raw| lenient::decimal_from_str(&raw)))
    }

    /// Sets the counter of one product amounts to.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn set_count_for(&self, id: &ItemId, set_size: Decimal) -> Result<Decimal, CartError> {
        Ok(set_count(self.counter(id)?, set_size))
    }

    /// Price of one line, `None` when the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store cannot be read.
    pub fn line_total(&self, id: &ItemId) -> Result<Option<Decimal>, CartError> {
        Ok(self.cart()?.get(id).map(CartItem::line_total))
    }

    fn remove_line(&mut self, id: &ItemId) -> Result<Outcome, CartError> {
        let mut cart = self.cart()?;
        let outcome = if cart.remove(id).is_some() {
            Outcome::Removed
        } else {
            Outcome::Unchanged
        };

        self.store
            .remove(&id.counter_key(&self.config.counter_prefix))?;
        self.commit(&cart, Some(NoticeKind::Removed))?;
        Ok(outcome)
    }

    /// Persist `cart`, rewrite the counters from it, then update the surface.
    fn commit(&mut self, cart: &Cart, notice: Option<NoticeKind>) -> Result<(), CartError> {
        if cart.is_empty() {
            self.store.remove(&self.config.cart_key)?;
        } else {
            self.store.set(&self.config.cart_key, &cart.to_json()?)?;
        }
        self.sync_counters(cart)?;
        self.refresh(cart)?;

        if let Some(kind) = notice {
            let notice = self.config.notice(kind);
            self.surface.notify(&notice);
        }
        Ok(())
    }

    fn sync_counters(&mut self, cart: &Cart) -> Result<(), CartError> {
        let prefix = self.config.counter_prefix.clone();
        for (key, _) in self.store.scan_prefix(&prefix)? {
            let id = ItemId::new(key.strip_prefix(prefix.as_str()).unwrap_or_default());
            if !cart.contains(&id) {
                self.store.remove(&key)?;
            }
        }
        for item in cart {
            let key = item.id.counter_key(&prefix);
            self.store.set(&key, &item.qty.normalize().to_string())?;
        }
        Ok(())
    }

    fn refresh(&mut self, cart: &Cart) -> Result<(), CartError> {
        let count = self.total_item_count()?;
        self.surface.badge(count);
        self.surface.render(&CartView::from(cart));
        Ok(())
    }
}
