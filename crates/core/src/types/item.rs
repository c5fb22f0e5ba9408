//! Cart line items and the ordered cart they live in.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lenient;
use crate::types::ItemId;

/// Product data carried by an "add to cart" control.
///
/// Mirrors the `data-item-*` attributes of the product page; only used when an
/// item is inserted, later adds only touch quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    pub id: ItemId,
    pub name: String,
    pub price_uzs: Decimal,
    pub cover: String,
    /// Opaque display value shown in the cart row ("Количество").
    pub amount: Decimal,
}

impl ProductRef {
    /// Create a product reference with no display amount.
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price_uzs: Decimal,
        cover: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_uzs,
            cover: cover.into(),
            amount: Decimal::ZERO,
        }
    }

    /// Set the display amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub qty: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub set: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_uzs: Decimal,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// Units per set as of the last add. Zero on lines written by pages
    /// that did not store it.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub set_size: Decimal,
}

impl CartItem {
    /// Create a line for `product` with the given quantity and set count.
    #[must_use]
    pub fn new(product: &ProductRef, qty: Decimal, set: Decimal) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            qty,
            set,
            price_uzs: product.price_uzs,
            cover: product.cover.clone(),
            amount: product.amount,
            set_size: Decimal::ZERO,
        }
    }

    /// Record the units per set this line is sold in.
    #[must_use]
    pub const fn with_set_size(mut self, set_size: Decimal) -> Self {
        self.set_size = set_size;
        self
    }

    /// Units per set of this line.
    ///
    /// Lines without a stored size derive it from `qty / set`. `None` when
    /// neither is known.
    #[must_use]
    pub fn units_per_set(&self) -> Option<Decimal> {
        if self.set_size > Decimal::ZERO {
            return Some(self.set_size);
        }
        if self.set <= Decimal::ZERO {
            return None;
        }
        self.qty
            .checked_div(self.set)
            .map(|size| size.round_dp(2))
            .filter(|size| *size > Decimal::ZERO)
    }

    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.qty.checked_mul(self.price_uzs).unwrap_or(Decimal::MAX)
    }
}

/// Ordered cart contents. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartItem>);

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode a persisted snapshot.
    ///
    /// Anything that is not a JSON array decodes to an empty cart; entries that
    /// are not item objects are dropped, as are repeated ids after the first.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let entries = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(entries)) => entries,
            Ok(serde_json::Value::Null) => return Self::new(),
            Ok(other) => {
                warn!(kind = json_kind(&other), "Stored cart is not an array, ignoring");
                return Self::new();
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is not valid JSON, ignoring");
                return Self::new();
            }
        };

        let mut cart = Self::new();
        for entry in entries {
            match serde_json::from_value::<CartItem>(entry) {
                Ok(item) if cart.contains(&item.id) => {
                    warn!(item_id = %item.id, "Duplicate cart entry dropped");
                }
                Ok(item) => cart.0.push(item),
                Err(e) => warn!(error = %e, "Malformed cart entry dropped"),
            }
        }
        cart
    }

    /// Encode for persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.0.iter().find(|item| &item.id == id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut CartItem> {
        self.0.iter_mut().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Append a new line. Callers check [`Cart::contains`] first.
    pub fn push(&mut self, item: CartItem) {
        debug_assert!(!self.contains(&item.id), "duplicate cart id");
        self.0.push(item);
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<CartItem> {
        let index = self.0.iter().position(|item| &item.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, qty: i64, price: i64) -> CartItem {
        let product = ProductRef::new(id, "Chai", Decimal::from(price), "/c.jpg");
        CartItem::new(&product, Decimal::from(qty), Decimal::ZERO)
    }

    #[test]
    fn test_from_json_legacy_strings() {
        let raw = r#"[{"id":"7","name":"Choy","qty":3,"set":"0.50","price_uzs":"12000","cover":"/c.jpg","amount":"6"}]"#;
        let cart = Cart::from_json(raw);
        let line = cart.get(&ItemId::new("7")).unwrap();
        assert_eq!(line.qty, Decimal::from(3));
        assert_eq!(line.set, Decimal::new(50, 2));
        assert_eq!(line.price_uzs, Decimal::from(12000));
        assert_eq!(line.amount, Decimal::from(6));
    }

    #[test]
    fn test_from_json_missing_fields_default_to_zero() {
        let cart = Cart::from_json(r#"[{"id":"1","name":"X","qty":2,"price_uzs":100,"cover":""}]"#);
        let line = cart.get(&ItemId::new("1")).unwrap();
        assert_eq!(line.set, Decimal::ZERO);
        assert_eq!(line.amount, Decimal::ZERO);
    }

    #[test]
    fn test_from_json_garbage_is_empty() {
        assert!(Cart::from_json("not json").is_empty());
        assert!(Cart::from_json("{\"id\":1}").is_empty());
        assert!(Cart::from_json("null").is_empty());
    }

    #[test]
    fn test_from_json_drops_bad_entries_and_duplicates() {
        let raw = r#"[{"id":"1","qty":1},42,{"id":"1","qty":9},{"id":"2","qty":"x"}]"#;
        let cart = Cart::from_json(raw);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&ItemId::new("1")).unwrap().qty, Decimal::ONE);
        assert_eq!(cart.get(&ItemId::new("2")).unwrap().qty, Decimal::ZERO);
    }

    #[test]
    fn test_json_preserves_order() {
        let mut cart = Cart::new();
        cart.push(item("b", 1, 10));
        cart.push(item("a", 2, 20));
        let decoded = Cart::from_json(&cart.to_json().unwrap());
        let ids: Vec<_> = decoded.iter().map(|i| i.id.as_str().to_string()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.push(item("a", 2, 1500));
        cart.push(item("b", 3, 1000));
        assert_eq!(cart.total(), Decimal::from(6000));
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.push(item("a", 1, 1));
        assert!(cart.remove(&ItemId::new("a")).is_some());
        assert!(cart.remove(&ItemId::new("a")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_units_per_set_prefers_stored_size() {
        let mut line = item("a", 11, 100).with_set_size(Decimal::from(6));
        line.set = Decimal::new(183, 2);
        assert_eq!(line.units_per_set(), Some(Decimal::from(6)));
    }

    #[test]
    fn test_units_per_set_derived_from_qty_and_set() {
        let mut line = item("a", 12, 100);
        line.set = Decimal::from(2);
        assert_eq!(line.units_per_set(), Some(Decimal::from(6)));

        let legacy = Cart::from_json(r#"[{"id":"1","qty":10,"set":"2.50"}]"#);
        let line = legacy.get(&ItemId::new("1")).unwrap();
        assert_eq!(line.set_size, Decimal::ZERO);
        assert_eq!(line.units_per_set(), Some(Decimal::from(4)));
    }

    #[test]
    fn test_units_per_set_unknown_without_sets() {
        assert_eq!(item("a", 5, 100).units_per_set(), None);
    }
}
