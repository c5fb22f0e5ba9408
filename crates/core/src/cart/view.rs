//! Display projection of the cart.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Cart, CartItem, format_uzs};

/// Currency suffix shown after amounts in rows.
pub const CURRENCY_SUFFIX: &str = "сум";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    pub id: String,
    pub name: String,
    pub cover: String,
    pub qty: Decimal,
    pub set: Decimal,
    pub amount: Decimal,
    pub line_total: Decimal,
    /// Unit price, e.g. `12 000 сум`.
    pub unit_price_display: String,
    /// Line price, e.g. `36 000 сум`.
    pub line_total_display: String,
    /// Quantity as typed into the row's input.
    pub qty_display: String,
    pub amount_display: String,
}

impl From<&CartItem> for CartRow {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            cover: item.cover.clone(),
            qty: item.qty,
            set: item.set,
            amount: item.amount,
            line_total: item.line_total(),
            unit_price_display: with_currency(item.price_uzs),
            line_total_display: with_currency(item.line_total()),
            qty_display: item.qty.normalize().to_string(),
            amount_display: item.amount.normalize().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: Decimal,
    /// Grand total without currency suffix, as written to the total element.
    pub total_display: String,
    /// Number of distinct lines.
    pub item_count: usize,
}

impl CartView {
    /// View of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            rows: cart.iter().map(CartRow::from).collect(),
            total,
            total_display: format_uzs(total),
            item_count: cart.len(),
        }
    }
}

fn with_currency(amount: Decimal) -> String {
    format!("{} {CURRENCY_SUFFIX}", format_uzs(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductRef;

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
        assert_eq!(view.total_display, "0");
    }

    #[test]
    fn test_row_display() {
        let product = ProductRef::new("9", "Asal", Decimal::from(12_000), "/asal.jpg")
            .with_amount(Decimal::from(24));
        let mut cart = Cart::new();
        cart.push(CartItem::new(&product, Decimal::from(3), Decimal::new(50, 2)));

        let view = CartView::from(&cart);
        let row = &view.rows[0];
        assert_eq!(row.unit_price_display, "12\u{a0}000 сум");
        assert_eq!(row.line_total_display, "36\u{a0}000 сум");
        assert_eq!(row.qty_display, "3");
        assert_eq!(row.amount_display, "24");
        assert_eq!(view.total_display, "36\u{a0}000");
        assert_eq!(view.item_count, 1);
    }
}
