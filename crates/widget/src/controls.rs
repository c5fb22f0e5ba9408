//! Decoding of the page's cart controls.
//!
//! Kept free of DOM types so the parsing rules can be tested natively: every
//! reader takes a lookup closure from field name to raw value.

use rust_decimal::Decimal;

use bozor_core::{ItemId, ProductRef, parse_quantity};

/// Where each product field is read from.
#[derive(Debug, Clone, Copy)]
pub struct ProductFields {
    pub id: &'static str,
    pub name: &'static str,
    pub price_uzs: &'static str,
    pub cover: &'static str,
    pub set_size: &'static str,
    pub amount: &'static str,
}

/// Attributes on `.add-cart` and `.add-cart-set` buttons.
pub const BUTTON_ATTRIBUTES: ProductFields = ProductFields {
    id: "data-item-id",
    name: "data-item-name",
    price_uzs: "data-item-price-uzs",
    cover: "data-item-cover",
    set_size: "data-item-set",
    amount: "data-item-amount",
};

/// Hidden inputs on the product page, by selector.
pub const PAGE_INPUTS: ProductFields = ProductFields {
    id: ".productSingleId",
    name: ".productName",
    price_uzs: ".productPriceUzs",
    cover: ".productCover",
    set_size: ".productSetAmount",
    amount: ".productTotalAmount",
};

/// A product together with the set size its page sells it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddControl {
    pub product: ProductRef,
    pub set_size: Decimal,
}

impl AddControl {
    /// Read a product from `fields` through `lookup`.
    ///
    /// Returns `None` without an id. Unparsable numbers become zero, except
    /// the set size which falls back to one.
    pub fn read(fields: &ProductFields, lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let id = lookup(fields.id)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())?;
        let number = |field: &str| lookup(field).and_then(|raw| parse_quantity(&raw));

        let product = ProductRef {
            id: ItemId::new(id),
            name: lookup(fields.name).unwrap_or_default(),
            price_uzs: number(fields.price_uzs).unwrap_or_default(),
            cover: lookup(fields.cover).unwrap_or_default(),
            amount: number(fields.amount).unwrap_or_default(),
        };
        let set_size = number(fields.set_size)
            .filter(|size| *size > Decimal::ZERO)
            .unwrap_or(Decimal::ONE);

        Some(Self { product, set_size })
    }
}

/// A button inside a rendered cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Increase,
    Decrease,
    Delete,
}

impl RowAction {
    /// Parse a `data-action` value.
    #[must_use]
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Delete => "delete",
        }
    }
}

/// Format a set count for the set input, always two decimals.
#[must_use]
pub fn format_set_input(sets: Decimal) -> String {
    format!("{sets:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_read_button_attributes() {
        let control = AddControl::read(
            &BUTTON_ATTRIBUTES,
            lookup(&[
                ("data-item-id", "42"),
                ("data-item-name", "Non"),
                ("data-item-price-uzs", "4500"),
                ("data-item-cover", "/non.jpg"),
                ("data-item-set", "6"),
                ("data-item-amount", "12"),
            ]),
        )
        .unwrap();

        assert_eq!(control.product.id, ItemId::new("42"));
        assert_eq!(control.product.name, "Non");
        assert_eq!(control.product.price_uzs, Decimal::from(4500));
        assert_eq!(control.product.amount, Decimal::from(12));
        assert_eq!(control.set_size, Decimal::from(6));
    }

    #[test]
    fn test_read_requires_id() {
        assert!(AddControl::read(&BUTTON_ATTRIBUTES, lookup(&[("data-item-name", "x")])).is_none());
        assert!(AddControl::read(&BUTTON_ATTRIBUTES, lookup(&[("data-item-id", " ")])).is_none());
    }

    #[test]
    fn test_read_defaults() {
        let control = AddControl::read(
            &PAGE_INPUTS,
            lookup(&[(".productSingleId", "7"), (".productSetAmount", "0")]),
        )
        .unwrap();
        assert_eq!(control.product.price_uzs, Decimal::ZERO);
        assert_eq!(control.set_size, Decimal::ONE);
    }

    #[test]
    fn test_row_action() {
        for action in [RowAction::Increase, RowAction::Decrease, RowAction::Delete] {
            assert_eq!(RowAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(RowAction::parse("explode"), None);
    }

    #[test]
    fn test_format_set_input() {
        assert_eq!(format_set_input(Decimal::new(183, 2)), "1.83");
        assert_eq!(format_set_input(Decimal::from(2)), "2.00");
    }
}
