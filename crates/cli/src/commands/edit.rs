//! Add commands.

use rust_decimal::Decimal;

use bozor_core::{AddMode, CartError, CartStore, CartSurface, Outcome, ProductRef, Store};

const fn mode(replace: bool) -> AddMode {
    if replace {
        AddMode::Replace
    } else {
        AddMode::Accumulate
    }
}

pub(super) fn add<S: Store, U: CartSurface>(
    cart: &mut CartStore<S, U>,
    product: &ProductRef,
    qty: Decimal,
    set_size: Decimal,
    replace: bool,
) -> Result<Outcome, CartError> {
    cart.add_units(product, qty, mode(replace), set_size)
}

pub(super) fn add_set<S: Store, U: CartSurface>(
    cart: &mut CartStore<S, U>,
    product: &ProductRef,
    set_size: Decimal,
    sets: Decimal,
    replace: bool,
) -> Result<Outcome, CartError> {
    cart.add_set_units(product, set_size, sets, mode(replace))
}
