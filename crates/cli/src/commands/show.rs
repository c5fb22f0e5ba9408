//! Read-only commands and result lines.

use std::io::Write;

use bozor_core::{CURRENCY_SUFFIX, CartStore, CartSurface, CartView, Outcome, Store};

use super::CommandError;

const fn label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Inserted => "added",
        Outcome::Updated => "updated",
        Outcome::Removed => "removed",
        Outcome::Cleared => "cleared",
        Outcome::Unchanged => "unchanged",
    }
}

/// One status line after a change: what happened and the new badge count.
pub(super) fn outcome<S: Store, U: CartSurface>(
    cart: &CartStore<S, U>,
    outcome: Outcome,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let count = cart.total_item_count()?;
    writeln!(out, "{} (items in cart: {})", label(outcome), count.normalize())?;
    Ok(())
}

pub(super) fn count<S: Store, U: CartSurface>(
    cart: &CartStore<S, U>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(out, "{}", cart.total_item_count()?.normalize())?;
    Ok(())
}

pub(super) fn cart<S: Store, U: CartSurface>(
    cart: &mut CartStore<S, U>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let view = cart.render()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
    } else {
        write_table(&view, out)?;
    }
    Ok(())
}

fn write_table(view: &CartView, out: &mut impl Write) -> Result<(), CommandError> {
    if view.is_empty() {
        writeln!(out, "Корзина пуста")?;
        return Ok(());
    }
    for row in &view.rows {
        writeln!(out, "#{} {}", row.id, row.name)?;
        writeln!(
            out,
            "    {} x {} = {}",
            row.qty_display, row.unit_price_display, row.line_total_display
        )?;
    }
    writeln!(out, "Общий: {} {CURRENCY_SUFFIX}", view.total_display)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use bozor_core::{Cart, CartItem, ProductRef};

    use super::*;

    #[test]
    fn test_table_lists_rows_and_total() {
        let mut cart = Cart::new();
        let product = ProductRef::new("5", "Qatiq", Decimal::from(12_000), "");
        cart.push(CartItem::new(&product, Decimal::from(3), Decimal::ZERO));

        let mut out = Vec::new();
        write_table(&CartView::from(&cart), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("#5 Qatiq"));
        assert!(printed.contains("3 x 12\u{a0}000 сум = 36\u{a0}000 сум"));
        assert!(printed.ends_with("Общий: 36\u{a0}000 сум\n"));
    }
}
