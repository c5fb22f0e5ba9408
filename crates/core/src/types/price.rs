//! Quantity and UZS price arithmetic.
//!
//! All amounts are `Decimal`. Quantities can be fractional (weighed goods are
//! entered as `2,5`), set counts are kept to two decimal places, and UZS
//! prices have no minor unit.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Thousands separator used by the `ru-RU` number format (no-break space).
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Decimal separator used by the `ru-RU` number format.
pub const DECIMAL_SEPARATOR: char = ',';

/// Fraction digits shown for amounts.
const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// Fraction digits kept for set counts.
const SET_FRACTION_DIGITS: u32 = 2;

/// Format an amount the way the storefront displays prices.
///
/// Integer digits are grouped by three with a no-break space, at most three
/// fraction digits are shown and trailing zeros are dropped.
///
/// ```
/// use bozor_core::format_uzs;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_uzs(Decimal::from(1_250_000)), "1\u{a0}250\u{a0}000");
/// assert_eq!(format_uzs(Decimal::new(25, 1)), "2,5");
/// ```
#[must_use]
pub fn format_uzs(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(int, frac)| (int, Some(frac)));

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac);
    }
    out
}

/// Parse a user-entered quantity.
///
/// Accepts a comma as decimal separator and surrounding whitespace. Returns
/// `None` for empty or non-numeric input.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Number of sets a quantity amounts to, rounded to two decimals.
///
/// A non-positive set size yields zero.
#[must_use]
pub fn set_count(quantity: Decimal, set_size: Decimal) -> Decimal {
    if set_size <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    quantity
        .checked_div(set_size)
        .map_or(Decimal::ZERO, |sets| {
            sets.round_dp_with_strategy(SET_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        })
}

/// Round half away from zero to a whole number.
#[must_use]
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_uzs(Decimal::from(0)), "0");
        assert_eq!(format_uzs(Decimal::from(999)), "999");
        assert_eq!(format_uzs(Decimal::from(1000)), "1\u{a0}000");
        assert_eq!(format_uzs(Decimal::from(12_345_678)), "12\u{a0}345\u{a0}678");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_uzs(Decimal::new(12_345, 1)), "1\u{a0}234,5");
        assert_eq!(format_uzs(Decimal::new(10_000_000, 6)), "10");
        assert_eq!(format_uzs(Decimal::new(12_345, 4)), "1,235");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_uzs(Decimal::from(-1500)), "-1\u{a0}500");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), Some(Decimal::from(5)));
        assert_eq!(parse_quantity(" 2,5 "), Some(Decimal::new(25, 1)));
        assert_eq!(parse_quantity("1e2"), Some(Decimal::from(100)));
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
    }

    #[test]
    fn test_set_count_rounds_to_two_places() {
        assert_eq!(set_count(Decimal::from(10), Decimal::from(3)), Decimal::new(333, 2));
        assert_eq!(set_count(Decimal::from(12), Decimal::from(6)), Decimal::from(2));
        assert_eq!(set_count(Decimal::from(5), Decimal::from(6)), Decimal::new(83, 2));
    }

    #[test]
    fn test_set_count_zero_set_size() {
        assert_eq!(set_count(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(set_count(Decimal::from(10), Decimal::from(-2)), Decimal::ZERO);
    }

    #[test]
    fn test_round_whole() {
        assert_eq!(round_whole(Decimal::new(25, 1)), Decimal::from(3));
        assert_eq!(round_whole(Decimal::new(249, 2)), Decimal::from(2));
    }
}
