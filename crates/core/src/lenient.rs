//! Forgiving deserializers for persisted cart fields.
//!
//! Snapshots written by older pages stored attribute strings verbatim, so a
//! price may be `12000` or `"12000"` and a missing field is common. Anything
//! that does not parse decodes to zero instead of failing the whole cart.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Decode a decimal from a JSON number, numeric string, or anything else (zero).
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// Decode a free-form string field; numbers are stringified and null is empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub fn decimal_from_value(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => decimal_from_str(&n.to_string()),
        serde_json::Value::String(s) => decimal_from_str(s),
        serde_json::Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

/// Parse a stored scalar, treating garbage as zero.
pub fn decimal_from_str(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&serde_json::json!(5)), Decimal::from(5));
        assert_eq!(decimal_from_value(&serde_json::json!("12000")), Decimal::from(12000));
        assert_eq!(decimal_from_value(&serde_json::json!("2.50")), Decimal::new(250, 2));
        assert_eq!(decimal_from_value(&serde_json::json!("NaN")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&serde_json::json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&serde_json::json!([1])), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_from_str() {
        assert_eq!(decimal_from_str(" 7 "), Decimal::from(7));
        assert_eq!(decimal_from_str("undefined"), Decimal::ZERO);
        assert_eq!(decimal_from_str(""), Decimal::ZERO);
    }
}
