//! Monetary rounding and input normalization.
//!
//! Every derived payslip figure is rounded to two fraction digits at the
//! moment it is computed, so repeated recomputation never drifts.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

use crate::error::{EngineError, EngineResult};

/// Number of fraction digits kept on every derived monetary figure.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to two fraction digits, midpoint away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-10.005").unwrap()), Decimal::from_str("-10.01").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Error for a figure that no longer fits in a [`Decimal`].
pub fn out_of_range(field: &str) -> EngineError {
    EngineError::InvalidAmount {
        field: field.to_string(),
        message: "exceeds the largest supported amount".to_string(),
    }
}

/// Sums amounts, returning an error instead of overflowing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] naming `field` when the running
/// total leaves the representable range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::checked_money_sum;
/// use rust_decimal::Decimal;
///
/// let total = checked_money_sum("other_deductions", [Decimal::from(50), Decimal::from(25)]);
/// assert_eq!(total.unwrap(), Decimal::from(75));
/// assert!(checked_money_sum("net_pay", [Decimal::MAX, Decimal::ONE]).is_err());
/// ```
pub fn checked_money_sum<I>(field: &str, amounts: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or_else(|| out_of_range(field))
    })
}

/// Coerces a loosely-typed JSON value into a decimal amount.
///
/// Numbers and numeric strings are parsed; anything else (empty strings,
/// `null`, booleans, text, arrays, objects) becomes zero. Sign is preserved,
/// so negative values still reach the validation layer.
///
/// # Example
///
/// ```
/// use payroll_engine::models::coerce_amount;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_amount(&json!(12)), Decimal::from(12));
/// assert_eq!(coerce_amount(&json!(" 7.5 ")), Decimal::new(75, 1));
/// assert_eq!(coerce_amount(&json!("")), Decimal::ZERO);
/// assert_eq!(coerce_amount(&json!("abc")), Decimal::ZERO);
/// assert_eq!(coerce_amount(&json!(null)), Decimal::ZERO);
/// ```
pub fn coerce_amount(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(number) => parse_decimal(&number.to_string()),
        serde_json::Value::String(text) => parse_decimal(text.trim()),
        _ => Decimal::ZERO,
    }
}

/// Serde adapter that deserializes an amount through [`coerce_amount`].
///
/// Use with `#[serde(deserialize_with = "deserialize_lenient_amount")]` on
/// user-entered attendance fields.
pub fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

fn parse_decimal(text: &str) -> Decimal {
    if text.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}
