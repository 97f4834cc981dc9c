//! Display strings for amounts and rates.
//!
//! Output is for people only. Nothing formatted here is parsed back into a
//! calculation.

use rust_decimal::Decimal;

use crate::calculations::common::{round_half_up, round_whole};

/// Whole naira with `,` thousands grouping.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::format::format_amount;
///
/// assert_eq!(format_amount(dec!(69786.666)), "69,787");
/// assert_eq!(format_amount(dec!(-14920)), "-14,920");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_whole(value);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// [`format_amount`] with the naira sign.
pub fn format_naira(value: Decimal) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(magnitude) => format!("-₦{magnitude}"),
        None => format!("₦{amount}"),
    }
}

/// A percentage with one decimal place, e.g. `17.4%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.1}%", round_half_up(percent, 1))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
