//! Common utility functions for tax calculations.
//!
//! Rounding helpers for display, flooring, and guarded percentages shared
//! by the relief, tax and comparison steps.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to whole naira, with halves rounded away from zero.
///
/// This matches how amounts are shown to users (zero decimal places). It is
/// only used for display; calculations chain on unrounded values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(69786.66)), dec!(69787));
/// assert_eq!(round_whole(dec!(0.5)), dec!(1));
/// assert_eq!(round_whole(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to `dp` decimal places, halves away from zero.
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `part / whole * 100`, or zero when `whole` is zero. A ratio too large
/// for a `Decimal` saturates at `Decimal::MAX` (or `MIN` when negative).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
/// assert_eq!(percent_of(dec!(25), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}
