//! Progressive (marginal) tax over a [`BracketSchedule`].
//!
//! Income inside each band is taxed at that band's rate only:
//!
//! | Taxable income | Legacy schedule tax |
//! |----------------|---------------------|
//! | 300,000        | 21,000              |
//! | 600,000        | 54,000              |
//! | 1,100,000      | 129,000             |
//! | 1,600,000      | 224,000             |
//! | 3,200,000      | 560,000             |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::BracketSchedule;
//! use paye_core::calculations::compute_tax;
//!
//! let tax = compute_tax(dec!(4356000), &BracketSchedule::legacy()).unwrap();
//!
//! assert_eq!(tax, dec!(837440));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::BracketSchedule;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTaxError {
    /// Callers must floor taxable income at zero first.
    #[error("taxable income must not be negative, got {0}")]
    NegativeTaxableIncome(Decimal),
}

/// Computes tax on `taxable_income` by walking the schedule's bands in
/// ascending order.
///
/// The result is exact; no rounding is applied.
///
/// # Errors
///
/// Returns [`BracketTaxError::NegativeTaxableIncome`] for negative input.
pub fn compute_tax(
    taxable_income: Decimal,
    schedule: &BracketSchedule,
) -> Result<Decimal, BracketTaxError> {
    if taxable_income < Decimal::ZERO {
        return Err(BracketTaxError::NegativeTaxableIncome(taxable_income));
    }

    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;

    for bracket in schedule.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxable_in_bracket = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let bracket_tax = taxable_in_bracket.saturating_mul(bracket.tax_rate);
        trace!(
            schedule = schedule.name(),
            min = %bracket.min_income,
            rate = %bracket.tax_rate,
            amount = %taxable_in_bracket,
            tax = %bracket_tax,
            "band applied"
        );
        tax = tax.saturating_add(bracket_tax);
        remaining -= taxable_in_bracket;
    }

    Ok(tax)
}

/// Rate of the band that the last unit of `taxable_income` falls in, or zero
/// when there is no taxable income.
pub fn marginal_rate(
    taxable_income: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // The last unit of income sits just below `taxable_income`, so an amount
    // exactly on a boundary belongs to the lower band.
    schedule
        .brackets()
        .iter()
        .find(|b| b.max_income.is_none_or(|max| taxable_income <= max))
        .map(|b| b.tax_rate)
        .unwrap_or(Decimal::ZERO)
}
