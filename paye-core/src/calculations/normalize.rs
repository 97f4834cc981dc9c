//! Turns free-text form values into annual amounts.
//!
//! Nothing here returns an error. A field the user left blank, or typed
//! something unreadable into, counts as zero so the estimate always renders.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    EstimatorInput, IncomeProfile, InputFields, Period, ReliefConfig, SalaryIncome,
    SelfEmployedIncome,
};

/// Highest pension contribution percentage a user may choose.
pub const MAX_PENSION_RATE_PERCENT: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

// Thousands separators, currency signs, spaces and anything else that is
// not part of a plain decimal literal.
static FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("formatting pattern is valid"));

/// Parses a currency string into a non-negative amount.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::normalize::parse_amount;
///
/// assert_eq!(parse_amount("₦1,250,000.50"), dec!(1250000.50));
/// assert_eq!(parse_amount(""), dec!(0));
/// assert_eq!(parse_amount("n/a"), dec!(0));
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = FORMATTING.replace_all(raw, "");
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    match cleaned.parse::<Decimal>() {
        Ok(amount) if amount.is_sign_negative() && !amount.is_zero() => {
            warn!(input = %raw, "negative amount treated as 0");
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(e) => {
            warn!(input = %raw, "unreadable amount treated as 0: {}", e);
            Decimal::ZERO
        }
    }
}

/// Parses `raw` and converts it from `period` to an annual amount.
pub fn normalize(
    raw: &str,
    period: Period,
) -> Decimal {
    let amount = parse_amount(raw);
    amount
        .checked_mul(period.multiplier())
        .unwrap_or_else(|| {
            warn!(input = %raw, period = period.as_str(), "annualized amount overflows, treated as 0");
            Decimal::ZERO
        })
}

/// Clamps a pension percentage into `[0, 8]`.
pub fn clamp_pension_rate(rate_percent: Decimal) -> Decimal {
    rate_percent.clamp(Decimal::ZERO, MAX_PENSION_RATE_PERCENT)
}

impl EstimatorInput {
    /// Converts the raw form into annual figures the engine works with.
    ///
    /// Every amount is period-converted except annual rent, which is always
    /// read as a yearly figure.
    pub fn normalize(&self) -> (IncomeProfile, ReliefConfig) {
        let period = self.period;
        match &self.fields {
            InputFields::Salaried(fields) => {
                let profile = IncomeProfile::Salaried(SalaryIncome {
                    basic_salary: normalize(&fields.basic_salary, period),
                    housing_allowance: normalize(&fields.housing_allowance, period),
                    transport_allowance: normalize(&fields.transport_allowance, period),
                    other_allowances: normalize(&fields.other_allowances, period),
                });
                let config = ReliefConfig {
                    pension_rate_percent: clamp_pension_rate(fields.pension_rate_percent),
                    housing_fund_enabled: fields.housing_fund_enabled,
                    health_insurance: normalize(&fields.health_insurance, period),
                    annual_rent: normalize(&fields.annual_rent, Period::Annual),
                };
                (profile, config)
            }
            InputFields::SelfEmployed(fields) => {
                let profile = IncomeProfile::SelfEmployed(SelfEmployedIncome {
                    gross_income: normalize(&fields.gross_income, period),
                    business_expenses: normalize(&fields.business_expenses, period),
                });
                let config = ReliefConfig {
                    pension_rate_percent: Decimal::ZERO,
                    housing_fund_enabled: false,
                    health_insurance: Decimal::ZERO,
                    annual_rent: Decimal::ZERO,
                };
                (profile, config)
            }
        }
    }
}
