use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, ReliefBreakdown, UserType};

/// Outcome of one income profile under one regime.
///
/// Values are unrounded; rounding happens only when formatting for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub regime: Regime,
    pub user_type: UserType,
    /// Name of the bracket schedule the tax was computed with.
    pub schedule: String,
    pub gross_income: Decimal,
    pub reliefs: ReliefBreakdown,
    pub total_reliefs: Decimal,
    /// Gross minus reliefs, floored at zero.
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    /// Rate of the band the last naira of taxable income fell in.
    pub marginal_rate: Decimal,
    /// Annual tax as a percentage of gross; zero when gross is zero.
    pub effective_rate: Decimal,
    /// Zero for salaried earners.
    pub business_expenses: Decimal,
    pub annual_take_home: Decimal,
    pub monthly_take_home: Decimal,
}

/// The legacy-regime result for the same input, and how much the current
/// regime saves relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub legacy: CalculationResult,
    /// Legacy tax minus current tax. Negative when the current regime costs
    /// more.
    pub savings: Decimal,
    /// Savings as a percentage of legacy tax; zero when legacy tax is zero.
    pub savings_percent: Decimal,
}

/// Everything one call to the estimator produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub current: CalculationResult,
    pub comparison: Option<RegimeComparison>,
}
