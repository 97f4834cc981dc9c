//! Relief and deduction rules.
//!
//! One function covers every regime and user type. What differs between
//! regimes lives in [`ReliefRules`], so a new regime is new data:
//!
//! | Relief              | Salaried | Self-employed | Regime            |
//! |---------------------|----------|---------------|-------------------|
//! | Pension             | yes      |               | all               |
//! | Housing fund (NHF)  | yes      |               | all               |
//! | Health insurance    | yes      |               | all               |
//! | Rent                | yes      |               | all               |
//! | Business expenses   |          | yes           | all               |
//! | Basic relief        | yes      | yes           | with flat reliefs |
//! | Consolidated relief | yes      | yes           | with flat reliefs |
//!
//! The total is not capped at gross income. Flooring taxable income at zero
//! is the caller's job. Products and sums saturate at `Decimal::MAX`.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::max;
use crate::models::{IncomeProfile, ReliefBreakdown, ReliefConfig, ReliefKind, ReliefRules};

/// Applies `rules` to `profile` and returns each relief with the total.
pub fn compute_reliefs(
    profile: &IncomeProfile,
    config: &ReliefConfig,
    rules: &ReliefRules,
) -> ReliefBreakdown {
    let gross = profile.gross_income();
    let mut breakdown = ReliefBreakdown::new();

    match profile {
        IncomeProfile::Salaried(salary) => {
            breakdown.push(
                ReliefKind::Pension,
                pension_relief(gross, config.pension_rate_percent, rules),
            );
            breakdown.push(
                ReliefKind::HousingFund,
                housing_fund_relief(salary.basic_salary, config.housing_fund_enabled, rules),
            );
            breakdown.push(ReliefKind::HealthInsurance, config.health_insurance);
            breakdown.push(ReliefKind::Rent, rent_relief(config.annual_rent, rules));
        }
        IncomeProfile::SelfEmployed(income) => {
            breakdown.push(ReliefKind::BusinessExpenses, income.business_expenses);
        }
    }

    if let Some(flat) = &rules.flat_reliefs {
        breakdown.push(
            ReliefKind::Basic,
            max(
                gross.saturating_mul(flat.basic_relief_rate),
                flat.basic_relief_floor,
            ),
        );
        breakdown.push(
            ReliefKind::Consolidated,
            gross.saturating_mul(flat.consolidated_relief_rate),
        );
    }

    debug!(
        user_type = profile.user_type().as_str(),
        gross = %gross,
        total = %breakdown.total(),
        "reliefs computed"
    );
    breakdown
}

/// `gross * rate%`, never more than the regime's share of gross.
fn pension_relief(
    gross: Decimal,
    rate_percent: Decimal,
    rules: &ReliefRules,
) -> Decimal {
    let rate = max(rate_percent, Decimal::ZERO) / Decimal::ONE_HUNDRED;
    gross
        .saturating_mul(rate)
        .min(gross.saturating_mul(rules.pension_cap_rate))
}

fn housing_fund_relief(
    basic_salary: Decimal,
    enabled: bool,
    rules: &ReliefRules,
) -> Decimal {
    if enabled {
        basic_salary.saturating_mul(rules.housing_fund_rate)
    } else {
        Decimal::ZERO
    }
}

fn rent_relief(
    annual_rent: Decimal,
    rules: &ReliefRules,
) -> Decimal {
    annual_rent
        .saturating_mul(rules.rent_relief_rate)
        .min(rules.rent_relief_cap)
}
