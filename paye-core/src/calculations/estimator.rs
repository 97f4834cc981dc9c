//! The PAYE estimator: one income profile in, tax figures out.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Normalize the raw form into annual amounts |
//! | 2    | Gross income (sum of pay components, or turnover) |
//! | 3    | Reliefs under the regime's rules |
//! | 4    | Taxable income (Step 2 - Step 3, minimum 0) |
//! | 5    | Annual tax from the regime's bracket schedule |
//! | 6    | Monthly tax (Step 5 / 12) |
//! | 7    | Effective rate (Step 5 / Step 2 × 100, 0 when gross is 0) |
//! | 8    | Take-home (Step 2 - business expenses - Step 5) |
//! | 9    | Optionally repeat 3 to 8 under the legacy regime and compare |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::PayeEstimator;
//! use paye_core::{EstimatorInput, InputFields, Period, SalaryFields};
//!
//! let input = EstimatorInput {
//!     period: Period::Monthly,
//!     fields: InputFields::Salaried(SalaryFields {
//!         basic_salary: "100,000".to_string(),
//!         ..SalaryFields::default()
//!     }),
//!     compare_regimes: true,
//! };
//!
//! let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
//!
//! assert_eq!(evaluation.current.gross_income, dec!(1200000));
//! assert_eq!(evaluation.current.annual_tax, dec!(41100));
//! assert_eq!(evaluation.comparison.unwrap().savings, dec!(18000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::bracket::{BracketTaxError, compute_tax, marginal_rate};
use crate::calculations::common::{max, percent_of};
use crate::calculations::comparison::compare;
use crate::calculations::reliefs::compute_reliefs;
use crate::models::{
    CalculationResult, EstimatorInput, Evaluation, IncomeProfile, RegimeRules, ReliefConfig,
};

/// Errors that can occur while estimating tax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimatorError {
    #[error(transparent)]
    Tax(#[from] BracketTaxError),
}

/// Estimator holding the current and legacy regimes.
///
/// Evaluation is pure: the same input always produces the same
/// [`Evaluation`], and nothing is retained between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeEstimator {
    current: RegimeRules,
    legacy: RegimeRules,
}

impl Default for PayeEstimator {
    fn default() -> Self {
        Self::new(RegimeRules::current(), RegimeRules::legacy())
    }
}

impl PayeEstimator {
    pub fn new(
        current: RegimeRules,
        legacy: RegimeRules,
    ) -> Self {
        Self { current, legacy }
    }

    pub fn current_rules(&self) -> &RegimeRules {
        &self.current
    }

    pub fn legacy_rules(&self) -> &RegimeRules {
        &self.legacy
    }

    /// Normalizes `input`, computes the current-regime result and, when
    /// `compare_regimes` is set, the legacy result with the savings between
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError`] only if a bracket computation rejects its
    /// input, which normalization and flooring prevent.
    pub fn evaluate(
        &self,
        input: &EstimatorInput,
    ) -> Result<Evaluation, EstimatorError> {
        let (profile, config) = input.normalize();
        let current = self.calculate(&profile, &config, &self.current)?;

        let comparison = if input.compare_regimes {
            let legacy = self.calculate(&profile, &config, &self.legacy)?;
            Some(compare(&current, legacy))
        } else {
            None
        };

        Ok(Evaluation {
            current,
            comparison,
        })
    }

    /// Computes every figure for `profile` under one regime.
    ///
    /// # Errors
    ///
    /// See [`PayeEstimator::evaluate`].
    pub fn calculate(
        &self,
        profile: &IncomeProfile,
        config: &ReliefConfig,
        rules: &RegimeRules,
    ) -> Result<CalculationResult, EstimatorError> {
        let gross_income = profile.gross_income();
        let reliefs = compute_reliefs(profile, config, &rules.reliefs);
        let total_reliefs = reliefs.total();
        let taxable_income = self.taxable_income(gross_income, total_reliefs);
        let annual_tax = compute_tax(taxable_income, &rules.schedule)?;
        let business_expenses = profile.business_expenses();
        let annual_take_home = self.take_home(gross_income, business_expenses, annual_tax);

        debug!(
            regime = rules.regime.as_str(),
            schedule = rules.schedule.name(),
            taxable = %taxable_income,
            tax = %annual_tax,
            "tax calculated"
        );

        Ok(CalculationResult {
            regime: rules.regime,
            user_type: profile.user_type(),
            schedule: rules.schedule.name().to_string(),
            gross_income,
            reliefs,
            total_reliefs,
            taxable_income,
            annual_tax,
            monthly_tax: self.monthly(annual_tax),
            marginal_rate: marginal_rate(taxable_income, &rules.schedule),
            effective_rate: self.effective_rate(annual_tax, gross_income),
            business_expenses,
            annual_take_home,
            monthly_take_home: self.monthly(annual_take_home),
        })
    }

    /// Gross minus reliefs, never below zero.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        total_reliefs: Decimal,
    ) -> Decimal {
        max(gross_income.saturating_sub(total_reliefs), Decimal::ZERO)
    }

    fn monthly(
        &self,
        annual: Decimal,
    ) -> Decimal {
        annual / Decimal::from(12)
    }

    /// Tax as a percentage of gross; zero when there is no gross income.
    fn effective_rate(
        &self,
        annual_tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        percent_of(annual_tax, gross_income)
    }

    fn take_home(
        &self,
        gross_income: Decimal,
        business_expenses: Decimal,
        annual_tax: Decimal,
    ) -> Decimal {
        gross_income
            .saturating_sub(business_expenses)
            .saturating_sub(annual_tax)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::BracketSchedule;
    use crate::calculations::common::round_half_up;
    use crate::models::{
        InputFields, Period, Regime, ReliefKind, SalaryFields, SelfEmployedFields, UserType,
    };

    fn scenario_a_fields() -> SalaryFields {
        SalaryFields {
            basic_salary: "200,000".to_string(),
            housing_allowance: "100,000".to_string(),
            transport_allowance: "50,000".to_string(),
            other_allowances: "50,000".to_string(),
            pension_rate_percent: dec!(8),
            housing_fund_enabled: true,
            health_insurance: String::new(),
            annual_rent: String::new(),
        }
    }

    fn salaried(
        period: Period,
        fields: SalaryFields,
        compare_regimes: bool,
    ) -> EstimatorInput {
        EstimatorInput {
            period,
            fields: InputFields::Salaried(fields),
            compare_regimes,
        }
    }

    fn self_employed(
        period: Period,
        gross_income: &str,
        business_expenses: &str,
        compare_regimes: bool,
    ) -> EstimatorInput {
        EstimatorInput {
            period,
            fields: InputFields::SelfEmployed(SelfEmployedFields {
                gross_income: gross_income.to_string(),
                business_expenses: business_expenses.to_string(),
            }),
            compare_regimes,
        }
    }

    /// Current reliefs taxed on the 7% to 24% table.
    fn estimator_with_legacy_table() -> PayeEstimator {
        PayeEstimator::new(
            RegimeRules::current().with_schedule(BracketSchedule::legacy()),
            RegimeRules::legacy(),
        )
    }

    // =========================================================================
    // step tests
    // =========================================================================

    #[test]
    fn taxable_income_is_floored_at_zero() {
        let estimator = PayeEstimator::default();

        assert_eq!(estimator.taxable_income(dec!(100000), dec!(250000)), dec!(0));
        assert_eq!(estimator.taxable_income(dec!(250000), dec!(100000)), dec!(150000));
    }

    #[test]
    fn monthly_is_unrounded_twelfth() {
        let estimator = PayeEstimator::default();

        assert_eq!(estimator.monthly(dec!(837440)) * dec!(12), dec!(837440));
        assert_eq!(round_half_up(estimator.monthly(dec!(837440)), 2), dec!(69786.67));
    }

    #[test]
    fn effective_rate_zero_gross_is_zero() {
        let estimator = PayeEstimator::default();

        assert_eq!(estimator.effective_rate(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn take_home_subtracts_expenses_and_tax() {
        let estimator = PayeEstimator::default();

        assert_eq!(
            estimator.take_home(dec!(6000000), dec!(1000000), dec!(500000)),
            dec!(4500000)
        );
    }

    // =========================================================================
    // evaluate (integration) tests
    // =========================================================================

    #[test]
    fn scenario_a_on_seven_to_twenty_four_percent_table() {
        let input = salaried(Period::Monthly, scenario_a_fields(), false);

        let result = estimator_with_legacy_table().evaluate(&input).unwrap().current;

        assert_eq!(result.gross_income, dec!(4800000));
        assert_eq!(result.reliefs.get(ReliefKind::Pension), dec!(384000));
        assert_eq!(result.reliefs.get(ReliefKind::HousingFund), dec!(60000));
        assert_eq!(result.total_reliefs, dec!(444000));
        assert_eq!(result.taxable_income, dec!(4356000));
        // 21000 + 33000 + 75000 + 95000 + 336000 + 277440
        assert_eq!(result.annual_tax, dec!(837440));
        assert_eq!(result.monthly_tax, dec!(837440) / dec!(12));
        assert_eq!(result.marginal_rate, dec!(0.24));
        assert_eq!(round_half_up(result.effective_rate, 4), dec!(17.4467));
        assert_eq!(result.annual_take_home, dec!(3962560));
        assert_eq!(result.business_expenses, dec!(0));
        assert_eq!(result.schedule, "legacy");
        assert_eq!(result.regime, Regime::Current);
    }

    #[test]
    fn scenario_a_on_current_table() {
        let input = salaried(Period::Monthly, scenario_a_fields(), false);

        let result = PayeEstimator::default().evaluate(&input).unwrap().current;

        assert_eq!(result.taxable_income, dec!(4356000));
        // 2200000*0.15 + 1356000*0.18
        assert_eq!(result.annual_tax, dec!(574080));
        assert_eq!(result.annual_take_home, dec!(4225920));
    }

    #[test]
    fn scenario_a_compared_with_legacy_rules() {
        let input = salaried(Period::Monthly, scenario_a_fields(), true);

        let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
        let comparison = evaluation.comparison.expect("comparison requested");

        // Legacy reliefs: 384000 + 60000 + 200000 + 960000
        assert_eq!(comparison.legacy.total_reliefs, dec!(1604000));
        assert_eq!(comparison.legacy.taxable_income, dec!(3196000));
        assert_eq!(comparison.legacy.annual_tax, dec!(559160));
        // The consolidated relief outweighs the zero band at this income.
        assert_eq!(comparison.savings, dec!(-14920));
    }

    #[test]
    fn scenario_b_self_employed_zero_gross() {
        let input = self_employed(Period::Annual, "", "", true);

        let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
        let result = evaluation.current;

        assert_eq!(result.user_type, UserType::SelfEmployed);
        assert_eq!(result.gross_income, dec!(0));
        assert_eq!(result.annual_tax, dec!(0));
        assert_eq!(result.monthly_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.annual_take_home, dec!(0));

        let comparison = evaluation.comparison.unwrap();
        assert_eq!(comparison.legacy.annual_tax, dec!(0));
        assert_eq!(comparison.savings_percent, dec!(0));
    }

    #[test]
    fn scenario_c_legacy_costs_more_for_mid_range_salaries() {
        for monthly_basic in ["50,000", "75,000", "100,000", "125,000"] {
            let fields = SalaryFields {
                basic_salary: monthly_basic.to_string(),
                ..SalaryFields::default()
            };
            let input = salaried(Period::Monthly, fields, true);

            let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
            let comparison = evaluation.comparison.unwrap();

            assert!(
                comparison.legacy.annual_tax >= evaluation.current.annual_tax,
                "basic {monthly_basic}/month"
            );
            assert!(comparison.savings >= Decimal::ZERO, "basic {monthly_basic}/month");
        }
    }

    #[test]
    fn scenario_c_one_point_two_million_salary() {
        let fields = SalaryFields {
            basic_salary: "100,000".to_string(),
            ..SalaryFields::default()
        };
        let input = salaried(Period::Monthly, fields, true);

        let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
        let comparison = evaluation.comparison.unwrap();

        // Current: (1200000 - 96000 - 30000 - 800000) * 0.15
        assert_eq!(evaluation.current.annual_tax, dec!(41100));
        // Legacy: 21000 + 33000 + 34000 * 0.15
        assert_eq!(comparison.legacy.annual_tax, dec!(59100));
        assert_eq!(comparison.savings, dec!(18000));
        assert_eq!(round_half_up(comparison.savings_percent, 2), dec!(30.46));
    }

    #[test]
    fn scenario_c_self_employed() {
        let input = self_employed(Period::Annual, "1,200,000", "", true);

        let evaluation = PayeEstimator::default().evaluate(&input).unwrap();
        let comparison = evaluation.comparison.unwrap();

        assert_eq!(evaluation.current.annual_tax, dec!(60000));
        assert_eq!(comparison.legacy.annual_tax, dec!(78000));
        assert_eq!(comparison.savings, dec!(18000));
    }

    #[test]
    fn self_employed_take_home_subtracts_expenses() {
        let input = self_employed(Period::Monthly, "500,000", "100,000", false);

        let result = PayeEstimator::default().evaluate(&input).unwrap().current;

        // Taxable: 6000000 - 1200000 = 4800000
        // Tax: 2200000*0.15 + 1800000*0.18 = 330000 + 324000
        assert_eq!(result.taxable_income, dec!(4800000));
        assert_eq!(result.annual_tax, dec!(654000));
        assert_eq!(result.business_expenses, dec!(1200000));
        assert_eq!(result.annual_take_home, dec!(4146000));
        assert_eq!(result.monthly_take_home, dec!(345500));
    }

    #[test]
    fn no_comparison_unless_requested() {
        let input = salaried(Period::Monthly, scenario_a_fields(), false);

        let evaluation = PayeEstimator::default().evaluate(&input).unwrap();

        assert!(evaluation.comparison.is_none());
    }

    #[test]
    fn evaluate_is_idempotent() {
        let estimator = PayeEstimator::default();
        let input = salaried(Period::Monthly, scenario_a_fields(), true);

        let first = estimator.evaluate(&input).unwrap();
        let second = estimator.evaluate(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn monthly_and_annual_entry_agree() {
        let monthly = SalaryFields {
            health_insurance: "5,000".to_string(),
            annual_rent: "1,800,000".to_string(),
            ..scenario_a_fields()
        };
        let annual = SalaryFields {
            basic_salary: "2,400,000".to_string(),
            housing_allowance: "1,200,000".to_string(),
            transport_allowance: "600,000".to_string(),
            other_allowances: "600,000".to_string(),
            health_insurance: "60,000".to_string(),
            // Rent is entered as the same yearly figure in both modes.
            annual_rent: "1,800,000".to_string(),
            ..scenario_a_fields()
        };
        let estimator = PayeEstimator::default();

        let from_monthly = estimator.evaluate(&salaried(Period::Monthly, monthly, true)).unwrap();
        let from_annual = estimator.evaluate(&salaried(Period::Annual, annual, true)).unwrap();

        assert_eq!(from_monthly, from_annual);
        assert_eq!(from_monthly.current.reliefs.get(ReliefKind::Rent), dec!(360000));
    }

    #[test]
    fn rent_is_not_annualized_in_monthly_mode() {
        let fields = SalaryFields {
            health_insurance: "5,000".to_string(),
            annual_rent: "1,000,000".to_string(),
            ..scenario_a_fields()
        };
        let estimator = PayeEstimator::default();

        let monthly = estimator
            .evaluate(&salaried(Period::Monthly, fields.clone(), false))
            .unwrap()
            .current;
        let annual = estimator
            .evaluate(&salaried(Period::Annual, fields, false))
            .unwrap()
            .current;

        // Same raw rent gives the same relief in both modes...
        assert_eq!(monthly.reliefs.get(ReliefKind::Rent), dec!(200000));
        assert_eq!(annual.reliefs.get(ReliefKind::Rent), dec!(200000));
        // ...while every other field scales with the period.
        assert_eq!(
            monthly.reliefs.get(ReliefKind::HealthInsurance),
            annual.reliefs.get(ReliefKind::HealthInsurance) * dec!(12)
        );
    }

    #[test]
    fn pension_relief_never_exceeds_eight_percent() {
        let estimator = PayeEstimator::default();
        for rate in [dec!(0), dec!(4), dec!(8), dec!(15), dec!(100)] {
            let fields = SalaryFields {
                pension_rate_percent: rate,
                ..scenario_a_fields()
            };

            let result = estimator
                .evaluate(&salaried(Period::Monthly, fields, false))
                .unwrap()
                .current;

            assert!(
                result.reliefs.get(ReliefKind::Pension) <= result.gross_income * dec!(0.08),
                "rate {rate}%"
            );
        }
    }

    #[test]
    fn reliefs_above_gross_give_zero_tax() {
        let fields = SalaryFields {
            basic_salary: "10,000".to_string(),
            health_insurance: "50,000".to_string(),
            ..SalaryFields::default()
        };

        let result = PayeEstimator::default()
            .evaluate(&salaried(Period::Monthly, fields, false))
            .unwrap()
            .current;

        assert!(result.total_reliefs > result.gross_income);
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.annual_tax, dec!(0));
        assert_eq!(result.annual_take_home, result.gross_income);
    }

    #[test]
    fn malformed_fields_count_as_zero() {
        let fields = SalaryFields {
            basic_salary: "two hundred".to_string(),
            housing_allowance: "100,000".to_string(),
            ..SalaryFields::default()
        };

        let result = PayeEstimator::default()
            .evaluate(&salaried(Period::Monthly, fields, false))
            .unwrap()
            .current;

        assert_eq!(result.gross_income, dec!(1200000));
        assert_eq!(result.reliefs.get(ReliefKind::HousingFund), dec!(0));
    }

    // =========================================================================
    // large amount tests
    // =========================================================================

    fn decimal(digits: &str) -> Decimal {
        digits.parse().unwrap()
    }

    #[test]
    fn huge_monthly_salary_evaluates() {
        let fields = SalaryFields {
            basic_salary: "1,000,000,000,000,000,000,000,000,000".to_string(),
            ..SalaryFields::default()
        };

        let evaluation = PayeEstimator::default()
            .evaluate(&salaried(Period::Monthly, fields, true))
            .unwrap();

        let current = &evaluation.current;
        assert_eq!(current.gross_income, decimal("12000000000000000000000000000"));
        assert!(current.annual_tax <= current.gross_income);
        assert!(current.effective_rate <= dec!(25));
        let comparison = evaluation.comparison.unwrap();
        assert!(comparison.legacy.annual_tax <= comparison.legacy.gross_income);
    }

    #[test]
    fn components_summing_past_decimal_max_saturate() {
        let fields = SalaryFields {
            basic_salary: "30000000000000000000000000000".to_string(),
            housing_allowance: "30000000000000000000000000000".to_string(),
            transport_allowance: "30000000000000000000000000000".to_string(),
            ..SalaryFields::default()
        };

        let evaluation = PayeEstimator::default()
            .evaluate(&salaried(Period::Annual, fields, true))
            .unwrap();

        let current = &evaluation.current;
        assert_eq!(current.gross_income, Decimal::MAX);
        assert!(current.taxable_income <= current.gross_income);
        assert!(current.annual_tax <= current.gross_income);
        assert!(current.annual_take_home > Decimal::ZERO);
        assert!(evaluation.comparison.is_some());
    }

    #[test]
    fn self_employed_expenses_near_decimal_max() {
        let input = self_employed(
            Period::Annual,
            "70000000000000000000000000000",
            "70000000000000000000000000000",
            true,
        );

        let result = PayeEstimator::default().evaluate(&input).unwrap().current;

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.annual_take_home, dec!(0));
    }
}
