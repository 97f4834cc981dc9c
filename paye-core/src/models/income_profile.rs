use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UserType;

/// Annual pay components for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryIncome {
    pub basic_salary: Decimal,
    pub housing_allowance: Decimal,
    pub transport_allowance: Decimal,
    pub other_allowances: Decimal,
}

impl SalaryIncome {
    pub fn gross(&self) -> Decimal {
        self.basic_salary
            .saturating_add(self.housing_allowance)
            .saturating_add(self.transport_allowance)
            .saturating_add(self.other_allowances)
    }
}

/// Annual turnover and costs for a self-employed earner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmployedIncome {
    pub gross_income: Decimal,
    pub business_expenses: Decimal,
}

/// One person's annualized income for a single evaluation.
///
/// All amounts are non-negative annual figures; the input normalizer is
/// responsible for period conversion and for turning blanks into zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "user_type", rename_all = "snake_case")]
pub enum IncomeProfile {
    Salaried(SalaryIncome),
    SelfEmployed(SelfEmployedIncome),
}

impl IncomeProfile {
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Salaried(_) => UserType::Salaried,
            Self::SelfEmployed(_) => UserType::SelfEmployed,
        }
    }

    pub fn gross_income(&self) -> Decimal {
        match self {
            Self::Salaried(salary) => salary.gross(),
            Self::SelfEmployed(income) => income.gross_income,
        }
    }

    /// Business expenses deducted from take-home pay; zero for employees.
    pub fn business_expenses(&self) -> Decimal {
        match self {
            Self::Salaried(_) => Decimal::ZERO,
            Self::SelfEmployed(income) => income.business_expenses,
        }
    }
}
