use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Period, UserType};

/// Raw form values as the estimator front end collects them.
///
/// Amounts are free text such as `"200,000"` or `"₦50,000"`, and blanks are
/// allowed; [`normalize`](crate::calculations::normalize) turns them into
/// annual figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorInput {
    pub period: Period,
    pub fields: InputFields,
    pub compare_regimes: bool,
}

impl EstimatorInput {
    pub fn user_type(&self) -> UserType {
        self.fields.user_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "user_type", rename_all = "snake_case")]
pub enum InputFields {
    Salaried(SalaryFields),
    SelfEmployed(SelfEmployedFields),
}

impl Default for InputFields {
    fn default() -> Self {
        Self::Salaried(SalaryFields::default())
    }
}

impl InputFields {
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Salaried(_) => UserType::Salaried,
            Self::SelfEmployed(_) => UserType::SelfEmployed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryFields {
    pub basic_salary: String,
    pub housing_allowance: String,
    pub transport_allowance: String,
    pub other_allowances: String,
    pub pension_rate_percent: Decimal,
    pub housing_fund_enabled: bool,
    pub health_insurance: String,
    /// Always read as an annual figure, whatever the period.
    pub annual_rent: String,
}

impl Default for SalaryFields {
    fn default() -> Self {
        Self {
            basic_salary: String::new(),
            housing_allowance: String::new(),
            transport_allowance: String::new(),
            other_allowances: String::new(),
            pension_rate_percent: Decimal::from(8),
            housing_fund_enabled: true,
            health_insurance: String::new(),
            annual_rent: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfEmployedFields {
    pub gross_income: String,
    pub business_expenses: String,
}
