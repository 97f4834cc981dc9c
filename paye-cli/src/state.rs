//! Form state for the interactive estimator.
//!
//! The session holds the latest value of every field. Each edit replaces
//! the previous value (last write wins) and the caller recomputes from the
//! whole form, so there is never a stale or partial result to reconcile.

use paye_core::{EstimatorInput, InputFields, Period, SalaryFields, SelfEmployedFields, UserType};
use thiserror::Error;

use crate::config::Defaults;
use crate::utils::{parse_percent, parse_switch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
}

/// Editable estimator form.
///
/// Salaried and self-employed fields are kept side by side, so switching
/// user type and back does not lose what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorSession {
    defaults: Defaults,
    user_type: UserType,
    period: Period,
    salary: SalaryFields,
    self_employed: SelfEmployedFields,
    compare_regimes: bool,
}

impl EstimatorSession {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            user_type: defaults.user_type,
            period: defaults.period,
            salary: Self::salary_defaults(&defaults),
            self_employed: SelfEmployedFields::default(),
            compare_regimes: false,
            defaults,
        }
    }

    fn salary_defaults(defaults: &Defaults) -> SalaryFields {
        SalaryFields {
            pension_rate_percent: defaults.pension_rate_percent,
            housing_fund_enabled: defaults.housing_fund_enabled,
            ..SalaryFields::default()
        }
    }

    /// Names accepted by [`EstimatorSession::set_field`].
    pub const FIELDS: &[&str] = &[
        "user_type",
        "period",
        "basic",
        "housing",
        "transport",
        "other",
        "pension",
        "nhf",
        "health",
        "rent",
        "gross",
        "expenses",
        "compare",
    ];

    /// Sets one form field from its text value.
    ///
    /// Amount fields accept any text; unreadable amounts count as 0 when
    /// the form is evaluated. Long field names such as `basic_salary` are
    /// accepted too.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownField`] for an unrecognised name and
    /// [`SessionError::InvalidValue`] for a bad user type, period, pension
    /// rate or switch. The form is unchanged on error.
    pub fn set_field(
        &mut self,
        field: &str,
        value: &str,
    ) -> Result<(), SessionError> {
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();
        let invalid = || SessionError::InvalidValue {
            field: field.clone(),
            value: value.to_string(),
        };

        match field.as_str() {
            "user_type" | "type" => self.user_type = UserType::parse(value).ok_or_else(invalid)?,
            "period" => self.period = Period::parse(value).ok_or_else(invalid)?,
            "basic" | "basic_salary" => self.salary.basic_salary = value.to_string(),
            "housing" | "housing_allowance" => self.salary.housing_allowance = value.to_string(),
            "transport" | "transport_allowance" => {
                self.salary.transport_allowance = value.to_string()
            }
            "other" | "other_allowances" => self.salary.other_allowances = value.to_string(),
            "pension" | "pension_rate" | "pension_rate_percent" => {
                self.salary.pension_rate_percent = parse_percent(value).map_err(|_| invalid())?
            }
            "nhf" | "housing_fund" | "housing_fund_enabled" => {
                self.salary.housing_fund_enabled = parse_switch(value).ok_or_else(invalid)?
            }
            "health" | "health_insurance" => self.salary.health_insurance = value.to_string(),
            "rent" | "annual_rent" => self.salary.annual_rent = value.to_string(),
            "gross" | "gross_income" => self.self_employed.gross_income = value.to_string(),
            "expenses" | "business_expenses" => {
                self.self_employed.business_expenses = value.to_string()
            }
            "compare" => self.compare_regimes = parse_switch(value).ok_or_else(invalid)?,
            _ => return Err(SessionError::UnknownField(field.clone())),
        }
        Ok(())
    }

    /// Clears every field back to the configured defaults.
    pub fn reset(&mut self) {
        *self = Self::new(self.defaults.clone());
    }

    /// Snapshot of the form for the current user type.
    pub fn input(&self) -> EstimatorInput {
        let fields = match self.user_type {
            UserType::Salaried => InputFields::Salaried(self.salary.clone()),
            UserType::SelfEmployed => InputFields::SelfEmployed(self.self_employed.clone()),
        };
        EstimatorInput {
            period: self.period,
            fields,
            compare_regimes: self.compare_regimes,
        }
    }
}
