//! CSV loader for batch estimator input.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Amounts
//! are free text exactly as a user would type them into the form, so
//! `"200,000"` and `"₦200,000"` are both fine and an empty cell is 0.
//! Quote any amount that contains a comma.
//!
//! | Column                 | Required | Notes                                      |
//! |------------------------|----------|--------------------------------------------|
//! | `user_type`            | yes      | `salaried` or `self_employed`              |
//! | `period`               | no       | `monthly` or `annual`; config default      |
//! | `basic_salary`         | no       | salaried                                   |
//! | `housing_allowance`    | no       | salaried                                   |
//! | `transport_allowance`  | no       | salaried                                   |
//! | `other_allowances`     | no       | salaried                                   |
//! | `pension_rate_percent` | no       | salaried; config default                   |
//! | `housing_fund_enabled` | no       | salaried; `true`/`false`; config default   |
//! | `health_insurance`     | no       | salaried                                   |
//! | `annual_rent`          | no       | salaried; always a yearly figure           |
//! | `gross_income`         | no       | self-employed                              |
//! | `business_expenses`    | no       | self-employed                              |
//! | `compare`              | no       | `true` to add the legacy comparison        |
//!
//! Columns that do not apply to a row's user type are ignored.
//!
//! ### Example
//!
//! ```csv
//! user_type,period,basic_salary,housing_allowance,gross_income,compare
//! salaried,monthly,"200,000","100,000",,true
//! self_employed,annual,,,"6,000,000",false
//! ```
use std::path::Path;

use paye_core::{
    EstimatorInput, InputFields, Period, SalaryFields, SelfEmployedFields, UserType,
};
use serde::Deserialize;
use tracing::debug;

use crate::config::Defaults;
use crate::utils::{parse_percent, parse_switch};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    user_type: String,
    period: String,
    basic_salary: String,
    housing_allowance: String,
    transport_allowance: String,
    other_allowances: String,
    pension_rate_percent: String,
    housing_fund_enabled: String,
    health_insurance: String,
    annual_rent: String,
    gross_income: String,
    business_expenses: String,
    compare: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// `row` is always the 1-based data row number (header = row 0).
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV parsing failed (bad structure, ragged rows, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing or unrecognised user type '{value}' on row {row}")]
    InvalidUserType { value: String, row: usize },

    #[error("unrecognised period '{value}' on row {row}")]
    InvalidPeriod { value: String, row: usize },

    #[error("invalid pension rate '{value}' on row {row}")]
    InvalidPensionRate { value: String, row: usize },

    #[error("invalid value '{value}' for {column} on row {row}")]
    InvalidSwitch {
        column: &'static str,
        value: String,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn switch_or(
    value: &str,
    default: bool,
    column: &'static str,
    row: usize,
) -> Result<bool, CsvLoadError> {
    if value.is_empty() {
        return Ok(default);
    }
    parse_switch(value).ok_or_else(|| CsvLoadError::InvalidSwitch {
        column,
        value: value.to_string(),
        row,
    })
}

/// Convert a single CSV row into an [`EstimatorInput`].
fn convert_row(
    row: CsvRow,
    row_number: usize,
    defaults: &Defaults,
) -> Result<EstimatorInput, CsvLoadError> {
    let user_type =
        UserType::parse(&row.user_type).ok_or_else(|| CsvLoadError::InvalidUserType {
            value: row.user_type.clone(),
            row: row_number,
        })?;

    let period = if row.period.is_empty() {
        defaults.period
    } else {
        Period::parse(&row.period).ok_or_else(|| CsvLoadError::InvalidPeriod {
            value: row.period.clone(),
            row: row_number,
        })?
    };

    let compare_regimes = switch_or(&row.compare, false, "compare", row_number)?;

    let fields = match user_type {
        UserType::Salaried => {
            let pension_rate_percent = if row.pension_rate_percent.is_empty() {
                defaults.pension_rate_percent
            } else {
                parse_percent(&row.pension_rate_percent).map_err(|_| {
                    CsvLoadError::InvalidPensionRate {
                        value: row.pension_rate_percent.clone(),
                        row: row_number,
                    }
                })?
            };
            let housing_fund_enabled = switch_or(
                &row.housing_fund_enabled,
                defaults.housing_fund_enabled,
                "housing_fund_enabled",
                row_number,
            )?;
            InputFields::Salaried(SalaryFields {
                basic_salary: row.basic_salary,
                housing_allowance: row.housing_allowance,
                transport_allowance: row.transport_allowance,
                other_allowances: row.other_allowances,
                pension_rate_percent,
                housing_fund_enabled,
                health_insurance: row.health_insurance,
                annual_rent: row.annual_rent,
            })
        }
        UserType::SelfEmployed => InputFields::SelfEmployed(SelfEmployedFields {
            gross_income: row.gross_income,
            business_expenses: row.business_expenses,
        }),
    };

    Ok(EstimatorInput {
        period,
        fields,
        compare_regimes,
    })
}

/// Parse CSV text and return one [`EstimatorInput`] per data row, in file
/// order. Values missing from a row are taken from `defaults`.
///
/// # Errors
///
/// * [CsvLoadError::Parse]: if the CSV is structurally invalid.
/// * The other variants: if a row holds an unusable user type, period,
///   pension rate or switch value.
pub fn load_from_str(
    input: &str,
    defaults: &Defaults,
) -> Result<Vec<EstimatorInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let inputs = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number, defaults)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("loaded {} estimator inputs", inputs.len());
    Ok(inputs)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(
    path: &Path,
    defaults: &Defaults,
) -> Result<Vec<EstimatorInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents, defaults)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
