//! Validated marginal-rate tables.
//!
//! A [`BracketSchedule`] is plain data: the tax function walks whatever
//! schedule it is given, so adding a regime means adding a table, either
//! through one of the constructors below or by loading a CSV file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBracket;

/// Reasons a list of brackets cannot form a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A schedule needs at least one bracket.
    #[error("schedule '{0}' has no brackets")]
    Empty(String),

    /// The first bracket must start at zero income.
    #[error("first bracket must start at 0, got {0}")]
    NonZeroStart(Decimal),

    /// Bracket `index` does not start where the previous one ended.
    #[error("bracket {index} starts at {found} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// Bracket `index` has a maximum at or below its minimum.
    #[error("bracket {index} has non-positive width ({min} to {max})")]
    NonPositiveWidth {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Only the last bracket may be unbounded.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    /// The last bracket must be unbounded so every income is covered.
    #[error("last bracket must be unbounded, but it ends at {0}")]
    BoundedTop(Decimal),

    /// Rates are fractions in `[0, 1]`.
    #[error("bracket {index} has rate {rate}, expected a fraction between 0 and 1")]
    InvalidRate { index: usize, rate: Decimal },
}

/// An ordered, contiguous set of brackets starting at zero and ending with
/// an unbounded band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule after checking every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found, scanning brackets in order.
    pub fn new(
        name: impl Into<String>,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        let name = name.into();
        let Some(first) = brackets.first() else {
            return Err(ScheduleError::Empty(name));
        };
        if first.min_income != Decimal::ZERO {
            return Err(ScheduleError::NonZeroStart(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.min_income != expected_min {
                return Err(ScheduleError::NotContiguous {
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            match bracket.max_income {
                Some(max) if index == last_index => return Err(ScheduleError::BoundedTop(max)),
                Some(max) if max <= bracket.min_income => {
                    return Err(ScheduleError::NonPositiveWidth {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) => expected_min = max,
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBeforeEnd(index));
                }
                None => {}
            }
        }

        Ok(Self { name, brackets })
    }

    /// The schedule the previous rules used: 7% on the first ₦300,000 rising
    /// to 24% above ₦3,200,000.
    pub fn legacy() -> Self {
        Self::builtin(
            "legacy",
            &[
                (Some(Decimal::from(300_000)), Decimal::new(7, 2)),
                (Some(Decimal::from(600_000)), Decimal::new(11, 2)),
                (Some(Decimal::from(1_100_000)), Decimal::new(15, 2)),
                (Some(Decimal::from(1_600_000)), Decimal::new(19, 2)),
                (Some(Decimal::from(3_200_000)), Decimal::new(21, 2)),
                (None, Decimal::new(24, 2)),
            ],
        )
    }

    /// The 2025 schedule: the first ₦800,000 is zero-rated, rising to 25%
    /// above ₦50,000,000.
    pub fn current() -> Self {
        Self::builtin(
            "current",
            &[
                (Some(Decimal::from(800_000)), Decimal::ZERO),
                (Some(Decimal::from(3_000_000)), Decimal::new(15, 2)),
                (Some(Decimal::from(12_000_000)), Decimal::new(18, 2)),
                (Some(Decimal::from(25_000_000)), Decimal::new(21, 2)),
                (Some(Decimal::from(50_000_000)), Decimal::new(23, 2)),
                (None, Decimal::new(25, 2)),
            ],
        )
    }

    // Built-in tables are valid by construction, so they skip validation.
    fn builtin(
        name: &str,
        bands: &[(Option<Decimal>, Decimal)],
    ) -> Self {
        let mut min_income = Decimal::ZERO;
        let mut brackets = Vec::with_capacity(bands.len());
        for &(max_income, tax_rate) in bands {
            brackets.push(TaxBracket::new(min_income, max_income, tax_rate));
            if let Some(max) = max_income {
                min_income = max;
            }
        }
        Self {
            name: name.to_string(),
            brackets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

}
