use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BracketSchedule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    #[default]
    Current,
    Legacy,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

/// Flat reliefs granted to everyone under the legacy rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatReliefRules {
    /// Basic relief is the larger of `gross * basic_relief_rate` and
    /// `basic_relief_floor`.
    pub basic_relief_rate: Decimal,
    pub basic_relief_floor: Decimal,
    /// Consolidated relief is `gross * consolidated_relief_rate`.
    pub consolidated_relief_rate: Decimal,
}

/// Deduction parameters for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefRules {
    /// Statutory ceiling on pension relief, as a fraction of gross income.
    pub pension_cap_rate: Decimal,
    /// Housing-fund relief as a fraction of basic salary.
    pub housing_fund_rate: Decimal,
    /// Fraction of annual rent paid that counts as relief.
    pub rent_relief_rate: Decimal,
    /// Upper limit on rent relief.
    pub rent_relief_cap: Decimal,
    /// `None` when the regime grants no flat reliefs.
    pub flat_reliefs: Option<FlatReliefRules>,
}

impl ReliefRules {
    pub fn current() -> Self {
        Self {
            pension_cap_rate: Decimal::new(8, 2),
            housing_fund_rate: Decimal::new(25, 3),
            rent_relief_rate: Decimal::new(20, 2),
            rent_relief_cap: Decimal::from(500_000),
            flat_reliefs: None,
        }
    }

    pub fn legacy() -> Self {
        Self {
            flat_reliefs: Some(FlatReliefRules {
                basic_relief_rate: Decimal::new(1, 2),
                basic_relief_floor: Decimal::from(200_000),
                consolidated_relief_rate: Decimal::new(20, 2),
            }),
            ..Self::current()
        }
    }
}

/// A regime as the engine sees it: which marginal table to use and which
/// reliefs to grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub regime: Regime,
    pub schedule: BracketSchedule,
    pub reliefs: ReliefRules,
}

impl RegimeRules {
    pub fn new(
        regime: Regime,
        schedule: BracketSchedule,
        reliefs: ReliefRules,
    ) -> Self {
        Self {
            regime,
            schedule,
            reliefs,
        }
    }

    pub fn current() -> Self {
        Self::new(
            Regime::Current,
            BracketSchedule::current(),
            ReliefRules::current(),
        )
    }

    pub fn legacy() -> Self {
        Self::new(
            Regime::Legacy,
            BracketSchedule::legacy(),
            ReliefRules::legacy(),
        )
    }

    /// Replaces the marginal table, keeping the relief rules.
    pub fn with_schedule(
        mut self,
        schedule: BracketSchedule,
    ) -> Self {
        self.schedule = schedule;
        self
    }
}
