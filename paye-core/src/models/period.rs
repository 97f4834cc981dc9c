use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The period a user's amounts are quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Monthly,
    Annual,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" | "a" | "y" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Factor that converts an amount in this period to an annual amount.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Monthly => Decimal::from(12),
            Self::Annual => Decimal::ONE,
        }
    }
}
