use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductions an employee has declared. Amounts are annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefConfig {
    /// Pension contribution as a percentage of gross (0 to 8).
    pub pension_rate_percent: Decimal,
    pub housing_fund_enabled: bool,
    /// Health-insurance contribution, annualized.
    pub health_insurance: Decimal,
    /// Rent paid over the year. Always an annual figure.
    pub annual_rent: Decimal,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            pension_rate_percent: Decimal::from(8),
            housing_fund_enabled: true,
            health_insurance: Decimal::ZERO,
            annual_rent: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefKind {
    Pension,
    HousingFund,
    HealthInsurance,
    Rent,
    BusinessExpenses,
    Basic,
    Consolidated,
}

impl ReliefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pension => "pension",
            Self::HousingFund => "housing_fund",
            Self::HealthInsurance => "health_insurance",
            Self::Rent => "rent",
            Self::BusinessExpenses => "business_expenses",
            Self::Basic => "basic",
            Self::Consolidated => "consolidated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pension => "Pension",
            Self::HousingFund => "NHF (2.5% of basic)",
            Self::HealthInsurance => "NHIS",
            Self::Rent => "Rent relief",
            Self::BusinessExpenses => "Business expenses",
            Self::Basic => "Basic relief",
            Self::Consolidated => "Consolidated relief",
        }
    }
}

/// Itemized reliefs in the order they were applied, with their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefBreakdown {
    components: Vec<(ReliefKind, Decimal)>,
    total: Decimal,
}

impl ReliefBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: ReliefKind,
        amount: Decimal,
    ) {
        self.components.push((kind, amount));
        self.total = self.total.saturating_add(amount);
    }

    pub fn components(&self) -> &[(ReliefKind, Decimal)] {
        &self.components
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Amount recorded for `kind`, or zero if the regime does not grant it.
    pub fn get(
        &self,
        kind: ReliefKind,
    ) -> Decimal {
        self.components
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, amount)| *amount)
            .unwrap_or(Decimal::ZERO)
    }
}
