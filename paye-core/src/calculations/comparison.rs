use tracing::debug;

use crate::calculations::common::percent_of;
use crate::models::{CalculationResult, RegimeComparison};

/// Compares the same income under the current and legacy regimes.
///
/// Savings are positive when the current regime charges less tax.
pub fn compare(
    current: &CalculationResult,
    legacy: CalculationResult,
) -> RegimeComparison {
    let savings = legacy.annual_tax.saturating_sub(current.annual_tax);
    let savings_percent = percent_of(savings, legacy.annual_tax);
    debug!(
        current_tax = %current.annual_tax,
        legacy_tax = %legacy.annual_tax,
        savings = %savings,
        "regimes compared"
    );

    RegimeComparison {
        legacy,
        savings,
        savings_percent,
    }
}
