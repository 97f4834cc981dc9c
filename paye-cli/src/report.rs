//! Rendering of evaluations as a text report or CSV result rows.

use std::io;

use paye_core::calculations::common::round_half_up;
use paye_core::calculations::format::{format_naira, format_percent};
use paye_core::{CalculationResult, Evaluation, Period};
use rust_decimal::Decimal;
use serde::Serialize;

const LABEL_WIDTH: usize = 24;

fn line(
    label: &str,
    value: &str,
) -> String {
    format!("{label:<LABEL_WIDTH$}{value:>16}\n")
}

fn result_section(result: &CalculationResult) -> String {
    let mut out = line("Gross income", &format_naira(result.gross_income));
    out.push_str("Reliefs\n");
    for (kind, amount) in result.reliefs.components() {
        out.push_str(&line(&format!("  {}", kind.label()), &format_naira(*amount)));
    }
    out.push_str(&line("Total reliefs", &format_naira(result.total_reliefs)));
    out.push_str(&line("Taxable income", &format_naira(result.taxable_income)));
    out.push_str(&line("Annual tax", &format_naira(result.annual_tax)));
    out.push_str(&line("Monthly tax", &format_naira(result.monthly_tax)));
    out.push_str(&line("Effective rate", &format_percent(result.effective_rate)));
    out.push_str(&line(
        "Marginal rate",
        &format_percent(result.marginal_rate * Decimal::ONE_HUNDRED),
    ));
    if !result.business_expenses.is_zero() {
        out.push_str(&line("Business expenses", &format_naira(result.business_expenses)));
    }
    out.push_str(&line("Take-home (annual)", &format_naira(result.annual_take_home)));
    out.push_str(&line("Take-home (monthly)", &format_naira(result.monthly_take_home)));
    out
}

/// Renders `evaluation` as the multi-line report printed by the CLI.
///
/// `period` is the period the amounts were entered in.
pub fn render_text(
    evaluation: &Evaluation,
    period: Period,
) -> String {
    let current = &evaluation.current;
    let mut out = format!(
        "{} · {} regime · {} schedule · {} input\n",
        current.user_type.label(),
        current.regime.as_str(),
        current.schedule,
        period.as_str()
    );
    out.push_str(&result_section(current));

    if let Some(comparison) = &evaluation.comparison {
        let legacy = &comparison.legacy;
        out.push_str(&format!(
            "\nCompared with {} regime · {} schedule\n",
            legacy.regime.as_str(),
            legacy.schedule
        ));
        out.push_str(&result_section(legacy));
        let label = if comparison.savings < Decimal::ZERO {
            "Extra tax"
        } else {
            "Savings"
        };
        out.push('\n');
        out.push_str(&line(
            label,
            &format!(
                "{} ({})",
                format_naira(comparison.savings.abs()),
                format_percent(comparison.savings_percent.abs())
            ),
        ));
    }
    out
}

/// One line of batch output. Amounts are rounded to kobo, without trailing
/// zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub row: usize,
    pub user_type: &'static str,
    pub period: &'static str,
    pub schedule: String,
    pub gross_income: Decimal,
    pub total_reliefs: Decimal,
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub annual_take_home: Decimal,
    pub legacy_annual_tax: Option<Decimal>,
    pub savings: Option<Decimal>,
}

impl ResultRow {
    pub fn new(
        row: usize,
        period: Period,
        evaluation: &Evaluation,
    ) -> Self {
        let current = &evaluation.current;
        let kobo = |value: Decimal| round_half_up(value, 2).normalize();
        Self {
            row,
            user_type: current.user_type.as_str(),
            period: period.as_str(),
            schedule: current.schedule.clone(),
            gross_income: kobo(current.gross_income),
            total_reliefs: kobo(current.total_reliefs),
            taxable_income: kobo(current.taxable_income),
            annual_tax: kobo(current.annual_tax),
            monthly_tax: kobo(current.monthly_tax),
            effective_rate: kobo(current.effective_rate),
            marginal_rate: current.marginal_rate,
            annual_take_home: kobo(current.annual_take_home),
            legacy_annual_tax: evaluation
                .comparison
                .as_ref()
                .map(|c| kobo(c.legacy.annual_tax)),
            savings: evaluation.comparison.as_ref().map(|c| kobo(c.savings)),
        }
    }
}

/// Writes `rows` as CSV with a header line.
pub fn write_csv<W: io::Write>(
    writer: W,
    rows: &[ResultRow],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
