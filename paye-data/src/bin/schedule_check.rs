use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paye_data::ScheduleLoader;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Validate a bracket schedule CSV file and print its bands.
///
/// The CSV file should have the following columns:
/// - schedule: Name of the schedule (e.g., current, legacy)
/// - min_income: Lower bound of the band
/// - max_income: Upper bound of the band (empty for the top band)
/// - rate: The marginal rate as a fraction (e.g., 0.15)
#[derive(Parser, Debug)]
#[command(name = "paye-schedule-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing schedule data
    #[arg(short, long)]
    file: PathBuf,

    /// Only print this schedule
    #[arg(short, long)]
    schedule: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    debug!("checking {}", args.file.display());

    let set = ScheduleLoader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load schedules: {}", args.file.display()))?;

    let schedules: Vec<_> = match &args.schedule {
        Some(name) => vec![set.require(name)?],
        None => set.iter().collect(),
    };

    for schedule in schedules {
        println!("{} ({} bands)", schedule.name(), schedule.brackets().len());
        for bracket in schedule.brackets() {
            let max = bracket
                .max_income
                .map(|max| max.to_string())
                .unwrap_or_else(|| "and above".to_string());
            println!(
                "  {:>12} - {:<12} {:>6}%",
                bracket.min_income,
                max,
                (bracket.tax_rate * Decimal::ONE_HUNDRED).normalize()
            );
        }
    }

    println!("{} schedules OK", set.len());
    Ok(())
}
