use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use paye_cli::config::{Config, Defaults};
use paye_cli::state::EstimatorSession;
use paye_cli::utils::{parse_percent, parse_switch};
use paye_cli::{app, csv_loader, logging};
use paye_core::{EstimatorInput, InputFields, Period, SalaryFields, SelfEmployedFields, UserType};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian PAYE estimator.
///
/// Estimates personal income tax for salary earners and self-employed
/// people, and optionally compares it with the legacy regime.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bracket schedules CSV; overrides the config file.
    #[arg(long, global = true)]
    schedules: Option<PathBuf>,

    /// Log level or filter directive (e.g. `debug`). `RUST_LOG` wins.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate tax for one set of figures and print a report.
    Estimate(EstimateArgs),

    /// Estimate every row of an input CSV and write CSV results.
    Batch {
        /// Input CSV, one estimate per row.
        #[arg(short, long)]
        file: PathBuf,

        /// Output CSV; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the form line by line (`field=value`) and see the result update.
    Interactive,
}

#[derive(Debug, Args)]
struct EstimateArgs {
    /// `salaried` or `self_employed`.
    #[arg(long, value_parser = parse_user_type)]
    user_type: Option<UserType>,

    /// Period the amounts are quoted in: `monthly` or `annual`.
    #[arg(long, value_parser = parse_period)]
    period: Option<Period>,

    /// Basic salary.
    #[arg(long, default_value = "")]
    basic: String,

    /// Housing allowance.
    #[arg(long, default_value = "")]
    housing: String,

    /// Transport allowance.
    #[arg(long, default_value = "")]
    transport: String,

    /// Other allowances.
    #[arg(long, default_value = "")]
    other: String,

    /// Gross income (self-employed).
    #[arg(long, default_value = "")]
    gross: String,

    /// Business expenses (self-employed).
    #[arg(long, default_value = "")]
    expenses: String,

    /// Pension contribution percentage, capped at 8.
    #[arg(long, value_parser = parse_percent)]
    pension_rate: Option<Decimal>,

    /// Deduct the housing fund (NHF) contribution: `on` or `off`.
    /// Defaults to the config value.
    #[arg(long, value_name = "on|off", value_parser = parse_housing_fund)]
    housing_fund: Option<bool>,

    /// Health insurance (NHIS) premiums.
    #[arg(long, default_value = "")]
    health_insurance: String,

    /// Annual rent. Always a yearly figure.
    #[arg(long, default_value = "")]
    rent: String,

    /// Also compute the legacy regime and show the difference.
    #[arg(long)]
    compare: bool,
}

fn parse_user_type(s: &str) -> Result<UserType, String> {
    UserType::parse(s).ok_or_else(|| format!("unknown user type '{s}'"))
}

fn parse_period(s: &str) -> Result<Period, String> {
    Period::parse(s).ok_or_else(|| format!("unknown period '{s}'"))
}

fn parse_housing_fund(s: &str) -> Result<bool, String> {
    parse_switch(s).ok_or_else(|| format!("expected on or off, got '{s}'"))
}

impl EstimateArgs {
    /// Flags override config defaults.
    fn into_input(
        self,
        defaults: &Defaults,
    ) -> EstimatorInput {
        let fields = match self.user_type.unwrap_or(defaults.user_type) {
            UserType::Salaried => InputFields::Salaried(SalaryFields {
                basic_salary: self.basic,
                housing_allowance: self.housing,
                transport_allowance: self.transport,
                other_allowances: self.other,
                pension_rate_percent: self
                    .pension_rate
                    .unwrap_or(defaults.pension_rate_percent),
                housing_fund_enabled: self
                    .housing_fund
                    .unwrap_or(defaults.housing_fund_enabled),
                health_insurance: self.health_insurance,
                annual_rent: self.rent,
            }),
            UserType::SelfEmployed => InputFields::SelfEmployed(SelfEmployedFields {
                gross_income: self.gross,
                business_expenses: self.expenses,
            }),
        };
        EstimatorInput {
            period: self.period.unwrap_or(defaults.period),
            fields,
            compare_regimes: self.compare,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let log_level = cli.log_level.as_deref().or(config.logging.level.as_deref());
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    logging::init_logging(log_level, log_file)?;
    debug!(?config, "configuration loaded");

    let estimator = app::build_estimator(&config.schedules, cli.schedules.as_deref())?;

    match cli.command {
        Command::Estimate(args) => {
            let input = args.into_input(&config.defaults);
            let report = app::estimate(&estimator, &input)?;
            print!("{report}");
        }
        Command::Batch { file, output } => {
            let inputs = csv_loader::load_from_file(&file, &config.defaults)
                .with_context(|| format!("Failed to load inputs: {}", file.display()))?;
            info!("loaded {} inputs from {}", inputs.len(), file.display());
            match output {
                Some(path) => {
                    let out = File::create(&path)
                        .with_context(|| format!("Failed to create: {}", path.display()))?;
                    app::run_batch(&estimator, &inputs, BufWriter::new(out))?;
                }
                None => {
                    app::run_batch(&estimator, &inputs, io::stdout().lock())?;
                }
            }
        }
        Command::Interactive => {
            let mut session = EstimatorSession::new(config.defaults.clone());
            app::run_interactive(
                &estimator,
                &mut session,
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
        }
    }

    io::stdout().flush()?;
    Ok(())
}
