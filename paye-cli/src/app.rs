use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use paye_core::{EstimatorInput, PayeEstimator, RegimeRules};
use paye_data::{ScheduleLoader, ScheduleSet};
use tracing::{debug, info, warn};

use crate::config::Schedules;
use crate::logging;
use crate::report::{self, ResultRow};
use crate::state::EstimatorSession;

/// Builds the estimator from the configured schedules.
///
/// `schedules_file` overrides the file named in the config. Without either,
/// the compiled-in schedules are used.
pub fn build_estimator(
    schedules: &Schedules,
    schedules_file: Option<&Path>,
) -> Result<PayeEstimator> {
    let set = match schedules_file.or(schedules.file.as_deref()) {
        Some(path) => ScheduleLoader::load_from_file(path)
            .with_context(|| format!("Failed to load schedules: {}", path.display()))?,
        None => ScheduleSet::builtin(),
    };

    let current = set.require(&schedules.current)?.clone();
    let legacy = set.require(&schedules.legacy)?.clone();
    debug!(
        current = current.name(),
        legacy = legacy.name(),
        "schedules selected"
    );

    Ok(PayeEstimator::new(
        RegimeRules::current().with_schedule(current),
        RegimeRules::legacy().with_schedule(legacy),
    ))
}

/// Evaluates one input and renders the text report.
pub fn estimate(
    estimator: &PayeEstimator,
    input: &EstimatorInput,
) -> Result<String> {
    let evaluation = estimator.evaluate(input)?;
    Ok(report::render_text(&evaluation, input.period))
}

/// Evaluates every input and writes one CSV result row each.
/// Returns the number of rows written.
pub fn run_batch<W: Write>(
    estimator: &PayeEstimator,
    inputs: &[EstimatorInput],
    writer: W,
) -> Result<usize> {
    let rows = inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| {
            let evaluation = estimator
                .evaluate(input)
                .with_context(|| {
                    format!(
                        "Failed to evaluate row {} ({})",
                        idx + 1,
                        input.user_type().as_str()
                    )
                })?;
            Ok(ResultRow::new(idx + 1, input.period, &evaluation))
        })
        .collect::<Result<Vec<_>>>()?;

    report::write_csv(writer, &rows).context("Failed to write results")?;
    info!("wrote {} result rows", rows.len());
    Ok(rows.len())
}

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Set { field: &'a str, value: &'a str },
    Log(&'a str),
    Reset,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if let Some((field, value)) = line.split_once('=') {
            let field = field.trim();
            if field.eq_ignore_ascii_case("log") {
                return Self::Log(value.trim());
            }
            return Self::Set {
                field,
                value: value.trim(),
            };
        }
        match line.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "reset" | "clear" => Self::Reset,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line),
        }
    }
}

fn write_help<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Enter field=value to update the form, e.g. basic=200,000")?;
    writeln!(writer, "Fields: {}", EstimatorSession::FIELDS.join(", "))?;
    writeln!(writer, "Commands: show, reset, log=<level>, help, quit")?;
    Ok(())
}

/// Runs the interactive loop until `quit` or end of input.
///
/// Every accepted edit recomputes the whole form and prints a fresh report.
pub fn run_interactive<R: BufRead, W: Write>(
    estimator: &PayeEstimator,
    session: &mut EstimatorSession,
    reader: R,
    mut writer: W,
) -> Result<()> {
    write_help(&mut writer)?;

    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        match Command::parse(&line) {
            Command::Set { field, value } => match session.set_field(field, value) {
                Ok(()) => {
                    debug!(field, value, "field updated");
                    writeln!(writer, "{}", estimate(estimator, &session.input())?)?;
                }
                Err(e) => {
                    warn!("{e}");
                    writeln!(writer, "error: {e}")?;
                }
            },
            Command::Log(level) => match logging::set_log_level(level) {
                Ok(()) => writeln!(writer, "log level set to {level}")?,
                Err(e) => writeln!(writer, "error: {e}")?,
            },
            Command::Reset => {
                session.reset();
                writeln!(writer, "form cleared")?;
            }
            Command::Show => writeln!(writer, "{}", estimate(estimator, &session.input())?)?,
            Command::Help => write_help(&mut writer)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(writer, "error: unrecognised input '{text}' (type help)")?
            }
        }
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Defaults;
    use paye_core::{InputFields, Period, SelfEmployedFields};
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_commands() {
        assert_eq!(
            Command::parse(" basic = 200,000 "),
            Command::Set {
                field: "basic",
                value: "200,000"
            }
        );
        assert_eq!(Command::parse("log=debug"), Command::Log("debug"));
        assert_eq!(Command::parse("RESET"), Command::Reset);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("hello"), Command::Unknown("hello"));
    }

    #[test]
    fn build_estimator_defaults_to_builtin_schedules() {
        let estimator = build_estimator(&Schedules::default(), None).unwrap();

        assert_eq!(estimator, PayeEstimator::default());
    }

    #[test]
    fn build_estimator_rejects_unknown_schedule_name() {
        let schedules = Schedules {
            current: "2030".to_string(),
            ..Schedules::default()
        };

        let err = build_estimator(&schedules, None).unwrap_err();

        assert!(err.to_string().contains("'2030'"), "got: {err}");
    }

    #[test]
    fn build_estimator_can_swap_schedules() {
        let schedules = Schedules {
            current: "legacy".to_string(),
            ..Schedules::default()
        };

        let estimator = build_estimator(&schedules, None).unwrap();

        assert_eq!(estimator.current_rules().schedule.name(), "legacy");
    }

    #[test]
    fn batch_writes_one_row_per_input() {
        let inputs = vec![
            EstimatorInput::default(),
            EstimatorInput {
                period: Period::Annual,
                fields: InputFields::SelfEmployed(SelfEmployedFields {
                    gross_income: "1,200,000".to_string(),
                    business_expenses: String::new(),
                }),
                compare_regimes: true,
            },
        ];
        let mut out = Vec::new();

        let written = run_batch(&PayeEstimator::default(), &inputs, &mut out).unwrap();

        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,self_employed,annual,current,1200000"));
        assert!(lines[2].ends_with(",1140000,78000,18000"), "got: {}", lines[2]);
    }

    #[test]
    fn interactive_recomputes_after_each_edit() {
        let mut session = EstimatorSession::new(Defaults::default());
        let input = "basic=100,000\nbogus=1\nbasic=200,000\nquit\nbasic=1\n";
        let mut out = Vec::new();

        run_interactive(
            &PayeEstimator::default(),
            &mut session,
            input.as_bytes(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Gross income").count(), 2);
        assert!(text.contains("₦1,200,000"));
        assert!(text.contains("₦2,400,000"));
        assert!(text.contains("error: unknown field 'bogus'"));
        // Lines after quit are not read.
        let InputFields::Salaried(fields) = session.input().fields else {
            panic!("expected salaried fields");
        };
        assert_eq!(fields.basic_salary, "200,000");
    }

    #[test]
    fn interactive_reset_clears_form() {
        let mut session = EstimatorSession::new(Defaults::default());
        let input = "gross=5,000,000\nreset\n";
        let mut out = Vec::new();

        run_interactive(
            &PayeEstimator::default(),
            &mut session,
            input.as_bytes(),
            &mut out,
        )
        .unwrap();

        assert_eq!(session.input(), EstimatorInput::default());
        assert!(String::from_utf8(out).unwrap().contains("form cleared"));
    }
}
