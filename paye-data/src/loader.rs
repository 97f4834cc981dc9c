use std::fs::File;
use std::io::Read;
use std::path::Path;

use paye_core::{BracketSchedule, ScheduleError, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading bracket schedules.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule '{name}': {source}")]
    InvalidSchedule {
        name: String,
        #[source]
        source: ScheduleError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No schedules found in input")]
    Empty,

    #[error("Schedule '{0}' not found")]
    UnknownSchedule(String),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from a schedules CSV file.
///
/// - `schedule`: Name of the schedule the band belongs to (e.g., `current`)
/// - `min_income`: Lower bound of the band
/// - `max_income`: Upper bound of the band (empty for the unbounded top band)
/// - `rate`: The marginal rate as a fraction (e.g., 0.15 for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Validated schedules keyed by name, in the order they first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSet {
    schedules: Vec<BracketSchedule>,
}

impl ScheduleSet {
    /// The two schedules compiled into the engine.
    pub fn builtin() -> Self {
        Self {
            schedules: vec![BracketSchedule::current(), BracketSchedule::legacy()],
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&BracketSchedule> {
        self.schedules.iter().find(|s| s.name() == name)
    }

    /// Like [`ScheduleSet::get`], but a missing name is an error.
    pub fn require(
        &self,
        name: &str,
    ) -> Result<&BracketSchedule, ScheduleLoaderError> {
        self.get(name)
            .ok_or_else(|| ScheduleLoaderError::UnknownSchedule(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schedules.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BracketSchedule> {
        self.schedules.iter()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Loader for bracket schedules from CSV files.
///
/// Rows for one schedule may appear in any order and may be interleaved
/// with other schedules; each schedule is sorted by `min_income` and then
/// validated as a whole.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse schedule records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice. Columns are matched by header name and surrounding
    /// whitespace is ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        debug!("parsed {} schedule records", records.len());
        Ok(records)
    }

    /// Group records by schedule name and validate each group.
    pub fn build(records: &[ScheduleRecord]) -> Result<ScheduleSet, ScheduleLoaderError> {
        if records.is_empty() {
            return Err(ScheduleLoaderError::Empty);
        }

        let mut groups: Vec<(&str, Vec<TaxBracket>)> = Vec::new();
        for record in records {
            let bracket = TaxBracket::new(record.min_income, record.max_income, record.rate);
            match groups.iter_mut().find(|(name, _)| *name == record.schedule) {
                Some((_, brackets)) => brackets.push(bracket),
                None => groups.push((&record.schedule, vec![bracket])),
            }
        }

        let mut schedules = Vec::with_capacity(groups.len());
        for (name, mut brackets) in groups {
            brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            let schedule = BracketSchedule::new(name, brackets).map_err(|source| {
                ScheduleLoaderError::InvalidSchedule {
                    name: name.to_string(),
                    source,
                }
            })?;
            debug!(
                "schedule '{}' has {} bands",
                schedule.name(),
                schedule.brackets().len()
            );
            schedules.push(schedule);
        }

        Ok(ScheduleSet { schedules })
    }

    /// Parse and build the schedules in the CSV file at `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<ScheduleSet, ScheduleLoaderError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let records = Self::parse(file)?;
        let set = Self::build(&records)?;
        info!("loaded {} schedules from {}", set.len(), path.display());
        Ok(set)
    }
}
