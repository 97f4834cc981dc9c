//! TOML configuration for the `paye` binary.
//!
//! Every section and key is optional. Command-line flags override what is
//! set here, and anything left unset falls back to the built-in defaults.
//!
//! ```toml
//! [defaults]
//! user_type = "salaried"
//! period = "monthly"
//! pension_rate_percent = "8"
//! housing_fund_enabled = true
//!
//! [schedules]
//! file = "data/schedules.csv"
//! current = "current"
//! legacy = "legacy"
//!
//! [logging]
//! level = "info"
//! file = "paye.log"
//! ```

use std::path::{Path, PathBuf};

use paye_core::{Period, UserType};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
    pub schedules: Schedules,
    pub logging: Logging,
}

/// Form values used when neither a flag nor a CSV column sets them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub user_type: UserType,
    pub period: Period,
    pub pension_rate_percent: Decimal,
    pub housing_fund_enabled: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            user_type: UserType::Salaried,
            period: Period::Monthly,
            pension_rate_percent: Decimal::from(8),
            housing_fund_enabled: true,
        }
    }
}

/// Where bracket schedules come from and which ones each regime uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schedules {
    /// Schedules CSV; the compiled-in schedules are used when unset.
    pub file: Option<PathBuf>,
    pub current: String,
    pub legacy: String,
}

impl Default for Schedules {
    fn default() -> Self {
        Self {
            file: None,
            current: "current".to_string(),
            legacy: "legacy".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
