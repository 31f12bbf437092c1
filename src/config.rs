//! Application settings persisted as JSON
//!
//! A missing settings file means defaults; a file that exists but does not
//! parse is reported rather than silently replaced.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FundError, Result};
use crate::portfolio::DEFAULT_TREND_MONTHS;
use crate::projection::{CalculationKind, TaxRates};

/// Default settings file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "fund_calculator.json";

/// User preferences and tax constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Tax filer status calculators start with
    pub default_tax_filer: bool,

    /// Calculator mode used when none is given
    pub default_calculation: CalculationKind,

    /// Canonical tax table for calculators and the dashboard
    pub tax_rates: TaxRates,

    /// Directory holding the portfolio blob
    pub data_dir: PathBuf,

    /// Length of the dashboard's forward trend series
    pub trend_horizon_months: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_tax_filer: true,
            default_calculation: CalculationKind::FixedSavings,
            tax_rates: TaxRates::default(),
            data_dir: PathBuf::from("data"),
            trend_horizon_months: DEFAULT_TREND_MONTHS,
        }
    }
}

impl AppConfig {
    /// Read settings from `path`, using defaults when the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| config_error(path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(config_error(path, e)),
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|e| config_error(path, e))?;
        fs::write(path, text).map_err(|e| config_error(path, e))
    }

    /// Update one setting from text, as typed on the command line
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: &str| FundError::InvalidSetting {
            key: key.to_string(),
            reason: format!("{reason}: {value:?}"),
        };

        match key {
            "default-tax-filer" => {
                self.default_tax_filer = value
                    .parse::<bool>()
                    .map_err(|_| invalid("expected true or false"))?;
            }
            "default-calculation" => {
                self.default_calculation = CalculationKind::parse(value)
                    .ok_or_else(|| invalid("expected fixed-savings, goal-finder or step-up"))?;
            }
            "filer-tax-rate" => {
                self.tax_rates.filer =
                    parse_fraction(value).ok_or_else(|| invalid("expected a fraction in [0, 1]"))?;
            }
            "non-filer-tax-rate" => {
                self.tax_rates.non_filer =
                    parse_fraction(value).ok_or_else(|| invalid("expected a fraction in [0, 1]"))?;
            }
            "data-dir" => self.data_dir = PathBuf::from(value),
            "trend-horizon-months" => {
                self.trend_horizon_months = value
                    .parse::<u32>()
                    .map_err(|_| invalid("expected a whole number of months"))?;
            }
            _ => return Err(invalid("unknown setting")),
        }
        Ok(())
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| (0.0..=1.0).contains(rate))
}

fn config_error(path: &Path, err: impl std::fmt::Display) -> FundError {
    FundError::Config {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
