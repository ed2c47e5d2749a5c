use std::env;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipeline::YearFilter;

/// Format of ticket timestamps once the millisecond suffix is dropped.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const CONFIG_ENV_VAR: &str = "BOTTLECOUNT_CONFIG";

pub const DEFAULT_ACCEPTED_YEAR: i32 = 2017;
pub const DEFAULT_PERIOD_END: &str = "2017-12-31_23:59:59";
pub const DEFAULT_START: &str = "2017-01-01";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Years whose tickets are kept; everything else is set aside as filtered.
    pub accepted_years: Vec<i32>,
    /// Inclusive upper bound of the report period, `YYYY-MM-DD_HH:MM:SS`.
    pub period_end: String,
    /// Start date used when none is supplied, `YYYY-MM-DD`.
    pub default_start: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            accepted_years: vec![DEFAULT_ACCEPTED_YEAR],
            period_end: DEFAULT_PERIOD_END.to_string(),
            default_start: DEFAULT_START.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded report configuration");
        Ok(config)
    }

    /// An explicit path wins, then `BOTTLECOUNT_CONFIG`, then the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn year_filter(&self) -> YearFilter {
        YearFilter::new(self.accepted_years.iter().copied())
    }

    pub fn period_end(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.period_end)
    }

    pub fn default_start(&self) -> Result<NaiveDateTime> {
        parse_start_date(&self.default_start)
    }

    fn validate(&self) -> Result<()> {
        if self.accepted_years.is_empty() {
            return Err(PipelineError::Config(
                "accepted_years must list at least one year".to_string(),
            ));
        }
        let start = self.default_start()?;
        let end = self.period_end()?;
        if start > end {
            return Err(PipelineError::Config(format!(
                "default_start {} is after period_end {}",
                self.default_start, self.period_end
            )));
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` start date at midnight.
pub fn parse_start_date(value: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|source| PipelineError::InvalidDate {
            value: value.to_string(),
            source,
        })
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|source| {
        PipelineError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}
