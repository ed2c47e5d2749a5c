use std::fs;
use std::path::Path;

use bottlecount_parser::{extract_line, raw_lines, LineOutcome};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_ACCEPTED_YEAR;
use crate::enrich::{enrich, EnrichedRecord};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFilter {
    years: Vec<i32>,
}

impl YearFilter {
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();
        Self { years }
    }

    pub fn accepts(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }
}

impl Default for YearFilter {
    fn default() -> Self {
        Self::new([DEFAULT_ACCEPTED_YEAR])
    }
}

/// Output of [`prepare_data`]. Each group keeps input line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedData {
    pub records: Vec<EnrichedRecord>,
    pub filtered: Vec<EnrichedRecord>,
    pub errors: Vec<String>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareSummary {
    pub accepted: usize,
    pub filtered: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl PreparedData {
    pub fn summary(&self) -> PrepareSummary {
        PrepareSummary {
            accepted: self.records.len(),
            filtered: self.filtered.len(),
            errors: self.errors.len(),
            skipped: self.skipped,
        }
    }
}

/// Extracts and enriches every ticket in a receipt log.
///
/// Unparsable lines are collected as diagnostics and never abort the run. A
/// timestamp that survives extraction but cannot be parsed does.
pub fn prepare_data(content: &str, years: &YearFilter) -> Result<PreparedData> {
    let mut prepared = PreparedData::default();

    for (index, line) in raw_lines(content).enumerate() {
        let line_number = index + 1;
        match extract_line(line) {
            Ok(LineOutcome::Parsed(parsed)) => {
                let enriched = enrich(&parsed)?;
                if years.accepts(enriched.year) {
                    prepared.records.push(enriched);
                } else {
                    prepared.filtered.push(enriched);
                }
            }
            Ok(LineOutcome::Skipped(reason)) => {
                debug!(line_number, %reason, "Skipped line");
                prepared.skipped += 1;
            }
            Err(err) => {
                warn!(line_number, error = %err, "Unparsable line");
                prepared.errors.push(format!("line {line_number}: {err}"));
            }
        }
    }

    let summary = prepared.summary();
    info!(
        accepted = summary.accepted,
        filtered = summary.filtered,
        errors = summary.errors,
        skipped = summary.skipped,
        "Prepared ticket data"
    );
    Ok(prepared)
}

pub fn prepare_file(path: &Path, years: &YearFilter) -> Result<PreparedData> {
    info!(path = %path.display(), "Reading receipt log");
    let content = fs::read_to_string(path)?;
    prepare_data(&content, years)
}
