use std::fs;
use std::path::PathBuf;

use csv::WriterBuilder;
use tracing::info;

use super::ReportSink;
use crate::error::Result;
use crate::report::Report;

/// Writes each section to `<dir>/<section key>.csv`, header row first.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn section_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.csv"))
    }
}

impl ReportSink for CsvSink {
    fn write(&mut self, report: &Report) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        for section in &report.sections {
            let mut writer = WriterBuilder::new().from_path(self.section_path(section.key))?;
            writer.write_record(&section.columns)?;
            for row in &section.rows {
                writer.write_record(row.iter().map(ToString::to_string))?;
            }
            writer.flush()?;
        }
        info!(dir = %self.dir.display(), sections = report.sections.len(), "Wrote report CSV files");
        Ok(())
    }
}
