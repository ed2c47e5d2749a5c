use std::io::Write;

use comfy_table::Table;

use super::ReportSink;
use crate::error::Result;
use crate::report::{Report, RECORDS_SECTION};

/// Prints sections as text tables, one after another.
pub struct TableSink<W: Write> {
    out: W,
    include_records: bool,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            include_records: true,
        }
    }

    /// The per-ticket section can be long; leave it out for summaries.
    pub fn with_records(mut self, include_records: bool) -> Self {
        self.include_records = include_records;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TableSink<W> {
    fn write(&mut self, report: &Report) -> Result<()> {
        for section in &report.sections {
            if section.key == RECORDS_SECTION && !self.include_records {
                continue;
            }

            let mut table = Table::new();
            table.set_header(section.columns.iter().copied());
            for row in &section.rows {
                table.add_row(row.iter().map(ToString::to_string));
            }
            writeln!(self.out, "{}", section.title)?;
            writeln!(self.out, "{table}")?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
