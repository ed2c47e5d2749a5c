use std::path::PathBuf;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use super::ReportSink;
use crate::error::Result;
use crate::report::{Cell, Report, Section};

/// Writes every section onto a single worksheet at its anchor.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for XlsxSink {
    fn write(&mut self, report: &Report) -> Result<()> {
        let mut workbook = Workbook::new();
        let title_format = Format::new().set_bold();
        let header_format = Format::new().set_italic();

        let worksheet = workbook.add_worksheet();
        for section in &report.sections {
            write_section(worksheet, section, &title_format, &header_format)?;
        }

        workbook.save(&self.path)?;
        info!(
            path = %self.path.display(),
            sections = report.sections.len(),
            "Wrote report workbook"
        );
        Ok(())
    }
}

fn write_section(
    worksheet: &mut Worksheet,
    section: &Section,
    title_format: &Format,
    header_format: &Format,
) -> Result<()> {
    let row = section.anchor.row;
    let col = section.anchor.col;

    worksheet.write_string_with_format(row, col, section.title.as_str(), title_format)?;
    for (offset, column) in section.columns.iter().enumerate() {
        worksheet.write_string_with_format(row + 1, col + offset as u16, *column, header_format)?;
    }

    for (row_offset, cells) in section.rows.iter().enumerate() {
        let target_row = row + 2 + row_offset as u32;
        for (col_offset, cell) in cells.iter().enumerate() {
            write_cell(worksheet, target_row, col + col_offset as u16, cell)?;
        }
    }
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Text(value) => {
            worksheet.write_string(row, col, value.as_str())?;
        }
        Cell::Integer(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
    }
    Ok(())
}
