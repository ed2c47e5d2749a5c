//! Renderers for a laid-out [`Report`](crate::report::Report).

mod csv_dir;
mod terminal;
mod workbook;

pub use csv_dir::CsvSink;
pub use terminal::TableSink;
pub use workbook::XlsxSink;

use crate::error::Result;
use crate::report::Report;

pub trait ReportSink {
    fn write(&mut self, report: &Report) -> Result<()>;
}
