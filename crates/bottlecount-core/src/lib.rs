pub mod aggregates;
pub mod config;
pub mod enrich;
pub mod error;
pub mod filters;
pub mod locale;
pub mod pipeline;
pub mod report;
pub mod sinks;

pub use aggregates::{Aggregates, DonationBreakdown};
pub use config::ReportConfig;
pub use enrich::{enrich, EnrichedRecord};
pub use error::{PipelineError, Result};
pub use filters::{filter_dates, filter_trials};
pub use pipeline::{prepare_data, prepare_file, PreparedData, YearFilter};
pub use report::{build_report, Cell, Report, Section};
pub use sinks::{CsvSink, ReportSink, TableSink, XlsxSink};
