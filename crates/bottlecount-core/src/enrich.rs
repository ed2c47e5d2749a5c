use bottlecount_parser::ParsedRecord;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::config::TIMESTAMP_FORMAT;
use crate::error::{PipelineError, Result};
use crate::locale::{month_name, weekday_name};

/// A parsed ticket with the calendar fields the report groups on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ParsedRecord,
    pub datetime: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// ISO numbering, Monday = 0.
    pub weekday: u32,
    pub month_name: &'static str,
    pub weekday_name: &'static str,
}

impl EnrichedRecord {
    pub fn count(&self) -> u64 {
        self.record.count
    }

    pub fn amount(&self) -> u64 {
        self.record.amount
    }

    pub fn is_donation(&self) -> bool {
        self.record.donation
    }
}

pub fn enrich(record: &ParsedRecord) -> Result<EnrichedRecord> {
    let datetime = NaiveDateTime::parse_from_str(&record.date, TIMESTAMP_FORMAT).map_err(
        |source| PipelineError::MalformedTimestamp {
            date: record.date.clone(),
            source,
        },
    )?;
    let weekday = datetime.weekday().num_days_from_monday();

    Ok(EnrichedRecord {
        record: record.clone(),
        datetime,
        year: datetime.year(),
        month: datetime.month(),
        day: datetime.day(),
        hour: datetime.hour(),
        minute: datetime.minute(),
        weekday,
        month_name: month_name(datetime.month()),
        weekday_name: weekday_name(weekday),
    })
}
