use chrono::NaiveDateTime;

use crate::enrich::EnrichedRecord;

/// Keeps tickets stamped within `[start, end]`, both bounds inclusive.
pub fn filter_dates(
    records: &[EnrichedRecord],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<EnrichedRecord> {
    records
        .iter()
        .filter(|record| record.datetime >= start && record.datetime <= end)
        .cloned()
        .collect()
}

/// Drops zero-amount tickets, which the machines print for test runs.
pub fn filter_trials(records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
    records
        .iter()
        .filter(|record| record.amount() != 0)
        .cloned()
        .collect()
}
