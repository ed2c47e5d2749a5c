use std::fmt;

use serde::Serialize;

/// One ticket as printed by the machine. `date` keeps second precision,
/// `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    pub date: String,
    pub numero: u64,
    pub count: u64,
    pub amount: u64,
    pub donation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Header,
    Empty,
    Useless,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Header => "header",
            SkipReason::Empty => "empty",
            SkipReason::Useless => "useless",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(ParsedRecord),
    Skipped(SkipReason),
}

impl LineOutcome {
    pub fn into_record(self) -> Option<ParsedRecord> {
        match self {
            LineOutcome::Parsed(record) => Some(record),
            LineOutcome::Skipped(_) => None,
        }
    }
}
