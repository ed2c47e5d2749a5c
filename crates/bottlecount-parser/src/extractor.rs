use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Field, ParserError};
use crate::model::{LineOutcome, ParsedRecord, SkipReason};

const HEADER_MARKERS: [&str; 2] = ["Container", "Receipts from"];
const USELESS_MARKER: &str = "BIN";

// `\s` also matches the line terminator, so lines are matched with it attached.
// `(?-u)` keeps `\s` to ASCII whitespace; U+00A0 and friends do not separate fields.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4}-[0-9]{2}-[0-9]{2}_[0-9]{2}:[0-9]{2}:[0-9]{2})\.[0-9]{3}")
        .expect("date pattern compiles")
});
static NUMERO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)\s\sNo\s([0-9]+)\s").expect("numero pattern compiles"));
static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)\sCnt\s([0-9]+)\s").expect("count pattern compiles"));
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)\sAmount\s([0-9]+)\s").expect("amount pattern compiles"));
static DONATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)BC\s\|\|").expect("donation pattern compiles"));

/// Splits a receipt log into lines, keeping each line's terminator.
pub fn raw_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split_inclusive('\n')
}

/// Returns why a line carries no ticket, or `None` if it should be extracted.
pub fn skip_reason(line: &str) -> Option<SkipReason> {
    if HEADER_MARKERS.iter().any(|marker| line.contains(marker)) {
        return Some(SkipReason::Header);
    }
    if matches!(line, "" | "\n" | "\r\n") {
        return Some(SkipReason::Empty);
    }
    if line.contains(USELESS_MARKER) {
        return Some(SkipReason::Useless);
    }
    None
}

/// Extracts one ticket from a raw line.
///
/// Header, empty and `BIN` lines come back as [`LineOutcome::Skipped`]. Every
/// other line must carry a timestamp, a ticket number, a bottle count and an
/// amount; the first one missing is reported in [`ParserError::UnparsableLine`].
pub fn extract_line(line: &str) -> Result<LineOutcome, ParserError> {
    if let Some(reason) = skip_reason(line) {
        return Ok(LineOutcome::Skipped(reason));
    }

    let record = ParsedRecord {
        date: extract_date(line)?,
        numero: extract_number(&NUMERO_PATTERN, Field::Numero, line)?,
        count: extract_number(&COUNT_PATTERN, Field::Count, line)?,
        amount: extract_number(&AMOUNT_PATTERN, Field::Amount, line)?,
        donation: DONATION_PATTERN.is_match(line),
    };
    Ok(LineOutcome::Parsed(record))
}

fn extract_date(line: &str) -> Result<String, ParserError> {
    DATE_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParserError::unparsable(Field::Date, line))
}

fn extract_number(pattern: &Regex, field: Field, line: &str) -> Result<u64, ParserError> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(|| ParserError::unparsable(field, line))
}
