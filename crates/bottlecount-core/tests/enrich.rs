use bottlecount_core::{enrich, PipelineError};
use bottlecount_parser::{extract_line, ParsedRecord};
use chrono::NaiveDate;

fn record(date: &str) -> ParsedRecord {
    ParsedRecord {
        date: date.to_string(),
        numero: 1,
        count: 2,
        amount: 20,
        donation: false,
    }
}

#[test]
fn enriches_calendar_fields_from_extracted_line() {
    let parsed = extract_line("2017-03-05_14:30:00.123  No 1001 Cnt 3 Amount 30 \n")
        .expect("line parses")
        .into_record()
        .expect("line is a ticket");

    let enriched = enrich(&parsed).expect("enrich failed");

    assert_eq!(enriched.year, 2017);
    assert_eq!(enriched.month, 3);
    assert_eq!(enriched.day, 5);
    assert_eq!(enriched.hour, 14);
    assert_eq!(enriched.minute, 30);
    assert_eq!(enriched.weekday, 6);
    assert_eq!(enriched.month_name, "mars");
    assert_eq!(enriched.weekday_name, "dimanche");
    assert_eq!(
        enriched.datetime,
        NaiveDate::from_ymd_opt(2017, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    );
    assert_eq!(enriched.record, parsed);
}

#[test]
fn weekday_counts_from_monday() {
    let enriched = enrich(&record("2017-01-02_08:15:42")).unwrap();
    assert_eq!(enriched.weekday, 0);
    assert_eq!(enriched.weekday_name, "lundi");
    assert_eq!(enriched.month_name, "janvier");
}

#[test]
fn enrichment_is_idempotent() {
    let first = enrich(&record("2017-12-31_23:59:59")).unwrap();
    let second = enrich(&first.record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn impossible_calendar_date_is_malformed() {
    let err = enrich(&record("2017-02-30_10:00:00")).unwrap_err();
    match err {
        PipelineError::MalformedTimestamp { date, .. } => assert_eq!(date, "2017-02-30_10:00:00"),
        other => panic!("expected MalformedTimestamp, got {other:?}"),
    }
}
