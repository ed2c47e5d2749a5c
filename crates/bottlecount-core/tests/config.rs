use std::fs;

use bottlecount_core::config::{parse_start_date, parse_timestamp};
use bottlecount_core::{PipelineError, ReportConfig};
use chrono::NaiveDate;

#[test]
fn defaults_cover_2017() {
    let config = ReportConfig::default();

    assert_eq!(config.accepted_years, vec![2017]);
    assert!(config.year_filter().accepts(2017));
    assert!(!config.year_filter().accepts(2018));
    assert_eq!(
        config.default_start().unwrap(),
        NaiveDate::from_ymd_opt(2017, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert_eq!(
        config.period_end().unwrap(),
        NaiveDate::from_ymd_opt(2017, 12, 31).unwrap().and_hms_opt(23, 59, 59).unwrap()
    );
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = ReportConfig::from_toml_str(
        r#"
            accepted_years = [2018]
            period_end = "2018-12-31_23:59:59"
        "#,
    )
    .expect("config should parse");

    assert_eq!(config.accepted_years, vec![2018]);
    assert_eq!(config.period_end, "2018-12-31_23:59:59");
    assert_eq!(config.default_start, "2017-01-01");
}

#[test]
fn empty_year_list_is_rejected() {
    let err = ReportConfig::from_toml_str("accepted_years = []").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ReportConfig::from_toml_str("acepted_years = [2017]").unwrap_err();
    assert!(matches!(err, PipelineError::Toml(_)));
}

#[test]
fn bad_period_end_is_rejected() {
    let err = ReportConfig::from_toml_str(r#"period_end = "2017-12-31 23:59:59""#).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidDate { .. }));
}

#[test]
fn start_after_end_is_rejected() {
    let err = ReportConfig::from_toml_str(r#"default_start = "2018-01-01""#).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn start_date_is_midnight() {
    let start = parse_start_date("2017-06-15").unwrap();
    assert_eq!(
        start,
        NaiveDate::from_ymd_opt(2017, 6, 15).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert!(parse_start_date("15/06/2017").is_err());
    assert!(parse_timestamp("2017-06-15_25:00:00").is_err());
}

#[test]
fn load_reads_file_and_resolve_prefers_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bottlecount.toml");
    fs::write(&path, "accepted_years = [2016, 2017]\n").unwrap();

    let config = ReportConfig::load(&path).unwrap();
    assert_eq!(config.accepted_years, vec![2016, 2017]);

    let resolved = ReportConfig::resolve(Some(path.as_path())).unwrap();
    assert_eq!(resolved, config);

    let err = ReportConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}
