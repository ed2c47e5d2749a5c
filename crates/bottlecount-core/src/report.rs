use std::fmt;

use serde::Serialize;

use crate::aggregates::Aggregates;
use crate::enrich::EnrichedRecord;
use crate::error::{PipelineError, Result};
use crate::locale::{month_name, weekday_name};

pub const RECORDS_SECTION: &str = "records";

pub const RECORD_COLUMNS: [&str; 10] = [
    "date", "numero", "count", "amount", "year", "month", "day", "hour", "minute", "weekday",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => f.write_str(value),
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Cell::Integer)
            .unwrap_or(Cell::Number(value as f64))
    }
}

impl From<u128> for Cell {
    fn from(value: u128) -> Self {
        i64::try_from(value)
            .map(Cell::Integer)
            .unwrap_or(Cell::Number(value as f64))
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::from(value as u64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// Zero-based worksheet position of a section's title cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub row: u32,
    pub col: u16,
}

impl Anchor {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }
}

/// A titled table: title row, column header row, then data rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub key: &'static str,
    pub title: String,
    pub anchor: Anchor,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Section {
    fn new(key: &'static str, title: &str, anchor: Anchor, columns: &[&'static str]) -> Self {
        Self {
            key,
            title: title.to_string(),
            anchor,
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    fn with_row(mut self, row: Vec<Cell>) -> Self {
        self.rows.push(row);
        self
    }

    fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<Cell>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Rows spanned including title and header.
    pub fn height(&self) -> u32 {
        2 + self.rows.len() as u32
    }

    /// Widest of the header and data rows.
    pub fn width(&self) -> u16 {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.columns.len()))
            .max()
            .unwrap_or(0) as u16
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.key == key)
    }
}

/// Lays out the ticket table and every aggregate.
///
/// Fails with [`PipelineError::EmptyResultSet`] when there is nothing to report.
pub fn build_report(records: &[EnrichedRecord]) -> Result<Report> {
    if records.is_empty() {
        return Err(PipelineError::EmptyResultSet);
    }
    let aggregates = Aggregates::compute(records);
    Ok(layout(records, &aggregates))
}

fn layout(records: &[EnrichedRecord], aggregates: &Aggregates) -> Report {
    let tickets = Section::new(RECORDS_SECTION, "Tickets", Anchor::new(0, 0), &RECORD_COLUMNS)
        .with_rows(records.iter().map(record_row));

    let per_hour = Section::new(
        "bottles_per_hour",
        "Nb bouteilles/heure",
        Anchor::new(0, 11),
        &["heure", "bouteilles"],
    )
    .with_rows(
        aggregates
            .bottles_per_hour
            .iter()
            .map(|(hour, bottles)| vec![Cell::from(*hour), Cell::from(*bottles)]),
    );

    let per_weekday = Section::new(
        "bottles_per_weekday",
        "Nb bouteilles/jour semaine",
        Anchor::new(0, 14),
        &["jour", "bouteilles"],
    )
    .with_rows(
        aggregates
            .bottles_per_weekday
            .iter()
            .map(|(weekday, bottles)| vec![weekday_name(*weekday).into(), Cell::from(*bottles)]),
    );

    let per_month = Section::new(
        "bottles_per_month",
        "Nb bouteilles/mois",
        Anchor::new(0, 17),
        &["mois", "bouteilles"],
    )
    .with_rows(
        aggregates
            .bottles_per_month
            .iter()
            .map(|(month, bottles)| vec![month_name(*month).into(), Cell::from(*bottles)]),
    );

    let amount_per_month = Section::new(
        "amount_per_month",
        "Montant/mois",
        Anchor::new(0, 20),
        &["mois", "montant"],
    )
    .with_rows(
        aggregates
            .amount_per_month
            .iter()
            .map(|(month, amount)| vec![month_name(*month).into(), Cell::from(*amount)]),
    );

    let totals = Section::new("totals", "Totaux", Anchor::new(0, 23), &["indicateur", "valeur"])
        .with_row(vec!["Nb bouteilles total".into(), aggregates.bottles_total.into()])
        .with_row(vec!["Montant total Bons".into(), aggregates.amount_total.into()])
        .with_row(vec!["Nb total bons emis".into(), aggregates.ticket_count.into()]);

    let average = Section::new(
        "average_amount_per_month",
        "Moyenne des bons/mois",
        Anchor::new(6, 23),
        &["mois", "moyenne ct"],
    )
    .with_rows(
        aggregates
            .average_amount_per_month
            .iter()
            .map(|(month, average)| vec![month_name(*month).into(), Cell::from(*average)]),
    );

    let ranges = Section::new(
        "tickets_per_amount_range",
        "Montant ct / Nb Bons",
        Anchor::new(0, 26),
        &["tranche", "bons"],
    )
    .with_rows(
        aggregates
            .tickets_per_amount_range
            .iter()
            .map(|(label, tickets)| vec![Cell::from(*label), Cell::from(*tickets)]),
    );

    let donations = &aggregates.donations;
    let ratio = Section::new(
        "donations",
        "Ratio Don vs Total",
        Anchor::new(0, 29),
        &["indicateur", "valeur"],
    )
    .with_row(vec!["Nombre de dons".into(), donations.count_donation.into()])
    .with_row(vec!["Nombre de bons".into(), donations.count_coupon.into()])
    .with_row(vec!["Montant des dons".into(), donations.amount_donation.into()])
    .with_row(vec!["Montant des bons".into(), donations.amount_coupon.into()])
    .with_row(vec![
        "Pourcentage en valeur %".into(),
        donations.value_percent.clone().into(),
    ])
    .with_row(vec![
        "Pourcentage en volume %".into(),
        donations.volume_percent.clone().into(),
    ]);

    Report {
        sections: vec![
            tickets,
            per_hour,
            per_weekday,
            per_month,
            amount_per_month,
            totals,
            average,
            ranges,
            ratio,
        ],
    }
}

fn record_row(record: &EnrichedRecord) -> Vec<Cell> {
    vec![
        record.record.date.as_str().into(),
        record.record.numero.into(),
        record.count().into(),
        record.amount().into(),
        record.year.into(),
        record.month_name.into(),
        record.day.into(),
        record.hour.into(),
        record.minute.into(),
        record.weekday_name.into(),
    ]
}
