//! Reductions over a ticket set. Every function accepts an empty slice and
//! returns an empty map or zero for it.
//!
//! Bottle and cent sums accumulate in `u128`: a single ticket may carry any
//! `u64`, so two of them can already exceed `u64::MAX`.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::Serialize;

use crate::enrich::EnrichedRecord;

const CENTS_PER_UNIT: f64 = 100.0;

/// A histogram bucket over ticket amounts in cents, `low < amount <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub label: &'static str,
    pub low: u64,
    pub high: u64,
}

impl AmountRange {
    pub fn contains(&self, amount: u64) -> bool {
        self.low < amount && amount <= self.high
    }
}

pub const AMOUNT_RANGES: [AmountRange; 5] = [
    AmountRange { label: "1-20 ct", low: 0, high: 20 },
    AmountRange { label: "21-40 ct", low: 20, high: 40 },
    AmountRange { label: "41-60 ct", low: 40, high: 60 },
    AmountRange { label: "61-80 ct", low: 60, high: 80 },
    AmountRange { label: "81-100 ct", low: 80, high: 100 },
];

fn sum_by<K, T, F, V>(records: &[EnrichedRecord], key: F, value: V) -> BTreeMap<K, T>
where
    K: Ord,
    T: AddAssign + Default,
    F: Fn(&EnrichedRecord) -> K,
    V: Fn(&EnrichedRecord) -> T,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert_with(T::default) += value(record);
    }
    totals
}

fn bottles(record: &EnrichedRecord) -> u128 {
    u128::from(record.count())
}

fn cents(record: &EnrichedRecord) -> u128 {
    u128::from(record.amount())
}

fn to_units(cents: u128) -> f64 {
    cents as f64 / CENTS_PER_UNIT
}

pub fn bottles_per_hour(records: &[EnrichedRecord]) -> BTreeMap<u32, u128> {
    sum_by(records, |record| record.hour, bottles)
}

pub fn bottles_per_weekday(records: &[EnrichedRecord]) -> BTreeMap<u32, u128> {
    sum_by(records, |record| record.weekday, bottles)
}

pub fn bottles_per_month(records: &[EnrichedRecord]) -> BTreeMap<u32, u128> {
    sum_by(records, |record| record.month, bottles)
}

/// Amount per month in currency units.
pub fn amount_per_month(records: &[EnrichedRecord]) -> BTreeMap<u32, f64> {
    sum_by(records, |record| record.month, cents)
        .into_iter()
        .map(|(month, cents)| (month, to_units(cents)))
        .collect()
}

pub fn bottles_total(records: &[EnrichedRecord]) -> u128 {
    records.iter().map(bottles).sum()
}

/// Total amount in currency units.
pub fn amount_total(records: &[EnrichedRecord]) -> f64 {
    to_units(records.iter().map(cents).sum())
}

pub fn ticket_count(records: &[EnrichedRecord]) -> usize {
    records.len()
}

/// Mean ticket amount per month in cents, rounded half away from zero.
pub fn average_amount_per_month(records: &[EnrichedRecord]) -> BTreeMap<u32, u64> {
    let mut buckets: BTreeMap<u32, (u128, u128)> = BTreeMap::new();
    for record in records {
        let (sum, tickets) = buckets.entry(record.month).or_insert((0, 0));
        *sum += cents(record);
        *tickets += 1;
    }
    buckets
        .into_iter()
        .map(|(month, (sum, tickets))| (month, rounded_mean(sum, tickets)))
        .collect()
}

// floor(sum / n + 1/2), exact for non-negative integers. The mean of u64
// amounts rounds to at most u64::MAX.
fn rounded_mean(sum: u128, tickets: u128) -> u64 {
    ((2 * sum + tickets) / (2 * tickets)) as u64
}

pub fn tickets_per_amount(records: &[EnrichedRecord]) -> BTreeMap<u64, u64> {
    sum_by(records, EnrichedRecord::amount, |_| 1u64)
}

/// Ticket counts over [`AMOUNT_RANGES`]. Every bucket is present; amounts of
/// zero or above 100 cents are not counted anywhere.
pub fn tickets_per_amount_range(records: &[EnrichedRecord]) -> BTreeMap<&'static str, u64> {
    let mut result: BTreeMap<&'static str, u64> =
        AMOUNT_RANGES.iter().map(|range| (range.label, 0)).collect();
    for (amount, tickets) in tickets_per_amount(records) {
        if let Some(range) = AMOUNT_RANGES.iter().find(|range| range.contains(amount)) {
            *result.entry(range.label).or_insert(0) += tickets;
        }
    }
    result
}

/// Donation tickets against coupon tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationBreakdown {
    pub count_donation: u64,
    pub count_coupon: u64,
    pub amount_donation: f64,
    pub amount_coupon: f64,
    /// Share of the total amount given as donations, two decimals.
    pub value_percent: String,
    /// Share of tickets that are donations, two decimals.
    pub volume_percent: String,
}

pub fn donation_breakdown(records: &[EnrichedRecord]) -> DonationBreakdown {
    let mut count_donation: u64 = 0;
    let mut count_coupon: u64 = 0;
    let mut cents_donation: u128 = 0;
    let mut cents_coupon: u128 = 0;
    for record in records {
        if record.is_donation() {
            count_donation += 1;
            cents_donation += cents(record);
        } else {
            count_coupon += 1;
            cents_coupon += cents(record);
        }
    }

    DonationBreakdown {
        count_donation,
        count_coupon,
        amount_donation: to_units(cents_donation),
        amount_coupon: to_units(cents_coupon),
        value_percent: percent(cents_donation, cents_donation + cents_coupon),
        volume_percent: percent(
            u128::from(count_donation),
            u128::from(count_donation) + u128::from(count_coupon),
        ),
    }
}

fn percent(part: u128, total: u128) -> String {
    if total == 0 {
        return format!("{:.2}", 0.0);
    }
    format!("{:.2}", part as f64 / total as f64 * 100.0)
}

/// Every aggregate the report shows, computed over the same ticket set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub bottles_per_hour: BTreeMap<u32, u128>,
    pub bottles_per_weekday: BTreeMap<u32, u128>,
    pub bottles_per_month: BTreeMap<u32, u128>,
    pub amount_per_month: BTreeMap<u32, f64>,
    pub bottles_total: u128,
    pub amount_total: f64,
    pub ticket_count: usize,
    pub average_amount_per_month: BTreeMap<u32, u64>,
    pub tickets_per_amount_range: BTreeMap<&'static str, u64>,
    pub donations: DonationBreakdown,
}

impl Aggregates {
    pub fn compute(records: &[EnrichedRecord]) -> Self {
        Self {
            bottles_per_hour: bottles_per_hour(records),
            bottles_per_weekday: bottles_per_weekday(records),
            bottles_per_month: bottles_per_month(records),
            amount_per_month: amount_per_month(records),
            bottles_total: bottles_total(records),
            amount_total: amount_total(records),
            ticket_count: ticket_count(records),
            average_amount_per_month: average_amount_per_month(records),
            tickets_per_amount_range: tickets_per_amount_range(records),
            donations: donation_breakdown(records),
        }
    }
}
