//! Derived metrics over the inventory document.
//!
//! Every function here is a pure transformation of a read-only snapshot:
//! deterministic given `(items, records, as_of)`, free of side effects, and
//! safe to recompute from scratch on every redraw. Nothing reads a clock or
//! shared state — the caller supplies the snapshot and the reference time
//! explicitly.

use crate::constants::{DEPLETION_ALERT_DAYS, EXPIRY_WINDOW_DAYS};
use crate::model::{InventoryItem, ItemStatus, UsageRecord};
use chrono::{DateTime, Duration, Utc};
use medtrack_types::NonEmptyText;
use std::collections::HashMap;

/// Classifies an item's stock level against its reorder threshold.
///
/// Critical when `quantity <= threshold` (which covers empty stock), warning
/// when `quantity <= threshold * 2`, good otherwise. Boundaries always
/// resolve to the more severe class.
pub fn status_of(item: &InventoryItem) -> ItemStatus {
    if item.quantity <= item.threshold {
        return ItemStatus::Critical;
    }
    if item.quantity <= item.threshold.saturating_mul(2) {
        return ItemStatus::Warning;
    }
    ItemStatus::Good
}

/// Items at or below their reorder threshold.
pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items
        .iter()
        .filter(|item| item.quantity <= item.threshold)
        .collect()
}

/// Items whose expiry date falls within the next 30 days.
///
/// Already-expired stock (day difference <= 0) is excluded here; it
/// surfaces through the stock alerts instead of this one.
pub fn expiring_soon(items: &[InventoryItem], as_of: DateTime<Utc>) -> Vec<&InventoryItem> {
    let today = as_of.date_naive();
    items
        .iter()
        .filter(|item| {
            item.expiry_date.map_or(false, |expiry| {
                let days = expiry.signed_duration_since(today).num_days();
                days > 0 && days <= EXPIRY_WINDOW_DAYS
            })
        })
        .collect()
}

/// Linear projection of days remaining for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepletionEstimate {
    pub item_id: u32,
    pub name: NonEmptyText,
    /// Whole days of stock left at the current usage rate.
    pub days_left: i64,
}

fn estimate(item: &InventoryItem) -> DepletionEstimate {
    DepletionEstimate {
        item_id: item.id,
        name: item.name.clone(),
        days_left: (f64::from(item.quantity) / item.usage_rate).floor() as i64,
    }
}

/// Days-until-depletion for every item with a usage rate, soonest first.
///
/// This is a simple linear-exhaustion model; it does not account for
/// variable consumption. Items without a usage rate are omitted — zero rate
/// means "never depletes" under this model.
pub fn depletion_forecast(items: &[InventoryItem]) -> Vec<DepletionEstimate> {
    let mut forecast: Vec<DepletionEstimate> = items
        .iter()
        .filter(|item| item.usage_rate > 0.0)
        .map(estimate)
        .collect();
    forecast.sort_by_key(|entry| (entry.days_left, entry.item_id));
    forecast
}

/// Forecast entries close enough to depletion to act on, soonest first.
///
/// Covers items projected to run out within 14 days that the threshold rule
/// has not already flagged (`quantity > threshold`), so the two alert sets
/// stay disjoint.
pub fn depletion_alerts(items: &[InventoryItem]) -> Vec<DepletionEstimate> {
    let mut alerts: Vec<DepletionEstimate> = items
        .iter()
        .filter(|item| item.usage_rate > 0.0 && item.quantity > item.threshold)
        .map(estimate)
        .filter(|entry| entry.days_left <= DEPLETION_ALERT_DAYS)
        .collect();
    alerts.sort_by_key(|entry| (entry.days_left, entry.item_id));
    alerts
}

/// Aggregate consumption of one item over a trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageTotal {
    pub item_id: u32,
    /// Denormalized name from the first record contributing to the total.
    pub item_name: NonEmptyText,
    pub total: u64,
}

/// Sums usage per item over the trailing window, heaviest first.
///
/// Records dated before `as_of - window_days` are ignored. Ties are broken
/// by item id for a deterministic order.
pub fn usage_totals(
    records: &[UsageRecord],
    window_days: i64,
    as_of: DateTime<Utc>,
) -> Vec<UsageTotal> {
    let window_start = as_of - Duration::days(window_days);

    let mut totals: HashMap<u32, UsageTotal> = HashMap::new();
    for record in records {
        if record.date < window_start {
            continue;
        }
        totals
            .entry(record.item_id)
            .or_insert_with(|| UsageTotal {
                item_id: record.item_id,
                item_name: record.item_name.clone(),
                total: 0,
            })
            .total += u64::from(record.quantity);
    }

    let mut totals: Vec<UsageTotal> = totals.into_values().collect();
    totals.sort_by_key(|entry| (std::cmp::Reverse(entry.total), entry.item_id));
    totals
}

/// Total quantity consumed on the same UTC calendar day as `as_of`.
pub fn todays_usage(records: &[UsageRecord], as_of: DateTime<Utc>) -> u64 {
    let today = as_of.date_naive();
    records
        .iter()
        .filter(|record| record.date.date_naive() == today)
        .map(|record| u64::from(record.quantity))
        .sum()
}
