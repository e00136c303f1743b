//! Constants used throughout the inventory core crate.
//!
//! This module contains the storage key and the alert windows so that the
//! thresholds used by the derived metrics stay consistent across the codebase.

/// Storage key under which the whole inventory document is persisted.
pub const STORAGE_KEY: &str = "medtrack-data";

/// Expiry alerts cover items whose expiry date falls within this many days.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Depletion alerts fire once the projected days of stock remaining drop to
/// this horizon.
pub const DEPLETION_ALERT_DAYS: i64 = 14;

/// Default trailing window, in days, for usage aggregation.
pub const USAGE_WINDOW_DAYS: i64 = 30;
