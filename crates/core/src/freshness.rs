//! Freshness classification of items from their expiry dates.
//!
//! Expiry dates are calendar dates with no time component. All arithmetic
//! happens on whole days against a caller-supplied "today" so the result
//! is deterministic in tests and immune to the off-by-one drift that
//! comparing full timestamps near midnight produces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Item;

// ---------------------------------------------------------------------------
// Threshold configuration
// ---------------------------------------------------------------------------

/// Default number of days (inclusive) within which an item counts as
/// expiring soon.
pub const DEFAULT_EXPIRING_WITHIN_DAYS: i64 = 3;

/// Single source of truth for the expiring-soon window.
///
/// Call sites inject this instead of hard-coding their own day counts, so
/// the inventory list, dashboard widgets, and notifications all agree on
/// what "expiring" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Items with `0 <= days_left <= expiring_within_days` are `Expiring`.
    pub expiring_within_days: i64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Freshness classification of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessStatus {
    Ok,
    Expiring,
    Expired,
}

impl FreshnessStatus {
    /// Stable string key for aggregation maps and UI badges.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
        }
    }
}

// ---------------------------------------------------------------------------
// Day arithmetic
// ---------------------------------------------------------------------------

/// Parse an expiry string into a calendar date.
///
/// Accepts plain `YYYY-MM-DD` values as well as datetime strings, from
/// which only the date part is taken. Returns `None` for anything that
/// does not start with a valid ISO date.
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Whole-day difference between an expiry date and `today`.
///
/// Negative when the date has passed, zero when it is today. `None` when
/// the expiry string is malformed.
pub fn days_left(expiry: &str, today: NaiveDate) -> Option<i64> {
    let date = parse_expiry_date(expiry)?;
    Some((date - today).num_days())
}

/// Smallest days-left across a group of items, skipping malformed dates.
///
/// `None` when the group is empty or no date in it parses.
pub fn earliest_days(items: &[Item], today: NaiveDate) -> Option<i64> {
    items
        .iter()
        .filter_map(|item| days_left(&item.expiry, today))
        .min()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify an expiry date relative to `today`.
///
/// `Expired` strictly before today; `Expiring` from today through the
/// configured window (day 0 is always `Expiring`, never `Expired`);
/// `Ok` beyond it. A malformed date is logged and classified `Ok` --
/// degraded display beats propagating an unparseable value into
/// comparisons.
pub fn resolve_status(expiry: &str, today: NaiveDate, config: &FreshnessConfig) -> FreshnessStatus {
    let Some(days) = days_left(expiry, today) else {
        tracing::warn!(expiry, "Unparseable expiry date -- classifying item as ok");
        return FreshnessStatus::Ok;
    };

    if days < 0 {
        FreshnessStatus::Expired
    } else if days <= config.expiring_within_days {
        FreshnessStatus::Expiring
    } else {
        FreshnessStatus::Ok
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
