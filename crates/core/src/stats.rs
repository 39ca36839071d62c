//! Summary counts for the fridge dashboard widgets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::freshness::{days_left, resolve_status, FreshnessConfig, FreshnessStatus};
use crate::model::{Item, ItemPriority, Owner};

/// Aggregated counts over the item projection.
///
/// The three status counters are always present (zero when empty) so
/// dashboard consumers never have to handle a missing key. `by_slot` and
/// `by_priority` use ordered maps so serialized payloads are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FridgeStats {
    pub total: usize,
    pub mine: usize,
    pub ok: usize,
    pub expiring: usize,
    pub expired: usize,
    pub by_slot: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

/// Single-pass aggregation over `items`. The input is not mutated.
pub fn aggregate(items: &[Item], today: NaiveDate, config: &FreshnessConfig) -> FridgeStats {
    let mut stats = FridgeStats {
        total: items.len(),
        ..Default::default()
    };

    for item in items {
        if item.owner == Owner::Me {
            stats.mine += 1;
        }

        match resolve_status(&item.expiry, today, config) {
            FreshnessStatus::Ok => stats.ok += 1,
            FreshnessStatus::Expiring => stats.expiring += 1,
            FreshnessStatus::Expired => stats.expired += 1,
        }

        *stats.by_slot.entry(item.slot_code.clone()).or_insert(0) += 1;

        let priority = derive_priority(item, today);
        *stats
            .by_priority
            .entry(priority.as_str().to_string())
            .or_insert(0) += 1;
    }

    stats
}

/// Effective priority of an item: the owner's explicit choice, else
/// derived from urgency (due within a day is high, within three medium,
/// otherwise low -- malformed dates count as low).
fn derive_priority(item: &Item, today: NaiveDate) -> ItemPriority {
    if let Some(priority) = item.priority {
        return priority;
    }
    match days_left(&item.expiry, today) {
        Some(days) if days <= 1 => ItemPriority::High,
        Some(days) if days <= 3 => ItemPriority::Medium,
        _ => ItemPriority::Low,
    }
}
