//! Filtering and sorting of the denormalized item projection.
//!
//! The pipeline narrows the working set in a fixed order: tab predicate,
//! slot match, free-text search, then the independent my-only toggle,
//! and finally sorts. Everything is pure and total -- an empty result is
//! a valid result, never an error.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::freshness::{parse_expiry_date, resolve_status, FreshnessConfig, FreshnessStatus};
use crate::model::{Item, Owner};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Which inventory tab is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Mine,
    Expiring,
    Expired,
}

/// Sort key for the item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Expiry,
    Name,
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter configuration as the UI submits it.
///
/// `my_only` is deliberately independent from `Tab::Mine`: both are
/// AND-ed, neither overrides the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub tab: Tab,
    pub slot_code: Option<String>,
    pub slot_id: Option<String>,
    pub search_query: Option<String>,
    pub my_only: bool,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Apply `filters` to `items` and return the sorted subset.
///
/// Free-text search has bundle-level visibility: when the query matches a
/// unit's bundle label, bundle name, or unit name, *all* items of that
/// bundle are retained, not just the matching unit. The input is never
/// mutated; output order is the sort order (or input order before the
/// sort stage touches ties -- the sort is stable).
pub fn filter_items(
    items: &[Item],
    filters: &FilterOptions,
    today: NaiveDate,
    config: &FreshnessConfig,
) -> Vec<Item> {
    let query = filters
        .search_query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let matches_base = |item: &Item| {
        if let Some(code) = filters.slot_code.as_deref() {
            if item.slot_code != code {
                return false;
            }
        }
        if let Some(slot_id) = filters.slot_id.as_deref() {
            if item.slot_id.as_deref() != Some(slot_id) {
                return false;
            }
        }

        match filters.tab {
            Tab::All => {}
            Tab::Mine => {
                if item.owner != Owner::Me {
                    return false;
                }
            }
            Tab::Expiring => {
                if resolve_status(&item.expiry, today, config) != FreshnessStatus::Expiring {
                    return false;
                }
            }
            Tab::Expired => {
                if resolve_status(&item.expiry, today, config) != FreshnessStatus::Expired {
                    return false;
                }
            }
        }

        if filters.my_only && item.owner != Owner::Me {
            return false;
        }
        true
    };

    // First pass: base predicates, while collecting the bundles the free-text
    // query hits so sibling units stay visible in the second pass.
    let mut preliminary: Vec<&Item> = Vec::new();
    let mut matched_bundles: HashSet<&str> = HashSet::new();

    for item in items {
        if !matches_base(item) {
            continue;
        }
        preliminary.push(item);

        if let Some(query) = &query {
            let haystack = format!(
                "{} {} {}",
                item.bundle_label_display, item.bundle_name, item.name
            )
            .to_lowercase();
            if haystack.contains(query.as_str()) {
                matched_bundles.insert(item.bundle_id.as_str());
            }
        }
    }

    let mut filtered: Vec<Item> = preliminary
        .into_iter()
        .filter(|item| query.is_none() || matched_bundles.contains(item.bundle_id.as_str()))
        .cloned()
        .collect();

    sort_items(&mut filtered, filters.sort_by, filters.sort_order);
    filtered
}

/// Sort in place by the chosen key.
///
/// Descending order swaps the two operands before comparison instead of
/// negating the result; combined with the stable sort this keeps ties in
/// input order for both directions.
fn sort_items(items: &mut [Item], sort_by: SortBy, sort_order: SortOrder) {
    items.sort_by(|left, right| {
        let (a, b) = match sort_order {
            SortOrder::Asc => (left, right),
            SortOrder::Desc => (right, left),
        };

        match sort_by {
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::Expiry => expiry_sort_key(&a.expiry).cmp(&expiry_sort_key(&b.expiry)),
        }
    });
}

/// Sort key for expiry strings: malformed dates order before everything
/// else rather than poisoning the comparison.
fn expiry_sort_key(expiry: &str) -> NaiveDate {
    parse_expiry_date(expiry).unwrap_or(NaiveDate::MIN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{item, ts};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn config() -> FreshnessConfig {
        FreshnessConfig::default()
    }

    fn run(items: &[Item], filters: &FilterOptions) -> Vec<Item> {
        filter_items(items, filters, today(), &config())
    }

    fn inventory() -> Vec<Item> {
        let mut milk = item("u-1", "b-1", "A2", "Milk", "2026-08-25");
        milk.owner = Owner::Me;
        milk.owner_user_id = Some("user-9".into());

        let mut eggs = item("u-2", "b-1", "A2", "Eggs", "2026-09-10");
        eggs.owner = Owner::Me;
        eggs.owner_user_id = Some("user-9".into());

        let tofu = item("u-3", "b-2", "B1", "Tofu", "2026-08-20");
        let jam = item("u-4", "b-3", "B1", "Jam", "2026-10-01");

        vec![milk, eggs, tofu, jam]
    }

    // -- default pass-through ------------------------------------------------

    #[test]
    fn all_tab_without_query_keeps_everything_in_order() {
        let items = inventory();
        let out = run(&items, &FilterOptions::default());
        // Default sort is expiry asc.
        let ids: Vec<&str> = out.iter().map(|i| i.unit_id.as_str()).collect();
        assert_eq!(ids, ["u-3", "u-1", "u-2", "u-4"]);
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn defaults_are_the_identity_on_presorted_input() {
        let mut items = inventory();
        items.sort_by(|a, b| a.expiry.cmp(&b.expiry));
        let out = run(&items, &FilterOptions::default());
        assert_eq!(out, items);
    }

    #[test]
    fn empty_input_is_a_valid_empty_result() {
        assert!(run(&[], &FilterOptions::default()).is_empty());
    }

    // -- tab predicates ------------------------------------------------------

    #[test]
    fn mine_tab_keeps_only_own_items() {
        let out = run(
            &inventory(),
            &FilterOptions {
                tab: Tab::Mine,
                ..Default::default()
            },
        );
        assert!(out.iter().all(|i| i.owner == Owner::Me));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn expiring_and_expired_tabs_classify_against_today() {
        let expiring = run(
            &inventory(),
            &FilterOptions {
                tab: Tab::Expiring,
                ..Default::default()
            },
        );
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].name, "Milk");

        let expired = run(
            &inventory(),
            &FilterOptions {
                tab: Tab::Expired,
                ..Default::default()
            },
        );
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Tofu");
    }

    // -- slot and ownership filters ------------------------------------------

    #[test]
    fn slot_filter_matches_exactly() {
        let out = run(
            &inventory(),
            &FilterOptions {
                slot_code: Some("B1".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|i| i.slot_code == "B1"));
    }

    #[test]
    fn slot_id_filter_matches_exactly() {
        let out = run(
            &inventory(),
            &FilterOptions {
                slot_id: Some("slot-A2".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn my_only_is_anded_with_the_tab() {
        // Expiring tab + my_only: only my expiring items survive.
        let out = run(
            &inventory(),
            &FilterOptions {
                tab: Tab::Expiring,
                my_only: true,
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Milk");

        let mut items = inventory();
        items[0].owner = Owner::Other;
        let out = filter_items(
            &items,
            &FilterOptions {
                tab: Tab::Expiring,
                my_only: true,
                ..Default::default()
            },
            today(),
            &config(),
        );
        assert!(out.is_empty());
    }

    // -- free-text search ----------------------------------------------------

    #[test]
    fn search_retains_all_sibling_units_of_a_matching_bundle() {
        // "milk" matches only u-1 by name, but u-2 shares bundle b-1 and
        // must stay visible.
        let out = run(
            &inventory(),
            &FilterOptions {
                search_query: Some("milk".into()),
                ..Default::default()
            },
        );
        let ids: Vec<&str> = out.iter().map(|i| i.unit_id.as_str()).collect();
        assert_eq!(ids, ["u-1", "u-2"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_labels() {
        let out = run(
            &inventory(),
            &FilterOptions {
                search_query: Some("  A2-001  ".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 2);

        let out = run(
            &inventory(),
            &FilterOptions {
                search_query: Some("TOFU".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let out = run(
            &inventory(),
            &FilterOptions {
                search_query: Some("   ".into()),
                ..Default::default()
            },
        );
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let out = run(
            &inventory(),
            &FilterOptions {
                search_query: Some("durian".into()),
                ..Default::default()
            },
        );
        assert!(out.is_empty());
    }

    // -- sorting -------------------------------------------------------------

    #[test]
    fn name_sort_swaps_operands_for_descending() {
        // ["B", "A", "A"]: ascending gives [A, A, B], descending gives the
        // original order back because ties keep input order under the
        // operand swap (not a negated comparator).
        let mut items = vec![
            item("u-1", "b-1", "A2", "B", "2026-09-01"),
            item("u-2", "b-1", "A2", "A", "2026-09-01"),
            item("u-3", "b-1", "A2", "A", "2026-09-01"),
        ];
        items[1].created_at = ts("2026-08-02T09:00:00Z");
        items[2].created_at = ts("2026-08-03T09:00:00Z");

        let asc = run(
            &items,
            &FilterOptions {
                sort_by: SortBy::Name,
                sort_order: SortOrder::Asc,
                ..Default::default()
            },
        );
        let names: Vec<&str> = asc.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "A", "B"]);
        // Tied "A"s keep input order.
        assert_eq!(asc[0].unit_id, "u-2");
        assert_eq!(asc[1].unit_id, "u-3");

        let desc = run(
            &items,
            &FilterOptions {
                sort_by: SortBy::Name,
                sort_order: SortOrder::Desc,
                ..Default::default()
            },
        );
        let names: Vec<&str> = desc.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "A"]);
        assert_eq!(desc[1].unit_id, "u-2");
        assert_eq!(desc[2].unit_id, "u-3");
    }

    #[test]
    fn created_at_sort_is_chronological() {
        let mut items = inventory();
        items[3].created_at = ts("2026-07-01T09:00:00Z");

        let out = run(
            &items,
            &FilterOptions {
                sort_by: SortBy::CreatedAt,
                ..Default::default()
            },
        );
        assert_eq!(out[0].unit_id, "u-4");
    }

    #[test]
    fn malformed_expiry_sorts_first_ascending() {
        let mut items = inventory();
        items[1].expiry = "unknown".into();

        let out = run(&items, &FilterOptions::default());
        assert_eq!(out[0].unit_id, "u-2");
    }
}
