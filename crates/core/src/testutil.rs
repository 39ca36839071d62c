//! Shared fixtures for unit tests.

use chrono::{DateTime, Utc};

use crate::mapping::format_bundle_label;
use crate::model::{Item, Owner};

pub fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

/// Build a projection item with sensible defaults; tests mutate the fields
/// they care about.
pub fn item(unit_id: &str, bundle_id: &str, slot_code: &str, name: &str, expiry: &str) -> Item {
    let label = format_bundle_label(slot_code, 1);
    let display_code = format!("{label}-01");
    Item {
        id: display_code.clone(),
        bundle_id: bundle_id.into(),
        unit_id: unit_id.into(),
        slot_id: Some(format!("slot-{slot_code}")),
        slot_code: slot_code.into(),
        label_no: 1,
        seq_no: 1,
        display_code,
        bundle_label_display: label,
        bundle_name: "Groceries".into(),
        name: name.into(),
        expiry: expiry.into(),
        memo: None,
        bundle_memo: None,
        quantity: Some(1),
        owner: Owner::Other,
        owner_user_id: None,
        priority: None,
        created_at: ts("2026-08-01T09:00:00Z"),
        updated_at: ts("2026-08-01T09:00:00Z"),
        removed_at: None,
    }
}
