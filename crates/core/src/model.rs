//! Domain entities for the fridge inventory view layer.
//!
//! These are the client-side shapes the UI works with, produced from the
//! wire DTOs in [`crate::dto`] by the mappers in [`crate::mapping`]. Slots
//! are read-only here (admin tooling owns their lifecycle); bundles and
//! units are soft-deleted via `removed_at`, never hard-removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Physical compartment kind of a storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompartmentKind {
    Chilled,
    Frozen,
    RoomTemperature,
}

/// Operational status of a slot. Transitions are driven by the admin
/// backend, never computed in this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Active,
    OutOfService,
}

/// Ownership tag relative to the current viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Me,
    Other,
}

/// Per-item priority as entered by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemPriority {
    Low,
    Medium,
    High,
}

impl ItemPriority {
    /// Stable string key for aggregation maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A physical storage compartment (e.g. one refrigerator shelf section).
///
/// `code` is unique system-wide. `label` is the human display name, falling
/// back to `code` when the admin has not set one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub slot_id: String,
    pub code: String,
    pub label: String,
    pub floor: i32,
    pub floor_code: String,
    pub kind: CompartmentKind,
    pub status: SlotStatus,
    pub temperature: Option<String>,
    pub capacity: Option<i32>,
    pub display_order: Option<i32>,
    pub label_range_start: Option<i32>,
    pub label_range_end: Option<i32>,
    pub is_active: bool,
}

/// A labeled package occupying a slot, owned by zero-or-one resident.
///
/// `label_display` is always populated: either supplied by the backend or
/// derived as `{slot_code}-{label_no:03}` at mapping time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub bundle_id: String,
    pub slot_id: Option<String>,
    pub slot_code: String,
    pub label_no: i32,
    pub label_display: String,
    pub bundle_name: String,
    pub memo: Option<String>,
    pub owner_user_id: Option<String>,
    pub owner_display_name: Option<String>,
    pub owner_room_number: Option<String>,
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

/// One physical item inside a bundle.
///
/// `seq_no` is 1-based and unique within its bundle; when the backend omits
/// it the mapper assigns `index + 1` in arrival order. `expiry` is kept as
/// the raw ISO calendar-date string -- classification happens lazily in
/// [`crate::freshness`] so a malformed date degrades instead of rejecting
/// the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUnit {
    pub unit_id: String,
    pub bundle_id: String,
    pub seq_no: u32,
    pub name: String,
    pub expiry: String,
    pub quantity: Option<i32>,
    pub memo: Option<String>,
    pub priority: Option<ItemPriority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

/// Denormalized Bundle x ItemUnit join for display.
///
/// Recomputed on every read by [`crate::mapping::to_items`]; never
/// persisted. `display_code` follows `{bundle_label}-{seq_no:02}` and also
/// serves as the row id. `memo` falls back from the unit memo to the
/// bundle memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub bundle_id: String,
    pub unit_id: String,
    pub slot_id: Option<String>,
    pub slot_code: String,
    pub label_no: i32,
    pub seq_no: u32,
    pub display_code: String,
    pub bundle_label_display: String,
    pub bundle_name: String,
    pub name: String,
    pub expiry: String,
    pub memo: Option<String>,
    pub bundle_memo: Option<String>,
    pub quantity: Option<i32>,
    pub owner: Owner,
    pub owner_user_id: Option<String>,
    pub priority: Option<ItemPriority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}
