//! Wire-format DTOs as the backend emits them.
//!
//! Field names mirror the backend's camelCase JSON exactly. Deserialization
//! is the schema check: a payload that does not fit these shapes is
//! rejected at the boundary instead of leaking optional-field uncertainty
//! into the mapping and filtering logic.

use serde::{Deserialize, Serialize};

use crate::model::{CompartmentKind, ItemPriority, SlotStatus};

/// Slot (compartment) as returned by `GET /fridge/slots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub slot_id: String,
    pub slot_code: String,
    pub floor: i32,
    pub floor_code: String,
    #[serde(rename = "type")]
    pub kind: CompartmentKind,
    pub status: SlotStatus,
    #[serde(default)]
    pub label_range_start: Option<i32>,
    #[serde(default)]
    pub label_range_end: Option<i32>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub display_name: Option<String>,
    pub is_active: bool,
}

/// Bundle summary row from the bundle list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSummaryDto {
    pub bundle_id: String,
    #[serde(default)]
    pub slot_id: Option<String>,
    pub slot_code: String,
    pub label_no: i32,
    #[serde(default)]
    pub label_display: Option<String>,
    pub bundle_name: String,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub owner_user_id: Option<String>,
    #[serde(default)]
    pub owner_display_name: Option<String>,
    #[serde(default)]
    pub owner_room_number: Option<String>,
    pub status: String,
    pub item_count: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub removed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Full bundle detail: the summary fields plus the contained items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDto {
    #[serde(flatten)]
    pub summary: BundleSummaryDto,
    #[serde(default)]
    pub items: Vec<ItemDto>,
}

/// Item row inside a bundle detail response.
///
/// `sequence_no` is optional on the wire; the mapper backfills it from the
/// arrival index when missing or non-positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub item_id: String,
    pub bundle_id: String,
    #[serde(default)]
    pub sequence_no: Option<i32>,
    pub name: String,
    pub expiry_date: String,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub unit: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<ItemPriority>,
    #[serde(default)]
    pub memo: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub removed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Envelope for the paginated bundle list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleListDto {
    #[serde(default)]
    pub items: Vec<BundleSummaryDto>,
    #[serde(default)]
    pub total_count: i64,
}

/// Envelope for the slot list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotListDto {
    #[serde(default)]
    pub items: Vec<SlotDto>,
}
