//! DTO-to-entity mapping and the denormalized item projection.
//!
//! All functions here are pure translations: deterministic given their
//! inputs, no I/O, no ambient state. Ownership classification takes the
//! current viewer's user id as an explicit parameter rather than reading
//! it from session globals.

use std::collections::HashMap;

use crate::dto::{BundleDto, ItemDto, SlotDto};
use crate::error::CoreError;
use crate::model::{Bundle, Item, ItemUnit, Owner, Slot};

// ---------------------------------------------------------------------------
// Label formatting
// ---------------------------------------------------------------------------

/// Format the sticker label for a bundle: `{slot_code}-{label_no:03}`.
///
/// # Examples
///
/// ```
/// use dormmate_core::mapping::format_bundle_label;
/// assert_eq!(format_bundle_label("A2", 7), "A2-007");
/// assert_eq!(format_bundle_label("B1", 123), "B1-123");
/// ```
pub fn format_bundle_label(slot_code: &str, label_no: i32) -> String {
    format!("{slot_code}-{label_no:03}")
}

/// Extract the bundle part of a combined `"Bundle - Detail"` item name.
///
/// Names without the separator are returned unchanged.
pub fn bundle_name(name: &str) -> &str {
    match name.find(" - ") {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Extract the detail part of a combined `"Bundle - Detail"` item name,
/// given the already-known bundle name.
pub fn detail_name<'a>(name: &'a str, bundle: &str) -> &'a str {
    let prefix_len = bundle.len() + " - ".len();
    if name.starts_with(bundle) && name[bundle.len()..].starts_with(" - ") {
        &name[prefix_len..]
    } else {
        name
    }
}

// ---------------------------------------------------------------------------
// DTO mappers
// ---------------------------------------------------------------------------

/// Map a slot DTO into the domain [`Slot`].
///
/// The display label falls back to the slot code when the admin has not
/// set a display name (or set it to whitespace).
pub fn map_slot_from_dto(dto: SlotDto) -> Slot {
    let label = match &dto.display_name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => dto.slot_code.clone(),
    };

    Slot {
        slot_id: dto.slot_id,
        code: dto.slot_code,
        label,
        floor: dto.floor,
        floor_code: dto.floor_code,
        kind: dto.kind,
        status: dto.status,
        temperature: dto.temperature,
        capacity: dto.capacity,
        display_order: dto.display_order,
        label_range_start: dto.label_range_start,
        label_range_end: dto.label_range_end,
        is_active: dto.is_active,
    }
}

/// Map a bundle detail DTO into a [`Bundle`] plus its [`ItemUnit`]s.
///
/// The owner tag is [`Owner::Me`] iff the DTO carries an owner user id
/// that equals `current_user_id`; anonymous bundles and other residents'
/// bundles are both [`Owner::Other`]. A missing `labelDisplay` is derived
/// via [`format_bundle_label`], so the field is never empty downstream.
pub fn map_bundle_from_dto(dto: BundleDto, current_user_id: Option<&str>) -> (Bundle, Vec<ItemUnit>) {
    let summary = dto.summary;

    let label_display = summary
        .label_display
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| format_bundle_label(&summary.slot_code, summary.label_no));

    let owner = match (summary.owner_user_id.as_deref(), current_user_id) {
        (Some(owner_id), Some(viewer_id)) if owner_id == viewer_id => Owner::Me,
        _ => Owner::Other,
    };

    let bundle = Bundle {
        bundle_id: summary.bundle_id,
        slot_id: summary.slot_id,
        slot_code: summary.slot_code,
        label_no: summary.label_no,
        label_display,
        bundle_name: summary.bundle_name,
        memo: summary.memo,
        owner_user_id: summary.owner_user_id,
        owner_display_name: summary.owner_display_name,
        owner_room_number: summary.owner_room_number,
        owner,
        created_at: summary.created_at,
        updated_at: summary.updated_at,
        removed_at: summary.removed_at,
    };

    let units = dto
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| map_item_from_dto(item, &bundle, index))
        .collect();

    (bundle, units)
}

/// Map an item DTO into an [`ItemUnit`] belonging to `bundle`.
///
/// `index` is the item's zero-based position in the bundle's item array;
/// it backfills the sequence number (`index + 1`) when the wire value is
/// missing or non-positive.
pub fn map_item_from_dto(dto: &ItemDto, bundle: &Bundle, index: usize) -> ItemUnit {
    let seq_no = match dto.sequence_no {
        Some(seq) if seq > 0 => seq as u32,
        _ => index as u32 + 1,
    };

    ItemUnit {
        unit_id: dto.item_id.clone(),
        bundle_id: bundle.bundle_id.clone(),
        seq_no,
        name: dto.name.clone(),
        expiry: dto.expiry_date.clone(),
        quantity: dto.quantity,
        memo: dto.memo.clone(),
        priority: dto.priority,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
        removed_at: dto.removed_at,
    }
}

/// Map a standalone item response (create/update endpoints return one item
/// without its siblings) into an [`ItemUnit`].
///
/// The fallback index is reconstructed from the DTO's own sequence number
/// so [`map_item_from_dto`] keeps a single backfill rule.
pub fn map_item_from_response(dto: &ItemDto, bundle: &Bundle) -> ItemUnit {
    let index = match dto.sequence_no {
        Some(seq) if seq > 0 => (seq - 1) as usize,
        _ => 0,
    };
    map_item_from_dto(dto, bundle, index)
}

// ---------------------------------------------------------------------------
// Item projection
// ---------------------------------------------------------------------------

/// Join bundles and units into the denormalized [`Item`] projection.
///
/// Every unit must resolve to a bundle in `bundles`; a dangling bundle
/// reference is a data-integrity violation and fails the whole projection
/// with [`CoreError::MissingBundle`] rather than silently skipping the
/// unit. Output order follows `units`.
pub fn to_items(bundles: &[Bundle], units: &[ItemUnit]) -> Result<Vec<Item>, CoreError> {
    let by_id: HashMap<&str, &Bundle> = bundles
        .iter()
        .map(|bundle| (bundle.bundle_id.as_str(), bundle))
        .collect();

    units
        .iter()
        .map(|unit| {
            let bundle = by_id.get(unit.bundle_id.as_str()).copied().ok_or_else(|| {
                CoreError::MissingBundle {
                    unit_id: unit.unit_id.clone(),
                    bundle_id: unit.bundle_id.clone(),
                }
            })?;

            // label_display is populated at mapping time, but re-derive if an
            // upstream source handed us an empty string anyway.
            let bundle_label = if bundle.label_display.is_empty() {
                format_bundle_label(&bundle.slot_code, bundle.label_no)
            } else {
                bundle.label_display.clone()
            };
            let display_code = format!("{bundle_label}-{:02}", unit.seq_no);

            Ok(Item {
                id: display_code.clone(),
                bundle_id: bundle.bundle_id.clone(),
                unit_id: unit.unit_id.clone(),
                slot_id: bundle.slot_id.clone(),
                slot_code: bundle.slot_code.clone(),
                label_no: bundle.label_no,
                seq_no: unit.seq_no,
                display_code,
                bundle_label_display: bundle_label,
                bundle_name: bundle.bundle_name.clone(),
                name: unit.name.clone(),
                expiry: unit.expiry.clone(),
                memo: unit.memo.clone().or_else(|| bundle.memo.clone()),
                bundle_memo: bundle.memo.clone(),
                quantity: unit.quantity,
                owner: bundle.owner,
                owner_user_id: bundle.owner_user_id.clone(),
                priority: unit.priority,
                created_at: unit.created_at,
                updated_at: unit.updated_at,
                removed_at: unit.removed_at,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
