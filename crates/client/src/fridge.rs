//! Typed fridge operations over the [`ApiClient`].
//!
//! Fetches wire DTOs and hands them to `dormmate-core`'s mappers, so
//! callers only ever see domain entities. The inventory fetch issues one
//! detail request per bundle summary concurrently and fails fast: a
//! single failed detail fails the whole batch, no partial inventory is
//! surfaced.

use dormmate_core::dto::{BundleDto, BundleListDto, ItemDto, SlotListDto};
use dormmate_core::mapping::{map_bundle_from_dto, map_item_from_response, map_slot_from_dto};
use dormmate_core::model::{Bundle, ItemUnit, Slot};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::errors::ApiError;

/// Failures from the typed fridge API.
#[derive(Debug, thiserror::Error)]
pub enum FridgeApiError {
    /// The backend rejected the call; the inner error carries the
    /// user-facing message.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A 2xx response arrived without the body the operation requires.
    #[error("Empty response from {endpoint}")]
    MissingBody { endpoint: String },
}

/// Which residents' bundles the inventory fetch covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerScope {
    /// Only the caller's bundles (backend default).
    #[default]
    Me,
    /// Every resident's bundles (admin and shared views).
    All,
}

/// Active bundles plus their units, ready for `to_items`.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub bundles: Vec<Bundle>,
    pub units: Vec<ItemUnit>,
}

/// New unit inside a bundle registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    pub name: String,
    pub expiry_date: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
}

/// Bundle registration payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBundlePayload {
    pub slot_id: String,
    pub bundle_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub items: Vec<NewUnit>,
}

#[derive(Debug, Deserialize)]
struct CreateBundleResponseDto {
    bundle: BundleDto,
}

/// Bundle mutation payload. `memo` and `removed_at` are always sent, with
/// `null` clearing the memo or restoring a soft-deleted bundle; a
/// timestamp in `removed_at` soft-deletes it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBundlePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_name: Option<String>,
    pub memo: Option<String>,
    pub removed_at: Option<String>,
}

/// Item mutation payload; absent fields are omitted and left untouched by
/// the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<String>,
}

/// Normalize a bundle mutation before it goes on the wire: the new name
/// is trimmed, everything else passes through.
fn update_bundle_body(payload: &UpdateBundlePayload) -> UpdateBundlePayload {
    UpdateBundlePayload {
        bundle_name: payload
            .bundle_name
            .as_deref()
            .map(|name| name.trim().to_string()),
        memo: payload.memo.clone(),
        removed_at: payload.removed_at.clone(),
    }
}

/// Normalize an item mutation: trim the name, truncate the expiry to a
/// calendar date.
fn update_item_body(payload: &UpdateItemPayload) -> UpdateItemPayload {
    UpdateItemPayload {
        name: payload.name.as_deref().map(|name| name.trim().to_string()),
        expiry_date: payload
            .expiry_date
            .as_deref()
            .map(|date| normalize_date(date).to_string()),
        ..payload.clone()
    }
}

/// Path for the bundle list endpoint under an owner scope. The backend
/// defaults to the caller's own bundles; `owner=all` widens it.
fn bundle_list_path(scope: OwnerScope) -> &'static str {
    match scope {
        OwnerScope::Me => "/fridge/bundles?status=active&size=200",
        OwnerScope::All => "/fridge/bundles?status=active&size=200&owner=all",
    }
}

/// Truncate a datetime-ish input to its `YYYY-MM-DD` prefix; expiry dates
/// are calendar dates on the wire.
fn normalize_date(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}

/// Typed fridge API surface.
pub struct FridgeApi {
    client: ApiClient,
}

impl FridgeApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch all slots (compartments), mapped to domain entities.
    pub async fn fetch_slots(&self) -> Result<Vec<Slot>, FridgeApiError> {
        let path = "/fridge/slots?view=full&page=0&size=200";
        let list: SlotListDto = self
            .client
            .get_json(path)
            .await?
            .ok_or_else(|| FridgeApiError::MissingBody {
                endpoint: path.into(),
            })?;

        Ok(list.items.into_iter().map(map_slot_from_dto).collect())
    }

    /// Fetch the active inventory: the bundle list, then every bundle's
    /// detail concurrently, mapped against `current_user_id` for ownership
    /// tagging.
    ///
    /// Fail-fast: the first failed detail request aborts the batch and the
    /// whole call returns that error.
    pub async fn fetch_inventory(
        &self,
        current_user_id: Option<&str>,
        scope: OwnerScope,
    ) -> Result<Inventory, FridgeApiError> {
        let path = bundle_list_path(scope);
        let list: BundleListDto = self
            .client
            .get_json(path)
            .await?
            .ok_or_else(|| FridgeApiError::MissingBody {
                endpoint: path.into(),
            })?;

        if list.items.is_empty() {
            return Ok(Inventory::default());
        }

        let details = try_join_all(
            list.items
                .iter()
                .map(|summary| self.fetch_bundle(&summary.bundle_id)),
        )
        .await?;

        let mut inventory = Inventory::default();
        for dto in details {
            let (bundle, mut units) = map_bundle_from_dto(dto, current_user_id);
            inventory.bundles.push(bundle);
            inventory.units.append(&mut units);
        }

        Ok(inventory)
    }

    /// Fetch one bundle's detail DTO.
    async fn fetch_bundle(&self, bundle_id: &str) -> Result<BundleDto, FridgeApiError> {
        let path = format!("/fridge/bundles/{bundle_id}");
        self.client
            .get_json(&path)
            .await?
            .ok_or(FridgeApiError::MissingBody { endpoint: path })
    }

    /// Register a new bundle with its initial units; returns the mapped
    /// bundle as the backend stored it.
    pub async fn create_bundle(
        &self,
        payload: &CreateBundlePayload,
        current_user_id: Option<&str>,
    ) -> Result<(Bundle, Vec<ItemUnit>), FridgeApiError> {
        let body = CreateBundlePayload {
            slot_id: payload.slot_id.clone(),
            bundle_name: payload.bundle_name.clone(),
            memo: payload.memo.clone(),
            items: payload
                .items
                .iter()
                .map(|unit| NewUnit {
                    name: unit.name.clone(),
                    expiry_date: normalize_date(&unit.expiry_date).to_string(),
                    quantity: unit.quantity,
                    unit_code: unit.unit_code.clone(),
                })
                .collect(),
        };

        let created: CreateBundleResponseDto = self
            .client
            .post_json("/fridge/bundles", &body)
            .await?
            .ok_or_else(|| FridgeApiError::MissingBody {
                endpoint: "/fridge/bundles".into(),
            })?;

        Ok(map_bundle_from_dto(created.bundle, current_user_id))
    }

    /// Patch a bundle's name, memo, or soft-deletion marker; returns the
    /// bundle as stored, with its units remapped.
    pub async fn update_bundle(
        &self,
        bundle_id: &str,
        payload: &UpdateBundlePayload,
        current_user_id: Option<&str>,
    ) -> Result<(Bundle, Vec<ItemUnit>), FridgeApiError> {
        let path = format!("/fridge/bundles/{bundle_id}");
        let dto: BundleDto = self
            .client
            .patch_json(&path, &update_bundle_body(payload))
            .await?
            .ok_or(FridgeApiError::MissingBody { endpoint: path })?;

        Ok(map_bundle_from_dto(dto, current_user_id))
    }

    /// Patch one item. The response carries the item without its siblings,
    /// so the caller supplies the owning bundle for the remap.
    pub async fn update_item(
        &self,
        item_id: &str,
        payload: &UpdateItemPayload,
        bundle: &Bundle,
    ) -> Result<ItemUnit, FridgeApiError> {
        let path = format!("/fridge/items/{item_id}");
        let dto: ItemDto = self
            .client
            .patch_json(&path, &update_item_body(payload))
            .await?
            .ok_or(FridgeApiError::MissingBody { endpoint: path })?;

        Ok(map_item_from_response(&dto, bundle))
    }

    /// Delete one item.
    pub async fn delete_item(&self, item_id: &str) -> Result<(), FridgeApiError> {
        self.client
            .delete(&format!("/fridge/items/{item_id}"))
            .await?;
        Ok(())
    }

    /// Delete a whole bundle with its items.
    pub async fn delete_bundle(&self, bundle_id: &str) -> Result<(), FridgeApiError> {
        self.client
            .delete(&format!("/fridge/bundles/{bundle_id}"))
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
