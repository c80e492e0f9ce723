//! Response types for the retailer's `fulfillment-messages` endpoint.
//!
//! ## Observed shape
//!
//! The live endpoint wraps everything in an envelope:
//! `{"head": {...}, "body": {"content": {"pickupMessage": ..., "deliveryMessage": ...}}}`.
//! Pages that embed the document in a script tag serve the inner content
//! directly. [`FulfillmentContent::from_document`] accepts both.
//!
//! ### `pickupMessage.stores`
//! Array of store records in distance order. Each record carries a
//! `partsAvailability` map keyed by model id. `pickupDisplay` is the string
//! `"available"` when the model can be collected; observed other values are
//! `"unavailable"` and `"ineligible"`.
//!
//! ### `deliveryMessage`
//! Object keyed by model id, but the same object also holds non-model keys
//! such as `"geoLocated": false` and `"dudeCookieSet": false`. Entries are
//! therefore decoded one model at a time rather than as a typed map.
//!
//! Any record or entry that does not decode is treated as unavailable.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Postal address block of a store. Every line may be `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Per-model pickup flags inside a store record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartAvailability {
    #[serde(default)]
    pub pickup_display: Option<String>,
}

/// One entry of `pickupMessage.stores`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    /// Store code such as `"R669"`.
    #[serde(default)]
    pub store_number: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub address: Option<StoreAddress>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub make_reservation_url: Option<String>,
    #[serde(default)]
    pub parts_availability: HashMap<String, PartAvailability>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyability {
    #[serde(default)]
    pub is_buyable: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOptionMessage {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The `regular` shipping option for a model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularDelivery {
    #[serde(default)]
    pub buyability: Option<Buyability>,
    /// Ordered earliest first.
    #[serde(default)]
    pub delivery_option_messages: Option<Vec<DeliveryOptionMessage>>,
}

/// `deliveryMessage.<modelId>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryEntry {
    #[serde(default)]
    pub regular: Option<RegularDelivery>,
}

/// Borrowed view over the stock-bearing part of a fulfillment document.
#[derive(Debug, Clone, Copy)]
pub struct FulfillmentContent<'a> {
    content: &'a Value,
}

impl<'a> FulfillmentContent<'a> {
    /// Unwraps the `body.content` envelope when present.
    #[must_use]
    pub fn from_document(document: &'a Value) -> Self {
        let content = document
            .get("body")
            .and_then(|body| body.get("content"))
            .filter(|c| c.is_object())
            .unwrap_or(document);
        Self { content }
    }

    /// Store records in source order. Records that fail to decode are skipped.
    #[must_use]
    pub fn stores(&self) -> Vec<StoreRecord> {
        let Some(stores) = self
            .content
            .get("pickupMessage")
            .and_then(|p| p.get("stores"))
            .and_then(Value::as_array)
        else {
            return vec![];
        };

        stores
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| {
                serde_json::from_value::<StoreRecord>(raw.clone())
                    .map_err(|e| {
                        tracing::debug!(index = idx, error = %e, "skipping undecodable store record");
                    })
                    .ok()
            })
            .collect()
    }

    /// The delivery entry for `model_id`, if present and decodable.
    #[must_use]
    pub fn delivery(&self, model_id: &str) -> Option<DeliveryEntry> {
        let raw = self.content.get("deliveryMessage")?.get(model_id)?;
        serde_json::from_value::<DeliveryEntry>(raw.clone())
            .map_err(|e| {
                tracing::debug!(model = model_id, error = %e, "skipping undecodable delivery entry");
            })
            .ok()
    }
}
