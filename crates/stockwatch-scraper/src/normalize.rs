//! Normalization from a fulfillment document to [`StockSummary`] values.
//!
//! Absent sections are never errors: a missing `pickupMessage`, an unknown
//! model id, or an undecodable record all mean "unavailable". The upstream
//! service drops sections depending on region and stock state.

use serde_json::Value;
use stockwatch_core::{RequestedFields, WatchConfig};

use crate::summary::{
    DeliveryAvailability, PickupStatus, StockLine, StockReport, StockSummary, StoreAvailability,
};
use crate::types::{DeliveryEntry, FulfillmentContent, StoreRecord};

/// Builds the summary for one model.
///
/// `stores` restricts pickup lines to those store codes; an empty slice
/// accepts every store. Pickup lines follow source store order, then the
/// delivery line, if any.
#[must_use]
pub fn normalize_stock(
    document: &Value,
    model_id: &str,
    stores: &[String],
    fields: RequestedFields,
) -> StockSummary {
    let content = FulfillmentContent::from_document(document);
    let mut lines = Vec::new();

    if fields.pickup {
        lines.extend(
            content
                .stores()
                .iter()
                .filter(|record| store_selected(record, stores))
                .map(|record| store_availability(record, model_id))
                .filter(|store| store.status == PickupStatus::Available)
                .map(StockLine::Pickup),
        );
    }

    if fields.delivery {
        if let Some(delivery) = content
            .delivery(model_id)
            .map(|entry| delivery_availability(&entry))
            .filter(|d| d.is_buyable)
        {
            lines.push(StockLine::Delivery(delivery));
        }
    }

    tracing::debug!(model = model_id, hits = lines.len(), "normalized stock");
    StockSummary::new(lines)
}

/// Builds one summary per watched model, in the watch file's model order.
#[must_use]
pub fn normalize_report(document: &Value, watch: &WatchConfig) -> StockReport {
    let sections = watch
        .model_specs()
        .into_iter()
        .map(|model| {
            let summary = normalize_stock(document, &model.id, &watch.stores, watch.fields);
            (model, summary)
        })
        .collect();
    StockReport::new(sections)
}

fn store_selected(record: &StoreRecord, stores: &[String]) -> bool {
    if stores.is_empty() {
        return true;
    }
    record
        .store_number
        .as_deref()
        .is_some_and(|number| stores.iter().any(|s| s == number))
}

/// Converts a raw store record into its availability for `model_id`.
#[must_use]
pub fn store_availability(record: &StoreRecord, model_id: &str) -> StoreAvailability {
    let status = PickupStatus::from_display(
        record
            .parts_availability
            .get(model_id)
            .and_then(|part| part.pickup_display.as_deref()),
    );

    let address_lines: Vec<String> = record
        .address
        .as_ref()
        .map(|a| {
            [&a.address, &a.address2, &a.address3, &a.postal_code]
                .into_iter()
                .filter_map(|line| non_empty(line.as_deref()))
                .collect()
        })
        .unwrap_or_default();

    let name = non_empty(record.store_name.as_deref())
        .or_else(|| non_empty(record.store_number.as_deref()))
        .unwrap_or_else(|| "Unknown store".to_string());

    StoreAvailability {
        store_number: record.store_number.clone(),
        name,
        address_lines,
        phone: non_empty(record.phone_number.as_deref()),
        reservation_url: non_empty(record.make_reservation_url.as_deref()),
        status,
    }
}

/// Converts a raw delivery entry. The estimated date is the first option's
/// display name.
#[must_use]
pub fn delivery_availability(entry: &DeliveryEntry) -> DeliveryAvailability {
    let Some(regular) = &entry.regular else {
        return DeliveryAvailability {
            is_buyable: false,
            estimated_date: None,
        };
    };

    let is_buyable = regular.buyability.as_ref().is_some_and(|b| b.is_buyable);
    let estimated_date = regular
        .delivery_option_messages
        .as_ref()
        .and_then(|options| options.first())
        .and_then(|option| non_empty(option.display_name.as_deref()));

    DeliveryAvailability {
        is_buyable,
        estimated_date,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
