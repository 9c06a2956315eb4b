//! # Storage Snapshot
//!
//! Wire format of the storage slot: a JSON array of
//! `{ id, name, price, image, quantity }` objects with `price` as a decimal
//! number in the cart currency. Decoding is lenient; anything unreadable
//! yields an empty cart.

use crate::error::CartResult;
use crate::item::LineItem;
use crate::product::{Currency, Price};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: String,
    #[serde(default)]
    name: String,
    price: f64,
    #[serde(default)]
    image: String,
    quantity: i64,
}

/// Serialize the full collection for the storage slot
pub fn encode(items: &[LineItem]) -> CartResult<String> {
    let stored: Vec<StoredItem> = items
        .iter()
        .map(|item| StoredItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.unit_price.as_decimal(),
            image: item.image.clone(),
            quantity: i64::from(item.quantity),
        })
        .collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Parse a stored snapshot.
///
/// Entries with a non-positive quantity, an empty id or an unusable price are
/// dropped; repeated ids are merged into the first occurrence.
pub fn decode(raw: &str, currency: Currency) -> Vec<LineItem> {
    let stored: Option<Vec<StoredItem>> = match serde_json::from_str(raw) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "Discarding malformed cart snapshot");
            return Vec::new();
        }
    };

    let mut items: Vec<LineItem> = Vec::new();
    for entry in stored.unwrap_or_default() {
        if entry.id.is_empty() || entry.quantity <= 0 {
            warn!(id = %entry.id, quantity = entry.quantity, "Skipping invalid stored line item");
            continue;
        }
        let Some(unit_price) = Price::from_decimal(entry.price, currency) else {
            warn!(id = %entry.id, price = entry.price, "Skipping stored line item with bad price");
            continue;
        };
        let quantity = u32::try_from(entry.quantity).unwrap_or(u32::MAX);

        match items.iter_mut().find(|item| item.id == entry.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => items.push(LineItem {
                id: entry.id,
                name: entry.name,
                image: entry.image,
                unit_price,
                quantity,
            }),
        }
    }
    items
}
