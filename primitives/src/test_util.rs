//! Dummy Request & Campaign rows, shaped like the backend responses.
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::convert::TryFrom;

use crate::Row;

/// Builds a [`Row`] from a JSON object.
///
/// # Panics
///
/// If the value is not a JSON object.
pub fn row(value: Value) -> Row {
    Row::try_from(value).expect("Row fixtures should be JSON objects")
}

pub fn rows(values: impl IntoIterator<Item = Value>) -> Vec<Row> {
    values.into_iter().map(row).collect()
}

/// Campaign creation requests with their nested `campaigns`.
pub static DUMMY_REQUESTS: Lazy<Vec<Row>> = Lazy::new(|| {
    rows([
        json!({
            "id": "req-1",
            "request_name": "Spring Sale",
            "status": "Created",
            "platform": "Taboola",
            "first_name": "Ana",
            "last_name": "Petrova",
            "client_name": "Acme Shoes",
            "country": "BG",
            "requested_at": "2024-03-01T09:00:00Z",
            "campaigns": [
                { "campaign_id": "c-11", "campaign_name": "Spring Sale - Desktop", "device": "Desktop", "status": "Created OK" },
                { "campaign_id": "c-12", "campaign_name": "Spring Sale - Mobile", "device": "Mobile", "status": "Campaign Failed" }
            ]
        }),
        json!({
            "id": "req-2",
            "request_name": "Black Friday",
            "status": "Timeout on platform",
            "platform": "Outbrain",
            "first_name": "John",
            "last_name": "Smith",
            "client_name": "Globex",
            "country": "US",
            "created_at": "2024-01-05 12:30:00",
            "campaigns": []
        }),
        json!({
            "id": "req-3",
            "request_name": "Evergreen",
            "status": "pending",
            "platform": "MediaGo",
            "first_name": "Mei",
            "last_name": "Tanaka",
            "client_name": "Initech",
            "country": "JP",
            "children": [
                { "campaign_id": "c-31", "campaign_name": "Evergreen - All", "device": "All", "status": "processing" }
            ]
        }),
    ])
});

/// Campaigns which have been approved, as listed by the approved campaigns view.
pub static DUMMY_APPROVED_CAMPAIGNS: Lazy<Vec<Row>> = Lazy::new(|| {
    rows([
        json!({
            "campaign_id": "c-11",
            "campaign_name": "Spring Sale - Desktop",
            "status": "Approved",
            "platform": "Taboola",
            "device": "Desktop",
            "country": "BG",
            "tracking_link": "https://track.example.com/c-11",
            "created_at": "2024-03-02T10:00:00Z"
        }),
        json!({
            "campaign_id": "c-41",
            "campaign_name": "autumn promo ios",
            "status": "approval failed",
            "platform": "RevContent",
            "device": null,
            "country": "DE",
            "created_at": "2024-02-10T08:00:00Z"
        }),
        json!({
            "campaign_id": "c-42",
            "campaign_name": "Autumn Promo Android",
            "status": "Approved",
            "platform": "RevContent",
            "country": "DE",
            "created_at": null
        }),
    ])
});
