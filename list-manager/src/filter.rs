//! The structured filter stage.
//!
//! A row is kept only if it passes every active predicate of the [`Filter`],
//! fields left empty impose no constraint.
use primitives::{parse_date, DateRange, Filter, Row, StatusCategory};
use std::collections::BTreeSet;

use crate::view::{ViewSpec, PLATFORM_FIELDS, STATUS_FIELDS};

/// Narrows the rows to the ones passing the filter, keeping their order.
///
/// `parent` is the row the listed rows belong to (e.g. the request of its campaigns),
/// its platform is used for rows which don't have one.
pub fn apply_filter(rows: Vec<Row>, filter: &Filter, view: &ViewSpec, parent: Option<&Row>) -> Vec<Row> {
    if filter.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| passes(row, filter, view, parent))
        .collect()
}

pub fn passes(row: &Row, filter: &Filter, view: &ViewSpec, parent: Option<&Row>) -> bool {
    status_matches(row, filter, view)
        && platform_matches(row, filter, parent)
        && device_matches(row, filter, view)
        && text_matches(&requester(row), &filter.requester)
        && text_matches(&row.search_text("client_name"), &filter.client_name)
        && text_matches(&row.search_text("country"), &filter.country)
        && date_matches(row, view.request_date_fields, &filter.request_date)
        && date_matches(row, view.campaign_date_fields, &filter.campaign_date)
}

fn first_text(row: &Row, keys: &[&str]) -> Option<String> {
    row.first_present(keys).map(|value| value.as_search_text())
}

fn status_matches(row: &Row, filter: &Filter, view: &ViewSpec) -> bool {
    if filter.statuses.is_empty() {
        return true;
    }

    first_text(row, &STATUS_FIELDS)
        .and_then(|status| StatusCategory::classify(&status, view.approved_is_created))
        .map_or(false, |category| filter.statuses.contains(&category))
}

fn selected(values: &BTreeSet<String>) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

fn platform_matches(row: &Row, filter: &Filter, parent: Option<&Row>) -> bool {
    let platforms = selected(&filter.platforms);
    if platforms.is_empty() {
        return true;
    }

    let platform = first_text(row, &PLATFORM_FIELDS)
        .or_else(|| parent.and_then(|parent| first_text(parent, &PLATFORM_FIELDS)))
        .unwrap_or_default();

    platforms
        .iter()
        .any(|selected| platform.contains(selected.as_str()))
}

fn device_matches(row: &Row, filter: &Filter, view: &ViewSpec) -> bool {
    let devices = selected(&filter.devices);
    if devices.is_empty() {
        return true;
    }

    let row_matches = |row: &Row| {
        let device = row.search_text("device");
        // the device is sometimes only part of the name
        let name = first_text(row, view.name_fields).unwrap_or_default();

        devices
            .iter()
            .any(|selected| device.contains(selected.as_str()) || name.contains(selected.as_str()))
    };

    row_matches(row)
        || view
            .child_key
            .map_or(false, |key| row.children(key).into_iter().any(row_matches))
}

/// `first_name last_name`, falling back to a `requester` field.
fn requester(row: &Row) -> String {
    let full_name = ["first_name", "last_name"]
        .iter()
        .map(|key| row.search_text(key))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if full_name.is_empty() {
        row.search_text("requester")
    } else {
        full_name
    }
}

fn text_matches(text: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();

    needle.is_empty() || text.contains(&needle)
}

/// Rows without a parsable date never pass an active date range.
fn date_matches(row: &Row, date_fields: &[&str], range: &DateRange) -> bool {
    if !range.is_active() {
        return true;
    }

    row.first_present(date_fields)
        .and_then(parse_date)
        .map_or(false, |date| range.contains(date))
}
