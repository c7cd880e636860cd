//! Column discovery, visibility and default widths of a list view.
use primitives::Row;
use std::collections::{BTreeSet, HashMap};

pub const NARROW_WIDTH: u32 = 110;
pub const MEDIUM_WIDTH: u32 = 150;
pub const STANDARD_WIDTH: u32 = 180;
pub const WIDE_WIDTH: u32 = 260;
pub const TRACKING_LINK_WIDTH: u32 = 320;

/// Exact keys always win over the patterns below.
const EXACT_WIDTHS: [(&str, u32); 4] = [
    ("sub_folder", NARROW_WIDTH),
    ("subfolder", NARROW_WIDTH),
    ("tracking_link", TRACKING_LINK_WIDTH),
    ("status", MEDIUM_WIDTH),
];
const WIDE_PATTERNS: [&str; 3] = ["name", "description", "headline"];
const MEDIUM_PATTERNS: [&str; 4] = ["status", "country", "device", "timezone"];

/// Default width in pixels of a column.
pub fn default_width(key: &str) -> u32 {
    let key = key.to_lowercase();

    if let Some((_, width)) = EXACT_WIDTHS.iter().find(|(exact, _)| *exact == key) {
        return *width;
    }

    if WIDE_PATTERNS.iter().any(|pattern| key.contains(pattern)) {
        WIDE_WIDTH
    } else if MEDIUM_PATTERNS.iter().any(|pattern| key.contains(pattern)) {
        MEDIUM_WIDTH
    } else {
        STANDARD_WIDTH
    }
}

/// The union of keys over all rows.
pub fn observed_keys(rows: &[Row]) -> BTreeSet<String> {
    rows.iter()
        .flat_map(|row| row.keys())
        .map(ToString::to_string)
        .collect()
}

/// Orders the observed keys: first the `preferred` keys which are present (in the preferred order),
/// then every other key in ascending lexicographic order.
pub fn ordered_columns(observed: &BTreeSet<String>, preferred: &[&str]) -> Vec<String> {
    let preferred_present = preferred
        .iter()
        .filter(|key| observed.contains(**key))
        .map(ToString::to_string);

    // `BTreeSet` iterates in ascending order
    let rest = observed
        .iter()
        .filter(|key| !preferred.contains(&key.as_str()))
        .cloned();

    preferred_present.chain(rest).collect()
}

/// The `defaults` which are present in `columns`, in column order.
pub fn default_visible(columns: &[String], defaults: &[&str]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| defaults.contains(&column.as_str()))
        .cloned()
        .collect()
}

/// Drops the visible columns which are no longer present and orders the rest by the column order.
///
/// Never returns an empty set when there are columns: it falls back to the defaults,
/// and if none of the defaults are present either, to all columns.
pub fn reconcile_visible(visible: &[String], columns: &[String], defaults: &[&str]) -> Vec<String> {
    let reconciled: Vec<String> = columns
        .iter()
        .filter(|column| visible.contains(column))
        .cloned()
        .collect();

    if !reconciled.is_empty() || columns.is_empty() {
        return reconciled;
    }

    match default_visible(columns, defaults) {
        defaults if defaults.is_empty() => columns.to_vec(),
        defaults => defaults,
    }
}

/// Keeps the widths of present columns and fills in the defaults for new ones.
pub fn reconcile_widths(widths: &HashMap<String, u32>, columns: &[String]) -> HashMap<String, u32> {
    columns
        .iter()
        .map(|column| {
            let width = widths
                .get(column)
                .copied()
                .unwrap_or_else(|| default_width(column));

            (column.clone(), width)
        })
        .collect()
}
