//! Tolerant extraction of the rows & total count out of a list response body.
//!
//! The backend is not consistent in where it puts the items and the total,
//! so each of them is looked up by an ordered list of [`Strategy`]s, first match wins.
use log::debug;
use primitives::{FieldValue, Row};
use serde_json::{Map, Value};
use std::convert::TryFrom;

use crate::view::{CHILDREN_FALLBACK_KEY, CHILDREN_KEY};

/// A named path of object keys into the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub name: &'static str,
    pub path: &'static [&'static str],
}

impl Strategy {
    pub fn lookup<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.path
            .iter()
            .try_fold(body, |value, key| value.as_object()?.get(*key))
    }
}

pub const ITEM_STRATEGIES: [Strategy; 4] = [
    Strategy { name: "data.items", path: &["data", "items"] },
    Strategy { name: "items", path: &["items"] },
    Strategy { name: "data", path: &["data"] },
    Strategy { name: "root", path: &[] },
];

pub const TOTAL_STRATEGIES: [Strategy; 5] = [
    Strategy { name: "data.total", path: &["data", "total"] },
    Strategy { name: "total", path: &["total"] },
    Strategy { name: "totalCount", path: &["totalCount"] },
    Strategy { name: "count", path: &["count"] },
    Strategy { name: "pagination.total", path: &["pagination", "total"] },
];

/// One page of rows with the total count of rows on all pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub rows: Vec<Row>,
    pub total: u64,
}

/// Parses the body as JSON, anything malformed becomes an empty object.
pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|err| {
        debug!("Malformed list response body, using an empty object: {err}");

        Value::Object(Map::new())
    })
}

/// The items array of the first matching [`ITEM_STRATEGIES`], empty if none is an array.
pub fn extract_items(body: &Value) -> &[Value] {
    ITEM_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.lookup(body)?.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite() && *float >= 0.0)
                // saturates at `u64::MAX`
                .map(|float| float.min(u64::MAX as f64) as u64)
        }),
        Value::String(string) => as_count(&serde_json::from_str(string.trim()).ok()?),
        _ => None,
    }
}

/// The total of the first [`TOTAL_STRATEGIES`] which is a number (or a numeric string),
/// `fallback` otherwise.
pub fn extract_total(body: &Value, fallback: u64) -> u64 {
    TOTAL_STRATEGIES
        .iter()
        .find_map(|strategy| as_count(strategy.lookup(body)?))
        .unwrap_or(fallback)
}

/// Makes sure the row exposes its children as a [`CHILDREN_KEY`] list,
/// taken from [`CHILDREN_FALLBACK_KEY`] if needed, empty when there are none.
pub fn normalize_children(row: &mut Row) {
    if row.get(CHILDREN_KEY).and_then(FieldValue::as_list).is_some() {
        return;
    }

    let children = match row.remove(CHILDREN_FALLBACK_KEY) {
        Some(FieldValue::List(children)) => children,
        Some(other) => {
            // not a list, keep it as it was
            row.insert(CHILDREN_FALLBACK_KEY, other);
            Vec::new()
        }
        None => Vec::new(),
    };

    row.insert(CHILDREN_KEY, FieldValue::List(children));
}

/// Extracts a [`Page`] from a response body.
///
/// Items which are not objects are skipped. When `nested` is set,
/// the children of every row are normalized with [`normalize_children`].
pub fn extract_page(body: &Value, nested: bool) -> Page {
    let items = extract_items(body);

    let rows: Vec<Row> = items
        .iter()
        .filter_map(|item| Row::try_from(item.clone()).ok())
        .map(|mut row| {
            if nested {
                normalize_children(&mut row);
            }
            row
        })
        .collect();

    let total = extract_total(body, items.len() as u64);

    Page { rows, total }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::test_util::{row, rows};
    use serde_json::json;

    fn item_strategy(body: &Value) -> Option<&'static str> {
        ITEM_STRATEGIES
            .iter()
            .find(|strategy| strategy.lookup(body).map_or(false, Value::is_array))
            .map(|strategy| strategy.name)
    }

    #[test]
    fn items_by_first_matching_strategy() {
        let cases = [
            (json!({ "data": { "items": [1, 2] }, "items": [3] }), Some("data.items"), 2),
            (json!({ "data": { "items": null }, "items": [3] }), Some("items"), 1),
            (json!({ "data": [1, 2, 3] }), Some("data"), 3),
            (json!([1]), Some("root"), 1),
            (json!({ "data": { "rows": [1] } }), None, 0),
            (json!("text"), None, 0),
        ];

        for (body, strategy, count) in cases {
            assert_eq!(strategy, item_strategy(&body), "body: {body}");
            assert_eq!(count, extract_items(&body).len(), "body: {body}");
        }
    }

    #[test]
    fn totals() {
        let cases = [
            (json!({ "data": { "total": 40 }, "total": 1 }), 40),
            (json!({ "data": { "total": "n/a" }, "total": "35" }), 35),
            (json!({ "totalCount": 12 }), 12),
            (json!({ "count": 7.0 }), 7),
            (json!({ "pagination": { "total": 99 } }), 99),
            (json!({ "total": -3, "count": null }), 5),
            (json!({}), 5),
            (json!({ "total": 1e300 }), u64::MAX),
            (json!({ "total": "18446744073709551615" }), u64::MAX),
            (json!({ "total": "18446744073709551616" }), u64::MAX),
        ];

        for (body, expected) in cases {
            assert_eq!(expected, extract_total(&body, 5), "body: {body}");
        }
    }

    #[test]
    fn malformed_body_is_an_empty_page() {
        for body in ["<html>Bad Gateway</html>", "", "{\"items\": [", "null"] {
            let page = extract_page(&parse_body(body), true);

            assert_eq!(Page::default(), page, "body: {body:?}");
        }
    }

    #[test]
    fn skips_non_object_items() {
        let body = json!({ "items": [{ "id": 1 }, 2, "three", null, { "id": 4 }] });

        let page = extract_page(&body, false);

        assert_eq!(rows([json!({ "id": 1 }), json!({ "id": 4 })]), page.rows);
        // the total falls back to the count of items, not of rows
        assert_eq!(5, page.total);
    }

    #[test]
    fn normalizes_children() {
        let mut with_campaigns = row(json!({ "id": 1, "campaigns": [{ "campaign_id": "a" }] }));
        let mut with_children = row(json!({ "id": 2, "children": [{ "campaign_id": "b" }] }));
        let mut without = row(json!({ "id": 3, "campaigns": null }));
        let mut odd_children = row(json!({ "id": 4, "children": "n/a" }));

        for row in [&mut with_campaigns, &mut with_children, &mut without, &mut odd_children] {
            normalize_children(row);
        }

        assert_eq!(row(json!({ "id": 1, "campaigns": [{ "campaign_id": "a" }] })), with_campaigns);
        assert_eq!(row(json!({ "id": 2, "campaigns": [{ "campaign_id": "b" }] })), with_children);
        assert_eq!(row(json!({ "id": 3, "campaigns": [] })), without);
        assert_eq!(row(json!({ "id": 4, "children": "n/a", "campaigns": [] })), odd_children);
    }

    #[test]
    fn nested_page() {
        let body = json!({
            "data": {
                "items": [
                    { "id": "req-1", "children": [{ "campaign_id": "c-1" }] },
                    { "id": "req-2" }
                ],
                "total": "21"
            }
        });

        let page = extract_page(&body, true);

        assert_eq!(21, page.total);
        assert_eq!(
            rows([
                json!({ "id": "req-1", "campaigns": [{ "campaign_id": "c-1" }] }),
                json!({ "id": "req-2", "campaigns": [] }),
            ]),
            page.rows
        );
    }
}
