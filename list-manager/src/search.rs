//! The free-text search stage.
use primitives::{FieldValue, Row};

use crate::view::ViewSpec;

/// Trimmed & lowercased query, empty means no search.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether any of the `fields` contains the (normalized) `query`.
pub fn row_matches(row: &Row, fields: &[&str], query: &str) -> bool {
    fields
        .iter()
        .any(|field| row.search_text(field).contains(query))
}

/// Narrows the rows to the ones matching the query, keeping their order.
///
/// For nested views, a parent row whose own fields don't match is still kept if any
/// of its children match, but with its children narrowed to the matching ones.
pub fn apply_search(rows: Vec<Row>, view: &ViewSpec, query: &str) -> Vec<Row> {
    let query = normalize_query(query);
    if query.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter_map(|row| search_row(row, view, &query))
        .collect()
}

fn search_row(mut row: Row, view: &ViewSpec, query: &str) -> Option<Row> {
    if row_matches(&row, view.searchable_fields, query) {
        return Some(row);
    }

    let child_key = view.child_key?;
    let matching_children: Vec<Row> = row
        .children(child_key)
        .into_iter()
        .filter(|child| row_matches(child, view.child_searchable_fields, query))
        .cloned()
        .collect();

    if matching_children.is_empty() {
        return None;
    }

    row.insert(child_key, FieldValue::from(matching_children));

    Some(row)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::view::{APPROVED_CAMPAIGNS, REQUESTS};
    use pretty_assertions::assert_eq;
    use primitives::test_util::{rows, DUMMY_REQUESTS};
    use serde_json::json;

    #[test]
    fn empty_query_is_identity() {
        let requests = DUMMY_REQUESTS.clone();

        assert_eq!(requests, apply_search(requests.clone(), &REQUESTS, ""));
        assert_eq!(requests, apply_search(requests.clone(), &REQUESTS, "   "));
    }

    #[test]
    fn case_insensitive_substring() {
        let rows = rows([json!({ "name": "ABCX" }), json!({ "name": "xyz" })]);

        let found = apply_search(rows.clone(), &APPROVED_CAMPAIGNS, "abc");

        assert_eq!(vec![rows[0].clone()], found);
    }

    #[test]
    fn null_and_missing_fields_never_match() {
        let rows = rows([
            json!({ "campaign_name": null, "device": "mobile" }),
            json!({ "country": "null" }),
        ]);

        let found = apply_search(rows.clone(), &APPROVED_CAMPAIGNS, "null");

        assert_eq!(vec![rows[1].clone()], found);
    }

    #[test]
    fn only_listed_fields_are_searched() {
        let rows = rows([json!({ "campaign_name": "Spring", "tracking_link": "https://abc.example" })]);

        assert!(apply_search(rows, &APPROVED_CAMPAIGNS, "abc").is_empty());
    }

    #[test]
    fn parent_is_narrowed_to_matching_children() {
        let parent = json!({
            "request_name": "ParentA",
            "campaigns": [{ "campaign_name": "foo" }, { "campaign_name": "bar" }]
        });

        let found = apply_search(rows([parent]), &REQUESTS, "foo");

        assert_eq!(
            rows([json!({
                "request_name": "ParentA",
                "campaigns": [{ "campaign_name": "foo" }]
            })]),
            found
        );
    }

    #[test]
    fn matching_parent_keeps_all_children() {
        let parent = json!({
            "request_name": "Foo request",
            "campaigns": [{ "campaign_name": "foo" }, { "campaign_name": "bar" }]
        });

        let found = apply_search(rows([parent.clone()]), &REQUESTS, "FOO");

        assert_eq!(rows([parent]), found);
    }

    #[test]
    fn keeps_order_of_matches() {
        let found = apply_search(DUMMY_REQUESTS.clone(), &REQUESTS, "e");

        let ids: Vec<String> = found
            .iter()
            .filter_map(|row| row.identity())
            .map(ToString::to_string)
            .collect();

        assert_eq!(vec!["req-1", "req-2", "req-3"], ids);
    }
}
