//! Sorting of a list view by name or by date.
use chrono::{DateTime, Utc};
use primitives::{parse_date, Row, SortDirection, SortField, SortState};
use std::cmp::Ordering;

use crate::view::ViewSpec;

/// The first of the `candidates` present in the sample (first) row.
///
/// Resolved once per row set, `None` when there are no rows or none of the candidates is present.
pub fn detect_date_field(rows: &[Row], candidates: &'static [&'static str]) -> Option<&'static str> {
    let sample = rows.first()?;

    candidates
        .iter()
        .copied()
        .find(|candidate| sample.contains_key(candidate))
}

/// The sort field of a column header, `None` for headers which are not sortable.
pub fn sortable_field(view: &ViewSpec, date_field: Option<&str>, column: &str) -> Option<SortField> {
    if view.name_fields.contains(&column) {
        Some(SortField::Name)
    } else if date_field == Some(column) {
        Some(SortField::Date)
    } else {
        None
    }
}

fn name_key(row: &Row, view: &ViewSpec) -> String {
    row.first_present(view.name_fields)
        .map(|value| value.as_search_text())
        .unwrap_or_default()
}

/// Missing or unparsable dates are greater than any valid date.
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts the rows in place with a stable sort, ties keep their relative order.
///
/// Sorting by [`SortField::Date`] without a `date_field` leaves the rows untouched.
pub fn sort_rows(rows: &mut [Row], sort: SortState, view: &ViewSpec, date_field: Option<&str>) {
    let direct = |ordering: Ordering| match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    match sort.field {
        SortField::Name => {
            rows.sort_by(|a, b| direct(name_key(a, view).cmp(&name_key(b, view))));
        }
        SortField::Date => {
            let date_field = match date_field {
                Some(date_field) => date_field,
                None => return,
            };
            let date = |row: &Row| row.get(date_field).and_then(parse_date);

            rows.sort_by(|a, b| direct(compare_dates(date(a), date(b))));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::view::{APPROVED_CAMPAIGNS, REQUESTS};
    use pretty_assertions::assert_eq;
    use primitives::test_util::{rows, DUMMY_APPROVED_CAMPAIGNS, DUMMY_REQUESTS};
    use serde_json::json;

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|row| row.get("campaign_name").map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    fn sorted(rows: &[Row], sort: SortState, date_field: Option<&str>) -> Vec<Row> {
        let mut rows = rows.to_vec();
        sort_rows(&mut rows, sort, &APPROVED_CAMPAIGNS, date_field);
        rows
    }

    fn sort(field: SortField, direction: SortDirection) -> SortState {
        SortState { field, direction }
    }

    #[test]
    fn detects_first_candidate_of_the_sample_row() {
        assert_eq!(
            Some("requested_at"),
            detect_date_field(&DUMMY_REQUESTS, REQUESTS.date_sort_candidates)
        );
        // only the first row is sampled, even if others have earlier candidates
        let rows = rows([json!({ "created_at": "2024-01-01" }), json!({ "approved_at": "2024-01-01" })]);
        assert_eq!(
            Some("created_at"),
            detect_date_field(&rows, APPROVED_CAMPAIGNS.date_sort_candidates)
        );
        assert_eq!(None, detect_date_field(&[], REQUESTS.date_sort_candidates));
        assert_eq!(
            None,
            detect_date_field(&rows[..1], &["approved_at"])
        );
    }

    #[test]
    fn sortable_headers() {
        assert_eq!(Some(SortField::Name), sortable_field(&REQUESTS, None, "request_name"));
        assert_eq!(
            Some(SortField::Date),
            sortable_field(&REQUESTS, Some("requested_at"), "requested_at")
        );
        assert_eq!(None, sortable_field(&REQUESTS, Some("requested_at"), "created_at"));
        assert_eq!(None, sortable_field(&REQUESTS, Some("requested_at"), "country"));
    }

    #[test]
    fn by_name_case_insensitive() {
        let asc = sorted(
            &DUMMY_APPROVED_CAMPAIGNS,
            sort(SortField::Name, SortDirection::Asc),
            None,
        );

        assert_eq!(
            vec!["Autumn Promo Android", "autumn promo ios", "Spring Sale - Desktop"],
            names(&asc)
        );
    }

    #[test]
    fn by_name_ties_keep_their_order() {
        let rows = rows([
            json!({ "campaign_name": "B", "n": 1 }),
            json!({ "campaign_name": "a", "n": 2 }),
            json!({ "campaign_name": "b", "n": 3 }),
        ]);

        let asc = sorted(&rows, sort(SortField::Name, SortDirection::Asc), None);
        let desc = sorted(&rows, sort(SortField::Name, SortDirection::Desc), None);

        assert_eq!(vec![rows[1].clone(), rows[0].clone(), rows[2].clone()], asc);
        assert_eq!(vec![rows[0].clone(), rows[2].clone(), rows[1].clone()], desc);
    }

    #[test]
    fn invalid_dates_are_last_ascending_and_first_descending() {
        let rows = rows([
            json!({ "campaign_name": "none", "created_at": null }),
            json!({ "campaign_name": "march", "created_at": "2024-03-01" }),
            json!({ "campaign_name": "bad", "created_at": "soon" }),
            json!({ "campaign_name": "january", "created_at": "2024-01-05" }),
        ]);

        let asc = sorted(&rows, sort(SortField::Date, SortDirection::Asc), Some("created_at"));
        let desc = sorted(&rows, sort(SortField::Date, SortDirection::Desc), Some("created_at"));

        assert_eq!(vec!["january", "march", "none", "bad"], names(&asc));
        assert_eq!(vec!["none", "bad", "march", "january"], names(&desc));
    }

    #[test]
    fn date_sort_without_a_date_field_is_a_no_op() {
        let rows = DUMMY_APPROVED_CAMPAIGNS.clone();

        assert_eq!(rows, sorted(&rows, SortState::default(), None));
    }

    #[test]
    fn sorting_is_idempotent() {
        for state in [
            sort(SortField::Name, SortDirection::Asc),
            sort(SortField::Name, SortDirection::Desc),
            sort(SortField::Date, SortDirection::Asc),
            sort(SortField::Date, SortDirection::Desc),
        ] {
            let once = sorted(&DUMMY_APPROVED_CAMPAIGNS, state, Some("created_at"));
            let twice = sorted(&once, state, Some("created_at"));

            assert_eq!(once, twice, "sort: {state:?}");
        }
    }

    #[test]
    fn flipping_direction_reverses_tie_free_rows() {
        let rows = rows([
            json!({ "campaign_name": "c", "created_at": "2024-01-03" }),
            json!({ "campaign_name": "a", "created_at": "2024-01-01" }),
            json!({ "campaign_name": "b", "created_at": "2024-01-02" }),
        ]);

        for field in [SortField::Name, SortField::Date] {
            let asc = sorted(&rows, sort(field, SortDirection::Asc), Some("created_at"));
            let mut desc = sorted(&asc, sort(field, SortDirection::Desc), Some("created_at"));
            desc.reverse();

            assert_eq!(asc, desc, "field: {field}");
        }
    }
}
