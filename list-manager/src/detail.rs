//! Projection of a single row for its detail overlay.
use primitives::{FieldValue, Row, StatusTone};

use crate::view::STATUS_FIELDS;

/// Identifiers which are never shown as details.
pub const HIDDEN_FIELDS: [&str; 5] = ["id", "_id", "campaign_id", "request_id", "user_id"];
/// Shown for `null` & empty values.
pub const PLACEHOLDER: &str = "-";

const TITLE_FIELDS: [&str; 3] = ["request_name", "campaign_name", "name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// A side panel next to the list.
    #[default]
    Panel,
    FullScreen,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Panel => Self::FullScreen,
            Self::FullScreen => Self::Panel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub key: String,
    /// The humanized key, e.g. `Client Name` for `client_name`.
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: Option<String>,
    /// Tone of the row's status, if it has one.
    pub tone: Option<StatusTone>,
    /// In the row's field order, without the [`HIDDEN_FIELDS`].
    pub entries: Vec<DetailEntry>,
    pub mode: DisplayMode,
}

impl DetailView {
    pub fn project(row: &Row, mode: DisplayMode) -> Self {
        let entries = row
            .iter()
            .filter(|(key, _)| !HIDDEN_FIELDS.contains(key))
            .map(|(key, value)| DetailEntry {
                key: key.to_string(),
                label: humanize_key(key),
                value: display_value(value),
            })
            .collect();

        Self {
            title: row.first_present(&TITLE_FIELDS).map(ToString::to_string),
            tone: row
                .first_present(&STATUS_FIELDS)
                .map(|status| StatusTone::classify(&status.to_string())),
            entries,
            mode,
        }
    }

    /// Switches between the panel & full screen, the entries are untouched.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    pub fn get(&self, key: &str) -> Option<&DetailEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}

/// `snake_case`, `kebab-case` & `camelCase` keys to `Title Case`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            words.extend((!current.is_empty()).then(|| std::mem::take(&mut current)));
            continue;
        }

        if c.is_uppercase() && current.chars().last().map_or(false, char::is_lowercase) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    words.extend((!current.is_empty()).then(|| current));

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The value as shown in the details, lists are shown as their count of items.
pub fn display_value(value: &FieldValue) -> String {
    match value {
        value if value.is_blank() => PLACEHOLDER.to_string(),
        FieldValue::List(items) if items.is_empty() => PLACEHOLDER.to_string(),
        FieldValue::List(items) if items.len() == 1 => "1 item".to_string(),
        FieldValue::List(items) => format!("{} items", items.len()),
        FieldValue::Bool(true) => "Yes".to_string(),
        FieldValue::Bool(false) => "No".to_string(),
        value => value.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::test_util::{row, DUMMY_REQUESTS};
    use serde_json::json;

    #[test]
    fn humanized_keys() {
        let cases = [
            ("client_name", "Client Name"),
            ("createdAt", "Created At"),
            ("sub-folder", "Sub Folder"),
            ("cpc", "Cpc"),
            ("__private__key", "Private Key"),
        ];

        for (key, expected) in cases {
            assert_eq!(expected, humanize_key(key), "key: {key}");
        }
    }

    #[test]
    fn projects_a_request() {
        let detail = DetailView::project(&DUMMY_REQUESTS[0], DisplayMode::default());

        assert_eq!(Some("Spring Sale".to_string()), detail.title);
        assert_eq!(Some(StatusTone::Success), detail.tone);
        assert!(detail.get("id").is_none());
        assert_eq!(
            Some(&DetailEntry {
                key: "client_name".into(),
                label: "Client Name".into(),
                value: "Acme Shoes".into(),
            }),
            detail.get("client_name")
        );
        assert_eq!(Some("2 items"), detail.get("campaigns").map(|entry| entry.value.as_str()));
        assert_eq!("request_name", detail.entries[0].key);
    }

    #[test]
    fn placeholders_and_tones() {
        let campaign = row(json!({
            "campaign_id": "c-1",
            "user_id": 7,
            "campaign_status": "Building creatives",
            "device": null,
            "headline": "  ",
            "budget": 12.5,
            "active": false,
            "children": []
        }));

        let detail = DetailView::project(&campaign, DisplayMode::FullScreen);

        let values: Vec<(&str, &str)> = detail
            .entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
            .collect();
        assert_eq!(
            vec![
                ("campaign_status", "Building creatives"),
                ("device", "-"),
                ("headline", "-"),
                ("budget", "12.5"),
                ("active", "No"),
                ("children", "-"),
            ],
            values
        );
        assert_eq!(Some(StatusTone::Warning), detail.tone);
        assert_eq!(None, detail.title);
    }

    #[test]
    fn toggling_the_mode_keeps_the_entries() {
        let mut detail = DetailView::project(&DUMMY_REQUESTS[1], DisplayMode::Panel);
        let entries = detail.entries.clone();

        detail.toggle_mode();
        assert_eq!(DisplayMode::FullScreen, detail.mode);
        detail.toggle_mode();

        assert_eq!(DisplayMode::Panel, detail.mode);
        assert_eq!(entries, detail.entries);
        assert_eq!(Some(StatusTone::Neutral), detail.tone);
    }
}
