use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::TryFrom;
use thiserror::Error;

use crate::{FieldKey, FieldValue};

/// The keys tried, in order, for the identity of a [`Row`].
pub const IDENTITY_KEYS: [&str; 2] = ["id", "campaign_id"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("A Row should be a JSON object, got: {0}")]
pub struct NotAnObject(pub String);

/// One record of a list view (a request or a campaign).
///
/// The field set is not fixed, different rows may expose different keys.
/// Keys keep the order in which they were inserted (or received from the backend).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Row {
    fields: Vec<(FieldKey, FieldValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == key).then_some(value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts the value, replacing it in place if the key already exists.
    ///
    /// Returns the previous value, if there was one.
    pub fn insert(&mut self, key: impl Into<FieldKey>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        let key = key.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(field, _)| *field == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let position = self.fields.iter().position(|(field, _)| field == key)?;

        Some(self.fields.remove(position).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// The stable identity of the row: `id`, falling back to `campaign_id`.
    pub fn identity(&self) -> Option<&FieldValue> {
        self.first_present(&IDENTITY_KEYS)
    }

    /// The first non-blank value among the given keys, tried in order.
    pub fn first_present(&self, keys: &[&str]) -> Option<&FieldValue> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_blank())
    }

    /// Lowercased text of a field, an empty string if the field is missing.
    pub fn search_text(&self, key: &str) -> String {
        self.get(key)
            .map(FieldValue::as_search_text)
            .unwrap_or_default()
    }

    /// The nested rows under `key`, empty if the field is missing or not a list.
    pub fn children(&self, key: &str) -> Vec<&Row> {
        self.get(key).map(|value| value.rows().collect()).unwrap_or_default()
    }
}

impl<K: Into<FieldKey>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }

        row
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from(value)))
                .collect(),
        }
    }
}

impl TryFrom<Value> for Row {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(NotAnObject(other.to_string())),
        }
    }
}

impl From<Row> for Value {
    fn from(row: Row) -> Self {
        Value::Object(
            row.fields
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )
    }
}
