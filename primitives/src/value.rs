use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use crate::Row;

/// A single value of a [`Row`] field.
///
/// The backend does not guarantee any field types, so every JSON value maps to a variant.
/// Nested collections (e.g. the `campaigns` of a request) are kept as [`FieldValue::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<FieldValue>),
    Object(Row),
}

impl FieldValue {
    /// `Null` and the empty string carry no information for display or date resolution.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(string) => string.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Self::Object(row) => Some(row),
            _ => None,
        }
    }

    /// The [`Row`]s of a nested list, skipping any non-object items.
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.as_list()
            .unwrap_or_default()
            .iter()
            .filter_map(FieldValue::as_row)
    }

    /// Lowercased text used for case-insensitive substring matching.
    ///
    /// `Null` is coerced to an empty string.
    pub fn as_search_text(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// Plain text of the value, `Null` being an empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(boolean) => write!(f, "{boolean}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(string) => f.write_str(string),
            Self::List(list) => {
                let items = list
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");

                f.write_str(&items)
            }
            Self::Object(row) => write!(f, "{}", Value::from(row.clone())),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(boolean) => Self::Bool(boolean),
            Value::Number(number) => Self::Number(number),
            Value::String(string) => Self::String(string),
            Value::Array(array) => Self::List(array.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(Row::from(map)),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(boolean) => Value::Bool(boolean),
            FieldValue::Number(number) => Value::Number(number),
            FieldValue::String(string) => Value::String(string),
            FieldValue::List(list) => Value::Array(list.into_iter().map(Value::from).collect()),
            FieldValue::Object(row) => Value::from(row),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(string: &str) -> Self {
        Self::String(string.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(string: String) -> Self {
        Self::String(string)
    }
}

impl From<Vec<Row>> for FieldValue {
    fn from(rows: Vec<Row>) -> Self {
        Self::List(rows.into_iter().map(Self::Object).collect())
    }
}
