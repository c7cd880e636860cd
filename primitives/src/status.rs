use parse_display::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const ERROR_MARKERS: [&str; 3] = ["fail", "timeout", "error"];
const CREATED_MARKERS: [&str; 1] = ["created"];
const APPROVED_MARKERS: [&str; 1] = ["approved"];

const SUCCESS_MARKERS: [&str; 6] = ["completed", "created", "done", "success", "ok", "ready"];
const WARNING_MARKERS: [&str; 6] = [
    "processing",
    "running",
    "sent",
    "pending",
    "progress",
    "building",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// The semantic category a free-text status is filtered by.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StatusCategory {
    Error,
    Created,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 2] = [StatusCategory::Error, StatusCategory::Created];

    /// Classifies a raw status text by substring heuristics.
    ///
    /// Error markers take precedence, so `"created with error"` is an [`StatusCategory::Error`].
    /// `approved_is_created` makes `"approved"` count as [`StatusCategory::Created`],
    /// which is the case for the approved campaigns view.
    /// Returns `None` for statuses that fit neither category.
    pub fn classify(raw: &str, approved_is_created: bool) -> Option<Self> {
        let status = raw.to_lowercase();

        if contains_any(&status, &ERROR_MARKERS) {
            Some(Self::Error)
        } else if contains_any(&status, &CREATED_MARKERS)
            || (approved_is_created && contains_any(&status, &APPROVED_MARKERS))
        {
            Some(Self::Created)
        } else {
            None
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown status category '{0}', expected one of: Error, Created")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusCategory {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Display tone derived from a status text, used when showing a single record.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Error,
    Success,
    Warning,
    Neutral,
}

impl StatusTone {
    pub fn classify(raw: &str) -> Self {
        let status = raw.to_lowercase();

        if status.contains("error") {
            Self::Error
        } else if contains_any(&status, &SUCCESS_MARKERS) {
            Self::Success
        } else if contains_any(&status, &WARNING_MARKERS) {
            Self::Warning
        } else {
            Self::Neutral
        }
    }
}
