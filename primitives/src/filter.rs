use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::StatusCategory;

/// An inclusive range of calendar days, either bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether the day of `datetime` lies within the set bounds (both inclusive).
    pub fn contains(&self, datetime: DateTime<Utc>) -> bool {
        let day = datetime.date_naive();

        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

/// The structured filter of a list view.
///
/// Every field left empty imposes no constraint and the [`Default`] filter is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter {
    pub statuses: BTreeSet<StatusCategory>,
    /// Platform names, matched as case-insensitive substrings.
    pub platforms: BTreeSet<String>,
    pub devices: BTreeSet<String>,
    pub requester: String,
    pub client_name: String,
    pub country: String,
    pub request_date: DateRange,
    pub campaign_date: DateRange,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.platforms.iter().all(|platform| platform.trim().is_empty())
            && self.devices.iter().all(|device| device.trim().is_empty())
            && self.requester.trim().is_empty()
            && self.client_name.trim().is_empty()
            && self.country.trim().is_empty()
            && !self.request_date.is_active()
            && !self.campaign_date.is_active()
    }

    pub fn with_status(mut self, status: StatusCategory) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.insert(platform.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.devices.insert(device.into());
        self
    }
}
