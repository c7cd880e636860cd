//! The list views of the dashboard and the fixed field lists each of them works with.
use parse_display::{Display, FromStr};

/// Keys tried, in order, for the status of a row.
pub const STATUS_FIELDS: [&str; 2] = ["status", "campaign_status"];
/// Keys tried, in order, for the platform of a row.
pub const PLATFORM_FIELDS: [&str; 2] = ["platform", "platform_name"];
/// Key under which nested views expose their child rows.
pub const CHILDREN_KEY: &str = "campaigns";
/// Fallback key for the child rows, normalized to [`CHILDREN_KEY`].
pub const CHILDREN_FALLBACK_KEY: &str = "children";

const REQUEST_DATE_FIELDS: [&str; 3] = ["requested_at", "created_at", "createdAt"];
const CAMPAIGN_DATE_FIELDS: [&str; 4] = ["campaign_date", "start_date", "created_at", "createdAt"];

#[derive(Debug, Display, FromStr, Clone, Copy, PartialEq, Eq, Hash)]
#[display(style = "kebab-case")]
pub enum ViewKind {
    /// All campaign creation requests, each with its nested campaigns.
    Requests,
    /// The campaigns created for a single request.
    RequestCampaigns,
    /// Campaigns which have been approved.
    ApprovedCampaigns,
}

impl ViewKind {
    pub fn spec(&self) -> &'static ViewSpec {
        match self {
            Self::Requests => &REQUESTS,
            Self::RequestCampaigns => &REQUEST_CAMPAIGNS,
            Self::ApprovedCampaigns => &APPROVED_CAMPAIGNS,
        }
    }
}

/// Everything that differs between the list views.
#[derive(Debug, PartialEq, Eq)]
pub struct ViewSpec {
    pub kind: ViewKind,
    /// The named slot under which the visible columns are persisted.
    pub storage_key: &'static str,
    /// The backend list endpoint, `{request_id}` is replaced for request scoped views.
    pub endpoint: &'static str,
    /// Columns in this order come first, the rest are sorted alphabetically.
    pub preferred_order: &'static [&'static str],
    /// Columns shown when there is no (valid) persisted preference.
    pub default_visible: &'static [&'static str],
    /// Keys tried, in order, for the name of a row. Used by name sorting & device filtering.
    pub name_fields: &'static [&'static str],
    pub searchable_fields: &'static [&'static str],
    /// Key of the nested child rows, if the view has any.
    pub child_key: Option<&'static str>,
    pub child_searchable_fields: &'static [&'static str],
    /// The first of these present in the sample row is the date to sort by.
    pub date_sort_candidates: &'static [&'static str],
    pub request_date_fields: &'static [&'static str],
    pub campaign_date_fields: &'static [&'static str],
    /// Whether an `approved` status counts as `Created` in the status filter.
    pub approved_is_created: bool,
}

impl ViewSpec {
    pub fn is_nested(&self) -> bool {
        self.child_key.is_some()
    }

    /// The endpoint path of the view, with the request id filled in.
    pub fn endpoint_for(&self, request_id: Option<&str>) -> String {
        self.endpoint
            .replace("{request_id}", request_id.unwrap_or_default())
    }
}

pub static REQUESTS: ViewSpec = ViewSpec {
    kind: ViewKind::Requests,
    storage_key: "requests_list_columns",
    endpoint: "requests",
    preferred_order: &[
        "id",
        "request_name",
        "status",
        "platform",
        "first_name",
        "last_name",
        "client_name",
        "country",
        "device",
        "requested_at",
        "created_at",
        "updated_at",
        "campaigns",
    ],
    default_visible: &[
        "request_name",
        "status",
        "platform",
        "client_name",
        "country",
        "requested_at",
    ],
    name_fields: &["request_name", "name"],
    searchable_fields: &[
        "id",
        "request_name",
        "name",
        "status",
        "platform",
        "first_name",
        "last_name",
        "client_name",
        "country",
    ],
    child_key: Some(CHILDREN_KEY),
    child_searchable_fields: &["campaign_id", "campaign_name", "status", "device"],
    date_sort_candidates: &["requested_at", "created_at", "createdAt", "updated_at"],
    request_date_fields: &REQUEST_DATE_FIELDS,
    campaign_date_fields: &CAMPAIGN_DATE_FIELDS,
    approved_is_created: false,
};

pub static REQUEST_CAMPAIGNS: ViewSpec = ViewSpec {
    kind: ViewKind::RequestCampaigns,
    storage_key: "request_campaigns_columns",
    endpoint: "requests/{request_id}/campaigns",
    preferred_order: &[
        "campaign_id",
        "campaign_name",
        "status",
        "platform",
        "device",
        "country",
        "timezone",
        "sub_folder",
        "tracking_link",
        "budget",
        "cpc",
        "created_at",
        "updated_at",
    ],
    default_visible: &["campaign_name", "status", "device", "country", "created_at"],
    name_fields: &["campaign_name", "name"],
    searchable_fields: &[
        "campaign_id",
        "campaign_name",
        "name",
        "status",
        "platform",
        "device",
        "country",
    ],
    child_key: None,
    child_searchable_fields: &[],
    date_sort_candidates: &["created_at", "createdAt", "updated_at"],
    request_date_fields: &REQUEST_DATE_FIELDS,
    campaign_date_fields: &CAMPAIGN_DATE_FIELDS,
    approved_is_created: false,
};

pub static APPROVED_CAMPAIGNS: ViewSpec = ViewSpec {
    kind: ViewKind::ApprovedCampaigns,
    storage_key: "approved_campaigns_columns",
    endpoint: "campaigns/approved",
    preferred_order: &[
        "campaign_id",
        "campaign_name",
        "platform",
        "status",
        "device",
        "country",
        "timezone",
        "sub_folder",
        "tracking_link",
        "client_name",
        "approved_at",
        "created_at",
        "updated_at",
    ],
    default_visible: &[
        "campaign_name",
        "platform",
        "status",
        "device",
        "country",
        "tracking_link",
        "created_at",
    ],
    name_fields: &["campaign_name", "name"],
    searchable_fields: &[
        "campaign_id",
        "campaign_name",
        "name",
        "status",
        "platform",
        "device",
        "country",
        "client_name",
    ],
    child_key: None,
    child_searchable_fields: &[],
    date_sort_candidates: &["approved_at", "created_at", "createdAt", "updated_at"],
    request_date_fields: &REQUEST_DATE_FIELDS,
    campaign_date_fields: &CAMPAIGN_DATE_FIELDS,
    approved_is_created: true,
};

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn view_kind_names() {
        assert_eq!(Ok(ViewKind::Requests), "requests".parse());
        assert_eq!(Ok(ViewKind::RequestCampaigns), "request-campaigns".parse());
        assert_eq!(
            "approved-campaigns",
            ViewKind::ApprovedCampaigns.to_string()
        );
    }

    #[test]
    fn endpoints() {
        assert_eq!("requests", REQUESTS.endpoint_for(None));
        assert_eq!(
            "requests/req-1/campaigns",
            ViewKind::RequestCampaigns.spec().endpoint_for(Some("req-1"))
        );
    }

    #[test]
    fn default_visible_columns_are_preferred_columns() {
        for view in [&REQUESTS, &REQUEST_CAMPAIGNS, &APPROVED_CAMPAIGNS] {
            for column in view.default_visible {
                assert!(
                    view.preferred_order.contains(column),
                    "{column} of {} is not in the preferred order",
                    view.kind
                );
            }
            assert_eq!(view, view.kind.spec());
        }
    }
}
