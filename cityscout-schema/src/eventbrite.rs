use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Eventbrite `/v3/events/search/` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventSearchResponse {
    pub events: Vec<EventItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventItem {
    pub url: String,
    pub name: MultipartText,
    pub start: EventTime,

    /// Eventbrite leaves this null for events without a short description.
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultipartText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventTime {
    pub utc: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default)]
    pub object_count: Option<u64>,
    #[serde(default)]
    pub page_number: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u64>,
    #[serde(default)]
    pub has_more_items: Option<bool>,
}
