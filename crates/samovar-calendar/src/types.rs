//! Calendar API types.
//!
//! Event fields the upstream may omit stay optional; the consumer decides
//! how to render a missing title or start time.

use serde::Deserialize;

/// Calendar metadata from the calendars listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Calendar {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

/// A calendar event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
}

impl Event {
    /// Start time as the raw upstream string, if present.
    pub fn start_date_time(&self) -> Option<&str> {
        self.start.as_ref().and_then(|t| t.date_time.as_deref())
    }
}

/// Event boundary time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Envelope for the calendars listing.
#[derive(Debug, Deserialize)]
pub struct CalendarListResponse {
    #[serde(default)]
    pub calendars: Vec<Calendar>,
}

/// Envelope for an event listing.
#[derive(Debug, Deserialize)]
pub struct EventListResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}
