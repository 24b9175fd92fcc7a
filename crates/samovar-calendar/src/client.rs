//! Yandex Calendar API client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::*;

const CALENDAR_API_BASE: &str = "https://api.calendar.yandex.ru/v3";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const EVENT_PAGE_LIMIT: u32 = 50;
const DEFAULT_TIME_ZONE: &str = "Europe/Moscow";

pub struct CalendarClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(access_token: &str) -> Result<Self, CalendarError> {
        Self::with_base_url(access_token, CALENDAR_API_BASE)
    }

    /// Client against a non-default endpoint (tests, mirrors).
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self, CalendarError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.access_token)
    }

    /// List all calendars visible to the token.
    #[instrument(skip(self), level = "info")]
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>, CalendarError> {
        let url = format!("{}/calendars/", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let resp: CalendarListResponse = self.handle_response(response).await?;
        Ok(resp.calendars)
    }

    /// List events in `[from, to)` for a calendar.
    #[instrument(skip(self), level = "info")]
    pub async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, CalendarError> {
        let url = format!(
            "{}/calendars/{}/events/?from={}&to={}&limit={}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&from.to_rfc3339()),
            urlencoding::encode(&to.to_rfc3339()),
            EVENT_PAGE_LIMIT,
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let resp: EventListResponse = self.handle_response(response).await?;
        Ok(resp.events)
    }

    /// Create a new event.
    #[instrument(skip(self), level = "info")]
    pub async fn create_event(
        &self,
        calendar_id: &str,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<&str>,
    ) -> Result<Event, CalendarError> {
        let url = format!(
            "{}/calendars/{}/events/",
            self.base_url,
            urlencoding::encode(calendar_id),
        );

        let mut body = serde_json::json!({
            "summary": title,
            "start": { "dateTime": start.to_rfc3339(), "timeZone": DEFAULT_TIME_ZONE },
            "end": { "dateTime": end.to_rfc3339(), "timeZone": DEFAULT_TIME_ZONE },
        });

        if let Some(desc) = description {
            body["description"] = serde_json::Value::String(desc.to_string());
        }

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::InvalidResponse(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(CalendarError::Unauthorized)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_calendars() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/"))
            .and(header("Authorization", "OAuth test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "calendars": [
                    {"id": "cal1", "name": "Personal", "primary": true},
                    {"id": "cal2", "name": "Work"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri()).unwrap();
        let calendars = client.list_calendars().await.unwrap();

        assert_eq!(calendars.len(), 2);
        assert!(calendars[0].primary);
        assert_eq!(calendars[1].id, "cal2");
    }

    #[tokio::test]
    async fn test_list_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/cal1/events/"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    {
                        "id": "ev1",
                        "summary": "Meeting",
                        "start": {"dateTime": "2026-03-01T10:00:00+03:00"},
                        "end": {"dateTime": "2026-03-01T11:00:00+03:00"}
                    },
                    {"id": "ev2"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri()).unwrap();
        let from = DateTime::parse_from_rfc3339("2026-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let to = from + chrono::Duration::days(7);

        let events = client.list_events("cal1", from, to).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary.as_deref(), Some("Meeting"));
        assert!(events[1].summary.is_none());
    }

    #[tokio::test]
    async fn test_create_event() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendars/cal1/events/"))
            .and(header("Authorization", "OAuth test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "ev_new",
                "summary": "Review",
                "start": {"dateTime": "2026-03-02T15:00:00+03:00"},
                "end": {"dateTime": "2026-03-02T16:00:00+03:00"}
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri()).unwrap();
        let start = DateTime::parse_from_rfc3339("2026-03-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = start + chrono::Duration::hours(1);

        let event = client
            .create_event("cal1", "Review", start, end, Some("Quarterly review"))
            .await
            .unwrap();

        assert_eq!(event.id.as_deref(), Some("ev_new"));
        assert_eq!(event.summary.as_deref(), Some("Review"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("bad_token", &mock_server.uri()).unwrap();
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri()).unwrap();
        let result = client.list_calendars().await;

        assert!(matches!(
            result,
            Err(CalendarError::Api { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri()).unwrap();
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::InvalidResponse(_))));
    }
}
