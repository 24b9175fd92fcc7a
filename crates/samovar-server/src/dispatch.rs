//! Action dispatch: one named action maps to one downstream call.
//!
//! Every downstream failure is caught here and normalized into an error
//! response; nothing escapes to the transport. A failed action leaves the
//! context log unchanged.

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use samovar_calendar::{Calendar, CalendarClient, CalendarError};
use samovar_core::config::{CalendarSelection, Config};
use samovar_disk::{DiskClient, DiskError};
use samovar_translate::{TranslateClient, TranslateError};

use crate::context::ContextProcessor;

/// Event window when the caller does not pass `days`.
pub const DEFAULT_EVENT_WINDOW_DAYS: i64 = 7;
/// Upper bound on the requested event window.
pub const MAX_EVENT_WINDOW_DAYS: i64 = 365;
/// Target language when the caller does not pass `lang`.
pub const DEFAULT_TARGET_LANG: &str = "en";
/// Returned when the account has no calendars at all.
pub const NO_CALENDARS: &str = "No calendars found";

/// A named action plus its parameters, as posted by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub days: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Uniform response shape: a success payload or an error, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Success {
        data: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        events_count: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        files_count: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        original: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        translated: Option<String>,
    },
    Error {
        error: String,
    },
}

impl ActionResponse {
    /// Success carrying only rendered text.
    pub fn data(data: impl Into<String>) -> Self {
        Self::Success {
            data: data.into(),
            events_count: None,
            files_count: None,
            original: None,
            translated: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Failures from downstream services, normalized for the caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Calendar service error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Disk service error: {0}")]
    Disk(#[from] DiskError),

    #[error("Translate service error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Configured calendar not found: {0}")]
    CalendarNotFound(String),
}

/// Dispatch tunables derived from configuration.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    pub calendar_selection: CalendarSelection,
    /// Pins a specific calendar, overriding the selection policy.
    pub calendar_id: Option<String>,
    pub disk_list_limit: u32,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            calendar_selection: CalendarSelection::First,
            calendar_id: None,
            disk_list_limit: 15,
        }
    }
}

impl DispatchPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            calendar_selection: config.calendar.selection,
            calendar_id: config.calendar.calendar_id.clone(),
            disk_list_limit: config.disk.list_limit,
        }
    }
}

/// Routes actions to service clients and accumulates results into one
/// context log for its whole lifetime.
pub struct Dispatcher {
    calendar: CalendarClient,
    disk: DiskClient,
    translator: TranslateClient,
    policy: DispatchPolicy,
    context: Mutex<ContextProcessor>,
}

impl Dispatcher {
    pub fn new(
        calendar: CalendarClient,
        disk: DiskClient,
        translator: TranslateClient,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            calendar,
            disk,
            translator,
            policy,
            context: Mutex::new(ContextProcessor::new()),
        }
    }

    /// Handle one request and return a response for the caller.
    pub async fn handle(&self, request: ActionRequest) -> ActionResponse {
        tracing::info!(action = %request.action, "Dispatching action");

        let result = match request.action.as_str() {
            "fetch_events" => {
                self.fetch_events(request.days.unwrap_or(DEFAULT_EVENT_WINDOW_DAYS))
                    .await
            }
            "fetch_files" => self.fetch_files().await,
            "translate" => match request.text {
                Some(ref text) => {
                    let lang = request.lang.as_deref().unwrap_or(DEFAULT_TARGET_LANG);
                    self.translate_text(text, lang).await
                }
                None => {
                    return ActionResponse::error("translate requires a 'text' parameter");
                }
            },
            "get_context" => Ok(self.get_context()),
            other => {
                return ActionResponse::error(format!("unknown action: {}", other));
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(action = %request.action, error = %e, "Action failed");
                ActionResponse::error(e.to_string())
            }
        }
    }

    async fn fetch_events(&self, days: i64) -> Result<ActionResponse, DispatchError> {
        let calendars = self.calendar.list_calendars().await?;

        let Some(calendar) = self.select_calendar(&calendars)? else {
            return Ok(ActionResponse::data(NO_CALENDARS));
        };

        let days = days.clamp(0, MAX_EVENT_WINDOW_DAYS);
        let from = Utc::now();
        let to = from + chrono::Duration::days(days);
        let events = self.calendar.list_events(&calendar.id, from, to).await?;

        let data = self.context.lock().record_events(&events);
        Ok(ActionResponse::Success {
            data,
            events_count: Some(events.len()),
            files_count: None,
            original: None,
            translated: None,
        })
    }

    async fn fetch_files(&self) -> Result<ActionResponse, DispatchError> {
        let files = self
            .disk
            .list_files("/", self.policy.disk_list_limit)
            .await?;

        let data = self.context.lock().record_files(&files);
        Ok(ActionResponse::Success {
            data,
            events_count: None,
            files_count: Some(files.len()),
            original: None,
            translated: None,
        })
    }

    async fn translate_text(
        &self,
        text: &str,
        lang: &str,
    ) -> Result<ActionResponse, DispatchError> {
        let translated = self.translator.translate(text, lang).await?;

        let data = self.context.lock().record_translation(text, &translated);
        Ok(ActionResponse::Success {
            data,
            events_count: None,
            files_count: None,
            original: Some(text.to_string()),
            translated: Some(translated),
        })
    }

    fn get_context(&self) -> ActionResponse {
        ActionResponse::data(self.context.lock().render())
    }

    /// Pick the calendar to read. A pinned id must exist in the listing;
    /// otherwise the selection policy applies.
    fn select_calendar<'a>(
        &self,
        calendars: &'a [Calendar],
    ) -> Result<Option<&'a Calendar>, DispatchError> {
        if let Some(id) = &self.policy.calendar_id {
            return calendars
                .iter()
                .find(|c| &c.id == id)
                .map(Some)
                .ok_or_else(|| DispatchError::CalendarNotFound(id.clone()));
        }

        Ok(match self.policy.calendar_selection {
            CalendarSelection::First => calendars.first(),
            CalendarSelection::Primary => calendars
                .iter()
                .find(|c| c.primary)
                .or_else(|| calendars.first()),
        })
    }
}
