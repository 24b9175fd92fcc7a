//! Thin client for the Yandex Calendar REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use types::{Calendar, Event, EventTime};
