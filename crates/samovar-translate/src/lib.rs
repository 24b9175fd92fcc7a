//! Thin client for the Yandex Translate REST API.

pub mod client;
pub mod error;

pub use client::TranslateClient;
pub use error::TranslateError;
