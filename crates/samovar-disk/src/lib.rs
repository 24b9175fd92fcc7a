//! Thin client for the Yandex Disk REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::DiskClient;
pub use error::DiskError;
pub use types::{DiskInfo, Resource};
