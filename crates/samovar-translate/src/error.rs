//! Translate-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
