//! Error types for pii-dlp

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DlpError>;

#[derive(Error, Debug)]
pub enum DlpError {
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    #[error("DLP API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
