//! Error handling for rcookie

use thiserror::Error;

/// Main error type for rcookie operations
#[derive(Error, Debug)]
pub enum RcookieError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Malformed cookie jar line {line}: {reason}")]
    MalformedJar { line: usize, reason: String },

    #[error("Cookie store rejected cookie: {0}")]
    StoreRejected(String),

    #[error("No cookies captured for {0}")]
    NoCookies(String),
}

/// Result type alias for rcookie operations
pub type Result<T> = std::result::Result<T, RcookieError>;
