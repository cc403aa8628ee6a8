//! Error types for the alumni portal.

use std::time::Duration;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Generative-text provider errors.
///
/// None of these ever reach an HTTP client: the chat responder downgrades
/// every one of them to a scripted reply.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Alumni store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Alumni not found: {email}")]
    NotFound { email: String },
}

/// Bulk-upload errors. All of them map to HTTP 400.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid file type. Please upload .txt or .csv files")]
    UnsupportedType { filename: String },

    #[error("Error processing file: {0}")]
    Processing(String),
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        Self::Processing(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for IngestError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Processing(e.to_string())
    }
}

/// HTTP server lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server failed to start: {reason}")]
    StartupFailed { reason: String },
}
