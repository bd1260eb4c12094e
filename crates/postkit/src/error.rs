//! Error types for PostKit

use thiserror::Error;

/// Errors that can occur while drafting a post
///
/// Most of these never leave the pipeline: they are logged and replaced by
/// an empty value. Only [`PostError::Io`] and [`PostError::Csv`] surface from
/// the sink.
#[derive(Debug, Error)]
pub enum PostError {
    /// URL could not be parsed or has a non-HTTP scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// A service URL could not be built from its configured base
    #[error("Invalid {service} endpoint: {reason}")]
    InvalidEndpoint {
        service: &'static str,
        reason: String,
    },

    /// A required credential is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Upstream service answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    /// Upstream response did not have the expected shape
    #[error("Unexpected response from {service}: {message}")]
    UnexpectedResponse {
        service: &'static str,
        message: String,
    },

    /// Headless browser failure
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// Batch input line could not be understood
    #[error("Invalid batch line {line}: {reason}")]
    InvalidBatchLine { line: usize, reason: String },

    /// Filesystem error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PostError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PostError::Timeout
        } else if err.is_connect() {
            PostError::ConnectError(err)
        } else {
            PostError::RequestError(err.to_string())
        }
    }

    /// Shorthand for [`PostError::UnexpectedResponse`]
    pub fn unexpected(service: &'static str, message: impl Into<String>) -> Self {
        PostError::UnexpectedResponse {
            service,
            message: message.into(),
        }
    }
}
