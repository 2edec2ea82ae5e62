//! Error types for HAL API operations.

use thiserror::Error;

use crate::models::ApiError;

/// Errors that can occur while talking to a HAL API.
#[derive(Debug, Error)]
pub enum HalError {
    /// Configuration is missing or incomplete.
    #[error("API configuration required: {0}")]
    ConfigMissing(String),

    /// A resource document had no `_type` key.
    #[error("Missing '_type' field, unknown resource type")]
    MissingType,

    /// A reserved key (or the document itself) had the wrong JSON shape.
    #[error("Malformed resource at '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// The caller expected one resource type and the server sent another.
    #[error("Resource type mismatch: expected '{expected}', got '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    /// A decoded resource was not the concrete variant the operation needs.
    #[error("Unexpected resource type '{actual}', expected {expected}")]
    UnexpectedResource {
        expected: &'static str,
        actual: String,
    },

    /// The server answered with a HAL `Error` resource.
    #[error("API error: {0}")]
    Api(ApiError),

    /// The operation is not offered for this kind of resource.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A link-dependent operation was used on a resource without that link.
    #[error("No '{0}' link")]
    MissingLink(String),

    /// A field did not hold an RFC 3339 timestamp.
    #[error("Invalid date-time in field '{field}': {source}")]
    InvalidDateTime {
        field: String,
        source: chrono::ParseError,
    },

    /// A field did not hold a `YYYY-MM-DD` date.
    #[error("Invalid date in field '{field}': {source}")]
    InvalidDate {
        field: String,
        source: chrono::ParseError,
    },

    /// A field did not hold an ISO 8601 duration.
    #[error("Invalid duration in field '{field}': '{value}'")]
    InvalidDuration { field: String, value: String },

    /// A field did not have the `{format, raw, html}` shape.
    #[error("Invalid formattable in field '{field}': {reason}")]
    InvalidFormattable { field: String, reason: String },

    /// Non-success HTTP status without a HAL error body.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl HalError {
    /// The HAL `Error` resource behind this failure, if the server sent one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<ApiError> for HalError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

/// Result type alias for HAL operations.
pub type Result<T> = core::result::Result<T, HalError>;
