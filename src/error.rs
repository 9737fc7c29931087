//! Error types for Insightly API operations.

use thiserror::Error;

/// Errors that can occur during Insightly API operations.
#[derive(Debug, Error)]
pub enum InsightlyError {
    /// Configuration is missing or incomplete.
    #[error("Insightly configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument cannot be used (e.g. a zero page size).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed with a non-success status.
    #[error("Insightly API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

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

impl InsightlyError {
    /// True for failures raised while talking to the server: network errors,
    /// non-2xx statuses, rate limiting and missing entities.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::HttpError(_) | Self::RateLimited { .. } | Self::NotFound { .. }
        )
    }

    /// True when a response arrived but its body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// HTTP status attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Turn a 404 `ApiError` into [`InsightlyError::NotFound`] for the given entity.
    pub(crate) fn into_not_found(self, entity_type: &'static str, id: impl ToString) -> Self {
        match self {
            Self::ApiError {
                status_code: Some(404),
                ..
            } => Self::NotFound {
                entity_type,
                id: id.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for Insightly operations.
pub type Result<T> = core::result::Result<T, InsightlyError>;
