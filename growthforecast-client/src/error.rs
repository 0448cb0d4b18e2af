//! Error types for the GrowthForecast client.

use thiserror::Error;

/// Errors that can occur when using the GrowthForecast client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connect, timeout, TLS), passed through unmodified.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered 404.
    #[error("status:{status}\turi:{uri}\tmessage:{body}")]
    NotFound {
        /// HTTP status code.
        status: u16,
        /// Fully-qualified request URI.
        uri: String,
        /// Raw response body.
        body: String,
    },

    /// The server answered 409.
    #[error("status:{status}\turi:{uri}\tmessage:{body}")]
    AlreadyExists {
        /// HTTP status code.
        status: u16,
        /// Fully-qualified request URI.
        uri: String,
        /// Raw response body.
        body: String,
    },

    /// The server answered with any other non-200 status.
    #[error("status:{status}\turi:{uri}\tmessage:{body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Fully-qualified request URI.
        uri: String,
        /// Raw response body.
        body: String,
    },

    /// Failed to serialize a request or deserialize a response.
    #[error("JSON serialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Classify a non-200 HTTP status into the matching error kind.
    pub fn from_status(status: u16, uri: impl Into<String>, body: impl Into<String>) -> Self {
        let uri = uri.into();
        let body = body.into();
        match status {
            404 => Self::NotFound { status, uri, body },
            409 => Self::AlreadyExists { status, uri, body },
            _ => Self::RequestFailed { status, uri, body },
        }
    }

    /// Whether this error is a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is a 409 from the server.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::AlreadyExists { status, .. }
            | Self::RequestFailed { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short name of the error kind, used in bulk-operation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "Http",
            Self::NotFound { .. } => "NotFound",
            Self::AlreadyExists { .. } => "AlreadyExists",
            Self::RequestFailed { .. } => "RequestFailed",
            Self::Deserialize(_) => "Deserialize",
            Self::InvalidUrl(_) => "InvalidUrl",
            Self::InvalidResponse(_) => "InvalidResponse",
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
