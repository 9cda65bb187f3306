//! Error types for user searches

use thiserror::Error;

/// Errors surfaced by the query builder and the paginated searcher.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No filter criterion was supplied.
    #[error("Must specify at least one search parameter (min followers, min repos or language)")]
    InvalidCriteria,

    /// The transport could not fulfil a page request.
    #[error("Search transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors raised by a [`SearchTransport`](crate::transport::SearchTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, timeout or other client-side HTTP error.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Search API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood.
    #[error("Malformed search response: {0}")]
    Malformed(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Check if the backend rejected the request for rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status { status: 403 | 429, .. })
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

impl From<url::ParseError> for TransportError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

/// Result alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
