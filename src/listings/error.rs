//! Listing provider error types

use thiserror::Error;

/// Listing provider error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ListingError {
    pub kind: ListingErrorKind,
    pub message: String,
}

impl ListingError {
    pub fn new(kind: ListingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Auth, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Decode, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::ServerError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Unknown, message)
    }

    /// Map a transport-level reqwest failure
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::network(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            Self::network(format!("Connection failed: {e}"))
        } else {
            Self::unknown(format!("Request failed: {e}"))
        }
    }
}

/// Error classification, used for logging only; the core never retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingErrorKind {
    /// Network issues, timeouts
    Network,
    /// Token request rejected (401, 403)
    Auth,
    /// Response body was not the expected JSON
    Decode,
    /// Server error (5xx)
    ServerError,
    /// Bad request (400)
    InvalidRequest,
    /// Unknown error
    Unknown,
}

impl ListingErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Decode => "decode",
            Self::ServerError => "server_error",
            Self::InvalidRequest => "invalid_request",
            Self::Unknown => "unknown",
        }
    }
}
