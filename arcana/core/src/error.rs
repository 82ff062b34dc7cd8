//! Error Types
//!
//! Errors observed by the request/render pipeline. Transport errors stop at the
//! [`RequestCoordinator`](crate::coordinator::RequestCoordinator): it folds every
//! one of them into a uniform failed outcome, so nothing below the coordinator
//! ever branches on a specific network failure.

use thiserror::Error;

/// Errors produced by an [`ApiTransport`](crate::backend::ApiTransport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the backend at all
    #[error("failed to connect to {url}: {message}")]
    Connect {
        /// URL that was attempted
        url: String,
        /// Underlying error description
        message: String,
    },

    /// Backend did not answer within the configured timeout
    #[error("request to {url} timed out")]
    Timeout {
        /// URL that was attempted
        url: String,
    },

    /// Backend answered with a non-2xx status
    #[error("Erro {status}: {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase (may be empty)
        reason: String,
    },

    /// Response body was not valid JSON
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Any other request-building or I/O failure
    #[error("request failed: {0}")]
    Request(String),

    /// The request was abandoned because a newer one superseded it
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Whether this error only reports a cancellation
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(ToString::to_string).unwrap_or_default();

        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_connect() {
            Self::Connect {
                url,
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Local input rejected before any network call
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The question box was empty (after trimming)
    #[error("question is empty")]
    EmptyQuestion,

    /// The search box was empty (after trimming)
    #[error("search query is empty")]
    EmptyQuery,

    /// A card lookup was requested without an identifier
    #[error("card identifier is empty")]
    EmptyCardId,
}
