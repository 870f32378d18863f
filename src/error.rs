//! Error types returned by the getaddress.io client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while configuring the client or performing a lookup.
///
/// Each variant maps to one failure mode of a lookup, so callers can match on
/// the variant instead of inspecting messages.
#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be configured (missing API key, bad base URL or proxy).
    #[error("{0}")]
    Configuration(String),

    /// An empty postcode was passed to [`Client::lookup`](crate::Client::lookup).
    #[error("No postcode provided")]
    EmptyPostcode,

    /// getaddress.io rejected the API key (401 or 403).
    #[error("Authentication failed with status {status}")]
    Authentication { status: StatusCode },

    /// getaddress.io found no addresses for the postcode (404).
    #[error("Postcode not found: {postcode}")]
    NotFound { postcode: String },

    /// The response body did not have the expected JSON shape.
    #[error("Failed to parse lookup response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// Any other non-success status code.
    #[error("Unexpected response status {status}")]
    Status { status: StatusCode },

    /// The HTTP request itself failed (connection, TLS, timeout, body read).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl Error {
    /// The HTTP status associated with this error, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Authentication { status } | Error::Status { status } => Some(*status),
            Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::Request(err) => err.status(),
            _ => None,
        }
    }

    /// Returns `true` when the postcode had no match.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_failures() {
        let auth = Error::Authentication {
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(auth.status(), Some(StatusCode::FORBIDDEN));

        let missing = Error::NotFound {
            postcode: "XX104JJ".into(),
        };
        assert_eq!(missing.status(), Some(StatusCode::NOT_FOUND));
        assert!(missing.is_not_found());

        let other = Error::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(other.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert!(!other.is_not_found());

        assert_eq!(Error::EmptyPostcode.status(), None);
    }

    #[test]
    fn configuration_error_displays_message_verbatim() {
        let err = Error::Configuration("No apiKey provided".into());
        assert_eq!(err.to_string(), "No apiKey provided");
    }
}
