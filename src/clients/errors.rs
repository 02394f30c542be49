//! Transport-level error types.
//!
//! These surface after the HTTP round trip, in contrast to the binding and
//! link errors raised before dispatch. Non-2xx statuses become
//! [`HttpError::Status`] unless the invoked operation declares an absence
//! mapping for them.

use thiserror::Error;

/// Errors from the HTTP round trip.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or the response not read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status the operation does not
    /// map to absence.
    #[error("unexpected HTTP status {code}: {body}")]
    Status {
        /// The response status code.
        code: u16,
        /// The raw response body, useful for the server's error detail.
        body: String,
    },
}

impl HttpError {
    /// The response status code, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(source) => source.status().map(|status| status.as_u16()),
            Self::Status { code, .. } => Some(*code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_code_and_body() {
        let error = HttpError::Status {
            code: 409,
            body: "datacenter still holds racks".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("409"));
        assert!(message.contains("racks"));
    }

    #[test]
    fn test_status_accessor() {
        let error = HttpError::Status {
            code: 500,
            body: String::new(),
        };
        assert_eq!(error.status(), Some(500));
    }
}
