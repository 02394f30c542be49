//! The in-flight outgoing request.
//!
//! [`OutgoingRequest`] is the mutable builder the binder chain transforms
//! one step at a time before dispatch. It is exclusively owned by the
//! single call constructing it and never shared across operations.

use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the Abiquo API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An outgoing request under construction.
///
/// Binders rewrite `target` and attach `body`/`content_type`; the HTTP
/// client dispatches the finished value in a single round trip.
#[derive(Clone, Debug)]
pub struct OutgoingRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute target URI, including any query/matrix parameters.
    pub target: String,
    /// The Accept header value, when negotiated.
    pub accept: Option<String>,
    /// The Content-Type header value, set together with `body`.
    pub content_type: Option<String>,
    /// The serialized request body, if any.
    pub body: Option<String>,
    /// Additional headers.
    pub headers: HashMap<String, String>,
}

impl OutgoingRequest {
    /// Creates a request with a method and an absolute target URI.
    #[must_use]
    pub fn new(method: HttpMethod, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            accept: None,
            content_type: None,
            body: None,
            headers: HashMap::new(),
        }
    }

    /// Sets the Accept header.
    #[must_use]
    pub fn accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept = Some(media_type.into());
        self
    }

    /// Adds an extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_new_request_has_no_body() {
        let request = OutgoingRequest::new(HttpMethod::Get, "http://api/admin/datacenters");
        assert_eq!(request.target, "http://api/admin/datacenters");
        assert!(request.body.is_none());
        assert!(request.content_type.is_none());
        assert!(request.accept.is_none());
    }

    #[test]
    fn test_accept_and_header_builders() {
        let request = OutgoingRequest::new(HttpMethod::Get, "http://api/admin/datacenters")
            .accept("application/vnd.abiquo.datacenters+xml")
            .header("X-Trace", "on");

        assert_eq!(
            request.accept.as_deref(),
            Some("application/vnd.abiquo.datacenters+xml")
        );
        assert_eq!(request.headers.get("X-Trace").map(String::as_str), Some("on"));
    }
}
