//! The HTTP response as seen by the rest of the crate.

use std::collections::HashMap;

/// A fully read HTTP response.
///
/// Bodies are buffered as text before parsing; Abiquo payloads are small
/// XML documents, never streams.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The response status code.
    pub code: u16,
    /// Response headers, with lowercase names.
    pub headers: HashMap<String, String>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, String>, body: String) -> Self {
        Self { code, headers, body }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// A header value by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
