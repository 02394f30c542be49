//! HTTP transport for the Abiquo API.
//!
//! [`HttpClient`] wraps a [`reqwest::Client`] with the default headers
//! every Abiquo request carries (User-Agent and Authorization) and turns
//! an [`OutgoingRequest`] into a buffered [`HttpResponse`]. It does not
//! interpret statuses beyond reading the body; absence mappings and error
//! conversion live in the operation layer.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::request::{HttpMethod, OutgoingRequest};
use crate::clients::response::HttpResponse;
use crate::config::AbiquoConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Authenticated HTTP transport.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and is shared across tasks behind an
/// `Arc` by [`ApiClient`](crate::clients::ApiClient).
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers attached to every request.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport from the configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &AbiquoConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Abiquo API Library v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "Authorization".to_string(),
            config.credentials().authorization_header(),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
        }
    }

    /// Returns the default headers for this transport.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Executes one request and buffers the full response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] when the request cannot be sent or
    /// the response body cannot be read. Non-2xx statuses are NOT errors
    /// at this layer; callers inspect [`HttpResponse::code`].
    pub async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.target),
            HttpMethod::Post => self.client.post(&request.target),
            HttpMethod::Put => self.client.put(&request.target),
            HttpMethod::Delete => self.client.delete(&request.target),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if let Some(accept) = &request.accept {
            builder = builder.header("Accept", accept);
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header("Content-Type", content_type);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(
            method = %request.method,
            target = %request.target,
            "dispatching request"
        );

        let response = builder.send().await?;
        let code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.text().await?;

        tracing::debug!(code, bytes = body.len(), "response received");

        Ok(HttpResponse::new(code, headers, body))
    }
}
