//! The operation execution engine.
//!
//! [`ApiClient`] invokes declared [`RemoteOperation`]s: it validates the
//! declaration against the invocation shape, applies the declared binder,
//! dispatches exactly one HTTP round trip, applies the declared absence
//! mappings, and parses the XML body back into a representation.
//!
//! # Example
//!
//! ```rust,ignore
//! use abiquo_api::{AbiquoConfig, ApiClient, Credentials};
//! use abiquo_api::config::ApiEndpoint;
//!
//! let config = AbiquoConfig::builder()
//!     .endpoint(ApiEndpoint::new("https://abiquo.example.com/api")?)
//!     .credentials(Credentials::basic("admin", "xabiquo")?)
//!     .build()?;
//! let client = ApiClient::new(config);
//! ```

use std::sync::Arc;

use crate::clients::http_client::HttpClient;
use crate::clients::request::OutgoingRequest;
use crate::clients::response::HttpResponse;
use crate::config::AbiquoConfig;
use crate::rest::binder::{
    QueryOptions, append_path_segment, append_query_options, bind_body, bind_edit_link, bind_link,
    bind_payload,
};
use crate::rest::errors::{ApiError, BindError};
use crate::rest::link::RestLink;
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::{Representation, ResourceCollection};

/// A shareable client bound to one endpoint and one set of credentials.
///
/// Cloning is cheap; all clones share the same transport.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Arc<HttpClient>,
    config: Arc<AbiquoConfig>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client from the configuration.
    #[must_use]
    pub fn new(config: AbiquoConfig) -> Self {
        let http = Arc::new(HttpClient::new(&config));
        Self {
            http,
            config: Arc::new(config),
        }
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &AbiquoConfig {
        &self.config
    }

    /// Absolutizes a fixed collection path against the endpoint; absolute
    /// hrefs pass through verbatim.
    #[must_use]
    pub fn target(&self, path_or_href: &str) -> String {
        self.config.endpoint().join(path_or_href)
    }

    /// Lists a collection, appending the query options to the URI.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::Http`] on non-2xx statuses and with
    /// [`ApiError::Xml`] when the body does not parse.
    pub async fn list<C: ResourceCollection>(
        &self,
        operation: &RemoteOperation,
        path_or_href: &str,
        options: &QueryOptions,
    ) -> Result<Vec<C::Item>, ApiError> {
        expect_binder(operation, BinderSpec::None.kind())?;
        let mut request = OutgoingRequest::new(operation.method, self.target(path_or_href))
            .accept(operation.accept);
        append_query_options(&mut request, options);
        let response = self.dispatch(operation, request).await?;
        let collection: C = quick_xml::de::from_str(&response.body)?;
        Ok(collection.into_items())
    }

    /// Reads one resource by id under a collection endpoint.
    ///
    /// Returns `Ok(None)` for statuses the operation maps to absence,
    /// conventionally 404.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::Bind`] when the declaration does not bind a
    /// path segment, and with [`ApiError::Http`]/[`ApiError::Xml`] after
    /// dispatch.
    pub async fn read<R: Representation>(
        &self,
        operation: &RemoteOperation,
        path_or_href: &str,
        id: i32,
    ) -> Result<Option<R>, ApiError> {
        expect_binder(operation, BinderSpec::Path.kind())?;
        let mut request = OutgoingRequest::new(operation.method, self.target(path_or_href))
            .accept(operation.accept);
        append_path_segment(&mut request, &id.to_string())?;
        let response = self.dispatch(operation, request).await?;
        parse_optional(operation, &response)
    }

    /// Follows an explicitly supplied link, preserving any query and
    /// matrix parameters already on the target.
    ///
    /// # Errors
    ///
    /// Fails with [`BindError::Configuration`] when the declaration does
    /// not name a link relation.
    pub async fn follow<R: Representation>(
        &self,
        operation: &RemoteOperation,
        link: &RestLink,
        options: &QueryOptions,
    ) -> Result<Option<R>, ApiError> {
        declared_rel(operation)?;
        let mut request =
            OutgoingRequest::new(operation.method, String::new()).accept(operation.accept);
        append_query_options(&mut request, options);
        bind_link(&mut request, link)?;
        let response = self.dispatch(operation, request).await?;
        parse_optional(operation, &response)
    }

    /// Follows an explicitly supplied link and parses the response as a
    /// collection.
    pub async fn follow_collection<C: ResourceCollection>(
        &self,
        operation: &RemoteOperation,
        link: &RestLink,
        options: &QueryOptions,
    ) -> Result<Vec<C::Item>, ApiError> {
        declared_rel(operation)?;
        let mut request =
            OutgoingRequest::new(operation.method, String::new()).accept(operation.accept);
        append_query_options(&mut request, options);
        bind_link(&mut request, link)?;
        let response = self.dispatch(operation, request).await?;
        let collection: C = quick_xml::de::from_str(&response.body)?;
        Ok(collection.into_items())
    }

    /// Creates a resource under a collection endpoint, serializing the
    /// payload as the body, and parses the server's echo of it.
    pub async fn create<R: Representation>(
        &self,
        operation: &RemoteOperation,
        path_or_href: &str,
        payload: &R,
    ) -> Result<R, ApiError> {
        expect_binder(operation, BinderSpec::Body.kind())?;
        let mut request = OutgoingRequest::new(operation.method, self.target(path_or_href))
            .accept(operation.accept);
        bind_body(&mut request, payload)?;
        let response = self.dispatch(operation, request).await?;
        Ok(quick_xml::de::from_str(&response.body)?)
    }

    /// Creates a resource under a parent's navigation link, serializing
    /// the payload as the body. The declaration names the relation the
    /// supplied link must come from.
    pub async fn create_linked<R: Representation>(
        &self,
        operation: &RemoteOperation,
        parent_link: &RestLink,
        payload: &R,
    ) -> Result<R, ApiError> {
        declared_rel(operation)?;
        let mut request =
            OutgoingRequest::new(operation.method, String::new()).accept(operation.accept);
        bind_link(&mut request, parent_link)?;
        bind_body(&mut request, payload)?;
        let response = self.dispatch(operation, request).await?;
        Ok(quick_xml::de::from_str(&response.body)?)
    }

    /// Replaces a resource at its own `edit` address, carrying the new
    /// representation, and parses the server's echo of it.
    pub async fn update<R: Representation>(
        &self,
        operation: &RemoteOperation,
        payload: &R,
    ) -> Result<R, ApiError> {
        expect_binder(operation, BinderSpec::PayloadAndLink.kind())?;
        let mut request =
            OutgoingRequest::new(operation.method, String::new()).accept(operation.accept);
        bind_payload(&mut request, payload)?;
        let response = self.dispatch(operation, request).await?;
        Ok(quick_xml::de::from_str(&response.body)?)
    }

    /// Deletes a resource at its own `edit` address.
    ///
    /// Statuses the operation maps to absence also succeed, so deleting a
    /// resource that is already gone is not an error when declared so.
    pub async fn delete<R: Representation>(
        &self,
        operation: &RemoteOperation,
        resource: &R,
    ) -> Result<(), ApiError> {
        expect_binder(operation, BinderSpec::EditLink.kind())?;
        let mut request = OutgoingRequest::new(operation.method, String::new());
        bind_edit_link(&mut request, resource)?;
        self.dispatch(operation, request).await?;
        Ok(())
    }

    /// Posts to an explicitly supplied action link (deploy-style calls)
    /// and parses the acknowledgement representation.
    pub async fn post_action<R: Representation>(
        &self,
        operation: &RemoteOperation,
        link: &RestLink,
    ) -> Result<R, ApiError> {
        declared_rel(operation)?;
        let mut request =
            OutgoingRequest::new(operation.method, String::new()).accept(operation.accept);
        bind_link(&mut request, link)?;
        let response = self.dispatch(operation, request).await?;
        Ok(quick_xml::de::from_str(&response.body)?)
    }

    /// One round trip plus the declared status handling: absence-mapped
    /// statuses pass through for the caller to interpret, other non-2xx
    /// statuses fail.
    async fn dispatch(
        &self,
        operation: &RemoteOperation,
        request: OutgoingRequest,
    ) -> Result<HttpResponse, ApiError> {
        tracing::debug!(operation = operation.name, "invoking remote operation");
        let response = self.http.execute(request).await.map_err(ApiError::Http)?;
        if response.is_success() || operation.maps_to_absence(response.code) {
            Ok(response)
        } else {
            Err(ApiError::Http(crate::clients::HttpError::Status {
                code: response.code,
                body: response.body,
            }))
        }
    }
}

fn parse_optional<R: Representation>(
    operation: &RemoteOperation,
    response: &HttpResponse,
) -> Result<Option<R>, ApiError> {
    if operation.maps_to_absence(response.code) {
        return Ok(None);
    }
    Ok(Some(quick_xml::de::from_str(&response.body)?))
}

fn expect_binder(
    operation: &RemoteOperation,
    expected: &'static str,
) -> Result<(), BindError> {
    if operation.binder.kind() == expected {
        Ok(())
    } else {
        Err(BindError::Type {
            operation: operation.name,
            expected,
        })
    }
}

fn declared_rel(operation: &RemoteOperation) -> Result<&'static str, BindError> {
    match operation.binder {
        BinderSpec::Link { rel } => Ok(rel),
        _ => Err(BindError::Configuration {
            operation: operation.name,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;

    const MISDECLARED: RemoteOperation = RemoteOperation {
        name: "probe.misdeclared",
        method: HttpMethod::Post,
        binder: BinderSpec::Body,
        accept: "application/vnd.abiquo.probe+xml",
        absent_on: &[],
    };

    #[test]
    fn test_expect_binder_rejects_wrong_shape() {
        let error = expect_binder(&MISDECLARED, BinderSpec::Path.kind()).unwrap_err();
        assert!(matches!(
            error,
            BindError::Type { operation: "probe.misdeclared", expected: "path" }
        ));
    }

    #[test]
    fn test_declared_rel_requires_a_link_binder() {
        let error = declared_rel(&MISDECLARED).unwrap_err();
        assert!(matches!(
            error,
            BindError::Configuration { operation: "probe.misdeclared" }
        ));

        let declared = RemoteOperation {
            binder: BinderSpec::Link { rel: "deploy" },
            ..MISDECLARED
        };
        assert_eq!(declared_rel(&declared).unwrap(), "deploy");
    }
}
