//! The request binder chain.
//!
//! Each binder is a pure function `(outgoing request, input) -> outgoing
//! request'` applied immediately before dispatch. None of them performs
//! I/O; the only suspending point in an operation is the HTTP round trip
//! itself.
//!
//! Binders fail fast: a missing or empty required input is a
//! [`BindError::Precondition`] and a relation absent from a representation
//! is a [`LinkError::MissingLink`]. Neither is ever retried, and a failed
//! binder leaves the outgoing request untouched.

use crate::clients::OutgoingRequest;
use crate::rest::errors::{ApiError, BindError};
use crate::rest::link::RestLink;
use crate::rest::representation::Representation;

/// An ordered multimap of query-parameter name/value pairs.
///
/// Pairs are appended to the request URI in insertion order, each as
/// `name=value`, accumulating rather than replacing earlier pairs.
///
/// # Example
///
/// ```ignore
/// let options = QueryOptions::new()
///     .put("startwith", "0")
///     .put("limit", "25");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pairs: Vec<(String, String)>,
}

impl QueryOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a name/value pair. Repeated names are kept, in order.
    #[must_use]
    pub fn put(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Returns true when no pairs have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Index of the start of the query/matrix suffix of a URI, if any.
///
/// Takes the earlier of `?` and `;` when both are present.
fn suffix_start(uri: &str) -> Option<usize> {
    match (uri.find('?'), uri.find(';')) {
        (Some(q), Some(m)) => Some(q.min(m)),
        (Some(q), None) => Some(q),
        (None, Some(m)) => Some(m),
        (None, None) => None,
    }
}

/// Binds the request target to an explicitly supplied link.
///
/// The query and matrix parameters of the original target, located from
/// the earlier of `?`/`;`, are preserved verbatim and re-appended to the
/// link's href. This keeps caller-supplied filters and pagination across
/// a link hop.
pub fn bind_link(request: &mut OutgoingRequest, link: &RestLink) -> Result<(), BindError> {
    if link.href.is_empty() {
        return Err(BindError::Precondition { binder: "link" });
    }
    let suffix = suffix_start(&request.target)
        .map(|start| request.target[start..].to_string())
        .unwrap_or_default();
    request.target = format!("{}{}", link.href, suffix);
    Ok(())
}

/// Binds the request target to the resource's own `edit` link.
///
/// Used for delete-style calls where the payload stays empty. Fails with
/// [`LinkError::MissingLink`] when the representation carries no `edit`
/// link, leaving the request untouched. An `edit` link with an empty href
/// is rejected with the same precondition as [`bind_link`].
pub fn bind_edit_link<R: Representation>(
    request: &mut OutgoingRequest,
    resource: &R,
) -> Result<(), BindError> {
    let link = resource.edit_link()?;
    bind_link(request, link)
}

/// Binds the request target to the `edit` link AND serializes the whole
/// resource as the request body, tagged with its media type.
///
/// Used for update calls, which must both relocate the URI to the
/// resource's own address and carry the new representation.
pub fn bind_payload<R: Representation>(
    request: &mut OutgoingRequest,
    resource: &R,
) -> Result<(), ApiError> {
    bind_edit_link(request, resource)?;
    let body = quick_xml::se::to_string(resource)?;
    request.body = Some(body);
    request.content_type = Some(R::MEDIA_TYPE.to_string());
    Ok(())
}

/// Serializes the resource as the request body without touching the
/// target. Used for create calls against a collection endpoint.
pub fn bind_body<R: Representation>(
    request: &mut OutgoingRequest,
    resource: &R,
) -> Result<(), ApiError> {
    let body = quick_xml::se::to_string(resource)?;
    request.body = Some(body);
    request.content_type = Some(R::MEDIA_TYPE.to_string());
    Ok(())
}

/// Appends every option pair to the request URI, percent-encoding values.
///
/// The first pair appended to a target without a query string uses `?`;
/// every subsequent pair uses `&`. Pairs accumulate, so repeated calls and
/// repeated names all survive.
pub fn append_query_options(request: &mut OutgoingRequest, options: &QueryOptions) {
    for (name, value) in options.pairs() {
        let separator = if request.target.contains('?') { '&' } else { '?' };
        request.target = format!(
            "{}{}{}={}",
            request.target,
            separator,
            name,
            urlencoding::encode(value)
        );
    }
}

/// Appends a literal path segment to the end of the current path, before
/// any query/matrix suffix. Used to address a child resource by id under
/// a collection endpoint.
pub fn append_path_segment(
    request: &mut OutgoingRequest,
    segment: &str,
) -> Result<(), BindError> {
    if segment.is_empty() {
        return Err(BindError::Precondition { binder: "path segment" });
    }
    let (path, suffix) = match suffix_start(&request.target) {
        Some(start) => request.target.split_at(start),
        None => (request.target.as_str(), ""),
    };
    let path = path.trim_end_matches('/');
    request.target = format!("{path}/{segment}{suffix}");
    Ok(())
}
