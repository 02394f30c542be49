//! Error types for link resolution and request binding.
//!
//! The taxonomy distinguishes caller bugs (missing links, malformed
//! identifiers) from library/integration bugs (operation declarations not
//! matching the invocation shape). All of these are raised before any
//! network I/O and are never retried.

use thiserror::Error;

use crate::clients::HttpError;
use crate::resources::ResourceState;

/// Errors raised while resolving hypermedia links on a representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The expected relation was not present on the representation.
    ///
    /// Either the payload was not freshly fetched from the server, or the
    /// capability is unavailable on this resource instance.
    #[error("no link with rel '{rel}' on {resource} representation")]
    MissingLink {
        /// The relation that was looked up.
        rel: String,
        /// The representation type name.
        resource: &'static str,
    },

    /// A link href did not end in a parseable numeric identifier.
    #[error("link href '{href}' does not end in a numeric identifier")]
    MalformedIdentifier {
        /// The offending href.
        href: String,
    },
}

/// Errors raised by the request binder chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required binder input was absent. Always a caller bug.
    #[error("required input for the {binder} binder was missing or empty")]
    Precondition {
        /// The binder that rejected its input.
        binder: &'static str,
    },

    /// Link resolution failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The operation declaration does not name a relation for a
    /// link-bound parameter. A library/integration bug, always fatal.
    #[error("operation '{operation}' declares no link relation for its bound parameter")]
    Configuration {
        /// The operation name from the declaration table.
        operation: &'static str,
    },

    /// The operation declaration's binder kind does not match the
    /// invocation shape. A library/integration bug, always fatal.
    #[error("operation '{operation}' was invoked with the wrong binder shape; expected {expected}")]
    Type {
        /// The operation name from the declaration table.
        operation: &'static str,
        /// The binder kind the declaration expects.
        expected: &'static str,
    },
}

/// Error type for remote operations and domain wrapper methods.
///
/// Binding and link failures surface before dispatch; HTTP and XML
/// failures surface after. The only soft conversions are the per-operation
/// absence mappings (404/303), which yield `Ok(None)` instead of an error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request binding failed before dispatch.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Link resolution failed outside the binder chain.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The HTTP round trip failed or returned an unmapped non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// An XML body could not be (de)serialized.
    #[error("XML (de)serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A wrapper method was called in a state that forbids it.
    #[error("cannot {operation} a {state:?} resource")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The wrapper state at the time of the call.
        state: ResourceState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_link_message_names_rel_and_resource() {
        let error = LinkError::MissingLink {
            rel: "edit".to_string(),
            resource: "Datacenter",
        };
        let message = error.to_string();
        assert!(message.contains("edit"));
        assert!(message.contains("Datacenter"));
    }

    #[test]
    fn test_malformed_identifier_message_includes_href() {
        let error = LinkError::MalformedIdentifier {
            href: "http://api/admin/datacenters/latest".to_string(),
        };
        assert!(error.to_string().contains("datacenters/latest"));
    }

    #[test]
    fn test_bind_error_wraps_link_error() {
        let bind: BindError = LinkError::MissingLink {
            rel: "edit".to_string(),
            resource: "Rack",
        }
        .into();
        assert!(matches!(bind, BindError::Link(_)));
    }

    #[test]
    fn test_configuration_error_names_operation() {
        let error = BindError::Configuration {
            operation: "virtualmachine.deploy",
        };
        assert!(error.to_string().contains("virtualmachine.deploy"));
    }

    #[test]
    fn test_api_error_conversions() {
        let api: ApiError = BindError::Precondition { binder: "link" }.into();
        assert!(matches!(api, ApiError::Bind(_)));

        let api: ApiError = LinkError::MalformedIdentifier {
            href: "x".to_string(),
        }
        .into();
        assert!(matches!(api, ApiError::Link(_)));
    }

    #[test]
    fn test_invalid_state_message() {
        let error = ApiError::InvalidState {
            operation: "update",
            state: ResourceState::Deleted,
        };
        let message = error.to_string();
        assert!(message.contains("update"));
        assert!(message.contains("Deleted"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &BindError::Precondition { binder: "payload" };
        let _: &dyn std::error::Error = &ApiError::Bind(BindError::Precondition { binder: "x" });
    }
}
