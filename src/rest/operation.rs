//! Declarative remote operation tables.
//!
//! Each operation is a stateless, side-effect-free declaration of one HTTP
//! call: verb, which binder applies to the argument, the success media
//! type, and which response statuses map to absence instead of an error.
//! Invoking an operation performs exactly one HTTP round trip.
//!
//! Resource modules declare their operations as `const` tables, e.g.:
//!
//! ```ignore
//! pub const READ: RemoteOperation = RemoteOperation {
//!     name: "datacenter.read",
//!     method: HttpMethod::Get,
//!     binder: BinderSpec::Path,
//!     accept: "application/vnd.abiquo.datacenter+xml",
//!     absent_on: &[404],
//! };
//! ```

use crate::clients::HttpMethod;

/// Which binder the operation applies to its argument, declared at
/// compile time rather than discovered at invocation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinderSpec {
    /// No argument is bound; the target is used as given.
    None,
    /// The argument is a path segment appended to the collection URI.
    Path,
    /// The target is rewritten from an explicitly supplied link, naming
    /// the relation the caller must provide.
    Link {
        /// The expected relation of the supplied link.
        rel: &'static str,
    },
    /// The target is rewritten from the argument's own `edit` link.
    EditLink,
    /// The argument is serialized as the body; the target stays on the
    /// collection URI.
    Body,
    /// The target is rewritten from the `edit` link AND the argument is
    /// serialized as the body.
    PayloadAndLink,
}

impl BinderSpec {
    /// A short name for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Path => "path",
            Self::Link { .. } => "link",
            Self::EditLink => "edit-link",
            Self::Body => "body",
            Self::PayloadAndLink => "payload-and-link",
        }
    }
}

/// A declared HTTP operation, independent of any specific invocation.
#[derive(Clone, Copy, Debug)]
pub struct RemoteOperation {
    /// A stable diagnostic name, `"<resource>.<verb>"`.
    pub name: &'static str,
    /// The HTTP verb.
    pub method: HttpMethod,
    /// The binder applied to the operation's argument.
    pub binder: BinderSpec,
    /// The media type requested via Accept and expected on success.
    pub accept: &'static str,
    /// Statuses mapped to absence (`Ok(None)`) instead of an error.
    pub absent_on: &'static [u16],
}

impl RemoteOperation {
    /// Whether the given response status is declared to mean absence.
    #[must_use]
    pub fn maps_to_absence(&self, status: u16) -> bool {
        self.absent_on.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBE_READ: RemoteOperation = RemoteOperation {
        name: "probe.read",
        method: HttpMethod::Get,
        binder: BinderSpec::Path,
        accept: "application/vnd.abiquo.probe+xml",
        absent_on: &[404],
    };

    #[test]
    fn test_maps_to_absence_only_for_declared_statuses() {
        assert!(PROBE_READ.maps_to_absence(404));
        assert!(!PROBE_READ.maps_to_absence(303));
        assert!(!PROBE_READ.maps_to_absence(500));
    }

    #[test]
    fn test_binder_spec_kinds() {
        assert_eq!(BinderSpec::None.kind(), "none");
        assert_eq!(BinderSpec::Link { rel: "edit" }.kind(), "link");
        assert_eq!(BinderSpec::PayloadAndLink.kind(), "payload-and-link");
    }

    #[test]
    fn test_operations_are_const_declarable() {
        assert_eq!(PROBE_READ.name, "probe.read");
        assert_eq!(PROBE_READ.method, HttpMethod::Get);
    }
}
