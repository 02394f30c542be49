//! Typed domain resources.
//!
//! Each entity comes as a plain serde DTO (the wire representation, links
//! included) plus a wrapper pairing one [`ApiClient`](crate::clients::ApiClient)
//! with one DTO instance. Wrappers hold a small state machine:
//!
//! ```text
//! Transient --save()--> Persisted --delete()--> Deleted
//! ```
//!
//! `save` is valid only on a transient wrapper, `update`/`delete` only on
//! a persisted one. A call in the wrong state fails with
//! [`ApiError::InvalidState`](crate::rest::ApiError::InvalidState) before
//! any request is issued. After every mutating call the held DTO is
//! replaced wholesale with the server's response.

pub mod cloud;
pub mod enterprise;
pub mod event;
pub mod infrastructure;
pub mod network;
pub mod pricing;
pub mod storage;

pub use cloud::{VirtualAppliance, VirtualDatacenter, VirtualMachine};
pub use enterprise::{Enterprise, Privilege, ResourceLimits, Role, User};
pub use event::Event;
pub use infrastructure::{Datacenter, Machine, Rack};
pub use network::{Network, NetworkKind};
pub use pricing::PricingTemplate;
pub use storage::{StorageDevice, StoragePool, Tier};

use crate::rest::errors::ApiError;

/// Lifecycle state of a domain wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    /// Built locally, never saved. Only `save()` is valid.
    Transient,
    /// Backed by a server-side resource. `update()`/`delete()` are valid.
    Persisted,
    /// Deleted on the server. Terminal; no operation is valid.
    Deleted,
}

/// Fails fast when a wrapper method is called in the wrong state.
pub(crate) fn require_state(
    actual: ResourceState,
    required: ResourceState,
    operation: &'static str,
) -> Result<(), ApiError> {
    if actual == required {
        Ok(())
    } else {
        Err(ApiError::InvalidState {
            operation,
            state: actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_state_passes_on_match() {
        assert!(require_state(ResourceState::Persisted, ResourceState::Persisted, "update").is_ok());
    }

    #[test]
    fn test_require_state_reports_actual_state() {
        let error =
            require_state(ResourceState::Deleted, ResourceState::Persisted, "update").unwrap_err();
        match error {
            ApiError::InvalidState { operation, state } => {
                assert_eq!(operation, "update");
                assert_eq!(state, ResourceState::Deleted);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
