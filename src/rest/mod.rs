//! The hypermedia layer: link model, representation contract, request
//! binder chain, and declarative remote operations.
//!
//! Resources are discovered and mutated through REST links embedded in
//! previously fetched representations rather than fixed URL templates.
//! This module provides the pieces that resolve those links and splice
//! them into outgoing requests.

pub mod binder;
pub mod errors;
pub mod link;
pub mod operation;
pub mod representation;

pub use binder::QueryOptions;
pub use errors::{ApiError, BindError, LinkError};
pub use link::{rels, RestLink};
pub use operation::{BinderSpec, RemoteOperation};
pub use representation::{Representation, ResourceCollection};
