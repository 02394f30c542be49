//! Rust client for the Abiquo cloud-management REST API.
//!
//! Abiquo resources are hypermedia-driven: apart from a handful of fixed
//! collection paths, everything is discovered and mutated through the
//! `<link rel=".." href=".."/>` elements embedded in previously fetched
//! XML representations. This crate provides:
//!
//! - a link model and representation contract ([`rest`]),
//! - a pure request binder chain that splices resolved links into
//!   outgoing requests while preserving query and matrix parameters,
//! - declarative remote operation tables executed by [`ApiClient`],
//! - typed domain wrappers with a transient/persisted/deleted lifecycle
//!   ([`resources`]),
//! - polling for the asynchronous tasks deploy-style actions queue
//!   ([`tasks`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use abiquo_api::{AbiquoConfig, ApiClient, Credentials, Datacenter};
//! use abiquo_api::config::ApiEndpoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AbiquoConfig::builder()
//!         .endpoint(ApiEndpoint::new("https://abiquo.example.com/api")?)
//!         .credentials(Credentials::basic("admin", "xabiquo")?)
//!         .build()?;
//!     let client = ApiClient::new(config);
//!
//!     let mut datacenter = Datacenter::new(client.clone(), "DC", "Honolulu");
//!     datacenter.save().await?;
//!
//!     for rack in datacenter.racks().await? {
//!         println!("rack: {:?}", rack.dto().name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod rest;
pub mod tasks;

pub use auth::Credentials;
pub use clients::{ApiClient, HttpClient, HttpError, HttpMethod};
pub use config::{AbiquoConfig, AbiquoConfigBuilder, ApiEndpoint, NetworkDefaults};
pub use error::ConfigError;
pub use resources::{
    Datacenter, Enterprise, Event, Machine, Network, NetworkKind, PricingTemplate, Privilege,
    Rack, ResourceState, Role, StorageDevice, StoragePool, Tier, User, VirtualAppliance,
    VirtualDatacenter, VirtualMachine,
};
pub use rest::{
    ApiError, BindError, LinkError, QueryOptions, Representation, ResourceCollection, RestLink,
};
pub use tasks::{
    callbacks, AcceptedRequest, MonitorHandle, TaskCallback, TaskDto, TaskMonitor, TaskState,
};

#[cfg(test)]
pub(crate) fn test_client() -> ApiClient {
    let config = AbiquoConfig::builder()
        .endpoint(config::ApiEndpoint::new("http://localhost:9009/api").unwrap())
        .credentials(Credentials::basic("admin", "xabiquo").unwrap())
        .build()
        .unwrap();
    ApiClient::new(config)
}
