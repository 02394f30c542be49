//! HTTP transport and operation execution.
//!
//! [`HttpClient`] is the raw authenticated transport; [`ApiClient`] layers
//! the declared-operation engine (binders, absence mappings, XML parsing)
//! on top of it.

pub mod api_client;
pub mod errors;
pub mod http_client;
pub mod request;
pub mod response;

pub use api_client::ApiClient;
pub use errors::HttpError;
pub use http_client::HttpClient;
pub use request::{HttpMethod, OutgoingRequest};
pub use response::HttpResponse;
