//! Configuration types for the Abiquo API SDK.
//!
//! The main types here are:
//!
//! - [`AbiquoConfig`]: the SDK configuration (endpoint, credentials,
//!   network defaults, poll interval)
//! - [`AbiquoConfigBuilder`]: fluent builder for [`AbiquoConfig`]
//! - [`ApiEndpoint`]: validated base-URL newtype
//! - [`NetworkDefaults`]: instance-level defaults for network/storage
//!   resource construction
//!
//! # Example
//!
//! ```rust
//! use abiquo_api::{AbiquoConfig, ApiEndpoint, Credentials};
//!
//! let config = AbiquoConfig::builder()
//!     .endpoint(ApiEndpoint::new("https://abiquo.example.com/api").unwrap())
//!     .credentials(Credentials::basic("admin", "xabiquo").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiEndpoint, NetworkDefaults};

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Default delay between task status polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for the Abiquo API SDK.
///
/// Instance-based and passed explicitly: there is no global state. The
/// config is `Clone`, `Send` and `Sync` so it can be shared across async
/// tasks.
#[derive(Clone, Debug)]
pub struct AbiquoConfig {
    endpoint: ApiEndpoint,
    credentials: Credentials,
    network_defaults: NetworkDefaults,
    poll_interval: Duration,
    user_agent_prefix: Option<String>,
}

impl AbiquoConfig {
    /// Creates a new builder for constructing an `AbiquoConfig`.
    #[must_use]
    pub fn builder() -> AbiquoConfigBuilder {
        AbiquoConfigBuilder::new()
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Returns the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the network/storage construction defaults.
    #[must_use]
    pub const fn network_defaults(&self) -> &NetworkDefaults {
        &self.network_defaults
    }

    /// Returns the delay between task status polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AbiquoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AbiquoConfig>();
};

/// Builder for constructing [`AbiquoConfig`] instances.
///
/// Required fields are `endpoint` and `credentials`; everything else has
/// sensible defaults.
#[derive(Debug, Default)]
pub struct AbiquoConfigBuilder {
    endpoint: Option<ApiEndpoint>,
    credentials: Option<Credentials>,
    network_defaults: Option<NetworkDefaults>,
    poll_interval: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl AbiquoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the network/storage construction defaults.
    #[must_use]
    pub fn network_defaults(mut self, defaults: NetworkDefaults) -> Self {
        self.network_defaults = Some(defaults);
        self
    }

    /// Sets the delay between task status polls (default: 5 seconds).
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AbiquoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` or
    /// `credentials` are not set.
    pub fn build(self) -> Result<AbiquoConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        Ok(AbiquoConfig {
            endpoint,
            credentials,
            network_defaults: self.network_defaults.unwrap_or_default(),
            poll_interval: self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_endpoint() -> ApiEndpoint {
        ApiEndpoint::new("https://abiquo.example.com/api").unwrap()
    }

    fn test_credentials() -> Credentials {
        Credentials::basic("admin", "xabiquo").unwrap()
    }

    #[test]
    fn test_builder_requires_endpoint() {
        let result = AbiquoConfigBuilder::new()
            .credentials(test_credentials())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "endpoint" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = AbiquoConfigBuilder::new().endpoint(test_endpoint()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = AbiquoConfig::builder()
            .endpoint(test_endpoint())
            .credentials(test_credentials())
            .build()
            .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.network_defaults(), &NetworkDefaults::default());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let defaults = NetworkDefaults::with_vlan_range(10, 100).unwrap();
        let config = AbiquoConfig::builder()
            .endpoint(test_endpoint())
            .credentials(test_credentials())
            .network_defaults(defaults.clone())
            .poll_interval(Duration::from_millis(250))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.network_defaults(), &defaults);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = AbiquoConfig::builder()
            .endpoint(test_endpoint())
            .credentials(test_credentials())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.endpoint(), config.endpoint());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("AbiquoConfig"));
        assert!(!debug_str.contains("xabiquo"));
    }
}
