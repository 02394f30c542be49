//! Validated newtypes for configuration values.
//!
//! These types validate on construction so that invalid values are caught
//! at configuration time rather than at the first request.

use std::fmt;

use crate::error::ConfigError;

/// The base URL of an Abiquo API deployment.
///
/// Validated to be an `http://` or `https://` URL; a trailing slash is
/// stripped so that link hrefs and path templates can be concatenated
/// without double slashes.
///
/// # Example
///
/// ```rust
/// use abiquo_api::ApiEndpoint;
///
/// let endpoint = ApiEndpoint::new("https://abiquo.example.com/api/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://abiquo.example.com/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint(String);

impl ApiEndpoint {
    /// Creates a validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the value is empty or
    /// does not start with an http/https scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let has_scheme = url.starts_with("http://") || url.starts_with("https://");
        let host_part = url
            .splitn(2, "://")
            .nth(1)
            .map_or("", |rest| rest.trim_matches('/'));
        if !has_scheme || host_part.is_empty() {
            return Err(ConfigError::InvalidEndpoint { url });
        }
        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Joins a server-relative path template onto the endpoint.
    ///
    /// Absolute hrefs (as found in hypermedia links) are returned verbatim.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for ApiEndpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Defaults applied when constructing network and storage resources.
///
/// These replace hard-coded process-wide constants: every client carries
/// its own copy, supplied through [`AbiquoConfig`](crate::AbiquoConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDefaults {
    /// Lowest VLAN tag handed out for new private networks.
    pub vlan_tag_min: u16,
    /// Highest VLAN tag handed out for new private networks.
    pub vlan_tag_max: u16,
    /// Primary DNS configured on new networks.
    pub primary_dns: String,
    /// Management port used when registering storage devices.
    pub management_port: u16,
}

impl NetworkDefaults {
    /// Creates defaults with a custom VLAN tag range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVlanRange`] when the range is empty
    /// or falls outside the 802.1Q usable tag space (2..=4094).
    pub fn with_vlan_range(min: u16, max: u16) -> Result<Self, ConfigError> {
        if min < 2 || max > 4094 || min >= max {
            return Err(ConfigError::InvalidVlanRange { min, max });
        }
        Ok(Self {
            vlan_tag_min: min,
            vlan_tag_max: max,
            ..Self::default()
        })
    }
}

impl Default for NetworkDefaults {
    fn default() -> Self {
        Self {
            vlan_tag_min: 2,
            vlan_tag_max: 4094,
            primary_dns: "8.8.8.8".to_string(),
            management_port: 8180,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_accepts_https_url() {
        let endpoint = ApiEndpoint::new("https://abiquo.example.com/api").unwrap();
        assert_eq!(endpoint.as_ref(), "https://abiquo.example.com/api");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let endpoint = ApiEndpoint::new("http://localhost:9009/api/").unwrap();
        assert_eq!(endpoint.as_ref(), "http://localhost:9009/api");
    }

    #[test]
    fn test_endpoint_rejects_missing_scheme() {
        assert!(matches!(
            ApiEndpoint::new("abiquo.example.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_rejects_empty_host() {
        assert!(matches!(
            ApiEndpoint::new("https:///"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_join_relative_path() {
        let endpoint = ApiEndpoint::new("https://abiquo.example.com/api").unwrap();
        assert_eq!(
            endpoint.join("/admin/datacenters"),
            "https://abiquo.example.com/api/admin/datacenters"
        );
        assert_eq!(
            endpoint.join("admin/datacenters"),
            "https://abiquo.example.com/api/admin/datacenters"
        );
    }

    #[test]
    fn test_endpoint_join_absolute_href_passthrough() {
        let endpoint = ApiEndpoint::new("https://abiquo.example.com/api").unwrap();
        assert_eq!(
            endpoint.join("https://other.example.com/api/admin/datacenters/1"),
            "https://other.example.com/api/admin/datacenters/1"
        );
    }

    #[test]
    fn test_network_defaults_sensible_values() {
        let defaults = NetworkDefaults::default();
        assert_eq!(defaults.vlan_tag_min, 2);
        assert_eq!(defaults.vlan_tag_max, 4094);
        assert_eq!(defaults.management_port, 8180);
    }

    #[test]
    fn test_network_defaults_custom_vlan_range() {
        let defaults = NetworkDefaults::with_vlan_range(100, 200).unwrap();
        assert_eq!(defaults.vlan_tag_min, 100);
        assert_eq!(defaults.vlan_tag_max, 200);
    }

    #[test]
    fn test_network_defaults_rejects_bad_range() {
        assert!(NetworkDefaults::with_vlan_range(0, 100).is_err());
        assert!(NetworkDefaults::with_vlan_range(200, 100).is_err());
        assert!(NetworkDefaults::with_vlan_range(2, 5000).is_err());
    }
}
