//! Configuration error types for the Abiquo API SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation at construction time.
//!
//! # Example
//!
//! ```rust
//! use abiquo_api::{ApiEndpoint, ConfigError};
//!
//! let result = ApiEndpoint::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant carries enough context to make the fix obvious to the
/// integrator; none of these are recoverable at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API endpoint is not a usable base URL.
    #[error("Invalid API endpoint '{url}'. Expected an http or https URL such as 'https://abiquo.example.com/api'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Basic-auth username cannot be empty.
    #[error("Username cannot be empty. Please provide a valid Abiquo account name.")]
    EmptyUsername,

    /// Token credentials cannot be empty.
    #[error("Authentication token cannot be empty.")]
    EmptyToken,

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The configured VLAN tag range is not usable.
    #[error("Invalid VLAN tag range {min}..={max}. The minimum must be at least 2 and below the maximum (4094).")]
    InvalidVlanRange {
        /// Lower bound of the rejected range.
        min: u16,
        /// Upper bound of the rejected range.
        max: u16,
    },
}
