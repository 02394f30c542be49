//! Authentication for the Abiquo API.
//!
//! Abiquo supports HTTP Basic authentication and opaque bearer tokens.
//! Either form is rendered into an `Authorization` header which the HTTP
//! client attaches to every request; no per-request signing is involved.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::ConfigError;

/// Credentials for an Abiquo account.
///
/// Secrets are masked in `Debug` output so credentials never leak into
/// logs via derived formatting.
///
/// # Example
///
/// ```rust
/// use abiquo_api::Credentials;
///
/// let creds = Credentials::basic("admin", "xabiquo").unwrap();
/// assert!(creds.authorization_header().starts_with("Basic "));
///
/// let masked = format!("{creds:?}");
/// assert!(!masked.contains("xabiquo"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication.
    Basic {
        /// Abiquo account name.
        username: String,
        /// Account password.
        password: String,
    },
    /// An opaque bearer token issued by the platform.
    Token(String),
}

impl Credentials {
    /// Creates Basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self::Basic {
            username,
            password: password.into(),
        })
    }

    /// Creates token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn token(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self::Token(token))
    }

    /// Renders the `Authorization` header value for these credentials.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                let raw = format!("{username}:{password}");
                format!("Basic {}", BASE64.encode(raw.as_bytes()))
            }
            Self::Token(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_is_base64_of_user_colon_pass() {
        let creds = Credentials::basic("admin", "xabiquo").unwrap();
        // "admin:xabiquo" -> YWRtaW46eGFiaXF1bw==
        assert_eq!(
            creds.authorization_header(),
            "Basic YWRtaW46eGFiaXF1bw=="
        );
    }

    #[test]
    fn test_token_header_uses_bearer_scheme() {
        let creds = Credentials::token("abc123").unwrap();
        assert_eq!(creds.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(matches!(
            Credentials::basic("", "secret"),
            Err(ConfigError::EmptyUsername)
        ));
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            Credentials::token(""),
            Err(ConfigError::EmptyToken)
        ));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let basic = Credentials::basic("admin", "supersecret").unwrap();
        let debug = format!("{basic:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("supersecret"));

        let token = Credentials::token("tok-secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("tok-secret"));
    }
}
