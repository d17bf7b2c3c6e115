//! Access tokens presented to provider APIs.

use crate::config::Provider;
use std::fmt;

/// How an access token is presented in the `Authorization` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// `Authorization: token <value>` (GitHub personal and OAuth tokens).
    Token,
    /// `Authorization: Bearer <value>` (GitLab OAuth tokens).
    Bearer,
}

impl AuthScheme {
    /// Returns the scheme keyword placed before the token value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Bearer => "Bearer",
        }
    }
}

/// An access token for a provider API.
///
/// An empty value is allowed and means "unauthenticated": no `Authorization`
/// header is produced for it.
///
/// # Security
///
/// The `Debug` implementation masks the token value.
///
/// # Example
///
/// ```rust
/// use provider_resources::{AccessToken, Provider};
///
/// let token = AccessToken::for_provider(Provider::Github, "gh_123");
/// assert_eq!(token.authorization().as_deref(), Some("token gh_123"));
/// assert_eq!(format!("{token:?}"), "AccessToken(token, *****)");
///
/// let anonymous = AccessToken::for_provider(Provider::Gitlab, "");
/// assert!(anonymous.authorization().is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    scheme: AuthScheme,
    value: String,
}

impl AccessToken {
    /// Creates a token presented with the given scheme.
    #[must_use]
    pub fn new(scheme: AuthScheme, value: impl Into<String>) -> Self {
        Self {
            scheme,
            value: value.into(),
        }
    }

    /// Creates a token presented the way `provider` expects.
    #[must_use]
    pub fn for_provider(provider: Provider, value: impl Into<String>) -> Self {
        Self::new(provider.auth_scheme(), value)
    }

    /// Returns the scheme.
    #[must_use]
    pub const fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the token carries no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Returns the `Authorization` header value, or `None` when empty.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{} {}", self.scheme.as_str(), self.value))
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}, *****)", self.scheme.as_str())
    }
}
