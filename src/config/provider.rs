//! Supported code-hosting providers.

use crate::auth::AuthScheme;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A code-hosting provider whose REST API is accessed through this crate.
///
/// Each provider fixes a few wire conventions: its default API root, the
/// `Accept` header it expects, and how access tokens are presented.
///
/// # Example
///
/// ```rust
/// use provider_resources::Provider;
///
/// let provider: Provider = "gitlab".parse().unwrap();
/// assert_eq!(provider, Provider::Gitlab);
/// assert_eq!(provider.to_string(), "gitlab");
/// assert_eq!(provider.default_base_url(), "https://gitlab.com/api/v4");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// GitHub REST API v3.
    Github,
    /// GitLab REST API v4.
    Gitlab,
}

impl Provider {
    /// Returns the API root used when no base URL is configured.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Github => "https://api.github.com",
            Self::Gitlab => "https://gitlab.com/api/v4",
        }
    }

    /// Returns the `Accept` header value sent with every request.
    #[must_use]
    pub const fn accept(self) -> &'static str {
        match self {
            Self::Github => "application/vnd.github.v3+json",
            Self::Gitlab => "application/json",
        }
    }

    /// Returns the `Authorization` scheme used for access tokens.
    #[must_use]
    pub const fn auth_scheme(self) -> AuthScheme {
        match self {
            Self::Github => AuthScheme::Token,
            Self::Gitlab => AuthScheme::Bearer,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => f.write_str("github"),
            Self::Gitlab => f.write_str("gitlab"),
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "gitlab" => Ok(Self::Gitlab),
            _ => Err(ConfigError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}
