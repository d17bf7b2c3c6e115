//! Configuration types for provider API access.
//!
//! # Overview
//!
//! - [`ProviderConfig`]: which provider to talk to and how to identify ourselves
//! - [`ProviderConfigBuilder`]: a builder for [`ProviderConfig`]
//! - [`Provider`]: the supported code-hosting providers
//! - [`BaseUrl`]: a validated API root URL
//!
//! # Example
//!
//! ```rust
//! use provider_resources::{Provider, ProviderConfig};
//!
//! let config = ProviderConfig::builder()
//!     .provider(Provider::Github)
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.uri("repos/john/test"), "https://api.github.com/repos/john/test");
//! ```

mod newtypes;
mod provider;

pub use newtypes::BaseUrl;
pub use provider::Provider;

use crate::error::ConfigError;

/// Configuration for talking to one provider's REST API.
///
/// # Thread Safety
///
/// `ProviderConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    provider: Provider,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
}

impl ProviderConfig {
    /// Creates a new builder for constructing a `ProviderConfig`.
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Returns the provider.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns the API root URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Resolves `path` against the API root.
    #[must_use]
    pub fn uri(&self, path: &str) -> String {
        self.base_url.join(path)
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProviderConfig>();
};

/// Builder for constructing [`ProviderConfig`] instances.
///
/// `provider` is required. `base_url` defaults to the provider's public API
/// root; `user_agent_prefix` defaults to `None`.
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    provider: Option<Provider>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider (required).
    #[must_use]
    pub const fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Overrides the API root, e.g. for a self-hosted GitLab instance.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProviderConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `provider` is not set.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        let provider = self
            .provider
            .ok_or(ConfigError::MissingRequiredField { field: "provider" })?;
        let base_url = match self.base_url {
            Some(base_url) => base_url,
            None => BaseUrl::new(provider.default_base_url())?,
        };

        Ok(ProviderConfig {
            provider,
            base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
