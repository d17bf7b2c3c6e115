//! Error types for provider configuration.
//!
//! Request and transport failures live in [`crate::clients`]; this module only
//! covers values rejected while building a [`ProviderConfig`](crate::ProviderConfig).
//!
//! # Example
//!
//! ```rust
//! use provider_resources::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring provider access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.github.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Provider name is not recognized.
    #[error("Unknown provider '{name}'. Expected 'github' or 'gitlab'.")]
    UnknownProvider {
        /// The unrecognized provider name.
        name: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
