//! # Provider Resources
//!
//! Conditional, paginated access to the JSON REST APIs of code-hosting
//! providers (GitHub, GitLab).
//!
//! ## Overview
//!
//! This crate provides:
//! - Immutable [`Resource`] values with a builder for derived copies
//! - ETag revalidation through [`ConditionalResource`] and a shared [`ResourceCache`]
//! - A layered fetch capability, [`clients::JsonResources`], with an
//!   access-token layer and a conditional-caching layer over a `reqwest` transport
//! - Lazy traversal of `Link`-paginated list endpoints via [`clients::ResourcePaging`]
//!
//! ## Quick Start
//!
//! ```rust
//! use provider_resources::{Provider, ProviderConfig};
//!
//! let config = ProviderConfig::builder()
//!     .provider(Provider::Github)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.uri("user"), "https://api.github.com/user");
//! ```
//!
//! ## Revalidating Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use provider_resources::{AccessToken, Provider, ProviderConfig, ResourceCache};
//! use provider_resources::clients::{HttpClient, JsonResources};
//!
//! let cache = Arc::new(ResourceCache::new());
//! let resources = HttpClient::new(&config)
//!     .conditional(Arc::clone(&cache))
//!     .authenticated(AccessToken::for_provider(Provider::Github, "gh_token"));
//!
//! // 200 + ETag: cached
//! let first = resources.get("https://api.github.com/repos/john/test").await?;
//! // If-None-Match sent; on 304 the cached value comes back
//! let second = resources.get("https://api.github.com/repos/john/test").await?;
//! assert_eq!(first.body(), second.body());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the cache is an explicit, shared `Arc<ResourceCache>`
//! - **Immutable values**: resources are derived, never mutated
//! - **Copy-on-reconfigure**: re-authenticating yields a new view
//! - **Status codes are data**: only invalid requests and transport failures are errors

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resource;

pub use auth::{AccessToken, AuthScheme};
pub use config::{BaseUrl, Provider, ProviderConfig, ProviderConfigBuilder};
pub use error::ConfigError;
pub use resource::{ConditionalResource, Fetched, Headers, Resource, ResourceBuilder, ResourceCache};

pub use clients::{
    Authenticated, Conditional, HttpClient, HttpError, HttpMethod, HttpRequest,
    InvalidHttpRequestError, JsonResources, PagingError, ResourcePaging,
};
