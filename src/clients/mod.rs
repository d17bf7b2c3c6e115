//! Fetching JSON resources from provider APIs.
//!
//! # Overview
//!
//! - [`JsonResources`]: the fetch capability every layer implements
//! - [`HttpClient`]: the `reqwest` transport at the bottom of the stack
//! - [`Authenticated`]: attaches an access token to every request
//! - [`Conditional`]: revalidates GETs with `If-None-Match` against a shared cache
//! - [`ResourcePaging`]: walks a paginated list endpoint page by page
//! - [`HttpRequest`] / [`HttpMethod`]: what gets sent
//! - [`HttpError`], [`InvalidHttpRequestError`], [`PagingError`]: what can fail
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use provider_resources::{AccessToken, Provider, ProviderConfig, ResourceCache};
//! use provider_resources::clients::{HttpClient, JsonResources, ResourcePaging};
//!
//! let config = ProviderConfig::builder().provider(Provider::Gitlab).build()?;
//! let cache = Arc::new(ResourceCache::new());
//!
//! let anonymous = HttpClient::new(&config)
//!     .conditional(Arc::clone(&cache))
//!     .authenticated(AccessToken::for_provider(Provider::Gitlab, ""));
//! let user = anonymous.with_token(AccessToken::for_provider(Provider::Gitlab, token));
//!
//! let me = user.get(config.uri("user")).await?;
//! let starred = ResourcePaging::new(&user, config.uri("users/7/starred_projects"))
//!     .find(|project| project["path_with_namespace"] == "john/test")
//!     .await;
//! ```
//!
//! # Layer Order
//!
//! Requests flow from the outermost layer inward. Put [`Authenticated`]
//! outside [`Conditional`] so the cache sits next to the transport and is
//! shared by every token view derived with [`Authenticated::with_token`].

mod authenticated;
mod conditional;
mod errors;
mod http_client;
mod http_request;
mod json_resources;
mod paging;

pub use authenticated::Authenticated;
pub use conditional::Conditional;
pub use errors::{HttpError, InvalidHttpRequestError, PagingError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use json_resources::JsonResources;
pub use paging::{PaginationLinks, ResourcePaging};
