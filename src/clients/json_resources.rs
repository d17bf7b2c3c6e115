//! The fetch capability shared by the transport and every layer above it.

use std::future::Future;
use std::sync::Arc;

use crate::auth::AccessToken;
use crate::clients::authenticated::Authenticated;
use crate::clients::conditional::Conditional;
use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::resource::{Fetched, Headers, ResourceCache};

/// Fetches JSON resources from a provider API.
///
/// Implementors supply [`request`](Self::request); the verb helpers build a
/// validated [`HttpRequest`] and forward to it. Layers such as
/// [`Authenticated`] and [`Conditional`] implement this trait by wrapping
/// another implementation, so they can be stacked or omitted independently:
///
/// ```rust,ignore
/// let cache = Arc::new(ResourceCache::new());
/// let resources = HttpClient::new(&config)
///     .conditional(Arc::clone(&cache))
///     .authenticated(AccessToken::for_provider(Provider::Github, token));
///
/// let repo = resources.get("https://api.github.com/repos/john/test").await?;
/// ```
///
/// Every status code is returned as an ordinary [`Fetched`] value. Only
/// invalid requests and transport failures are errors.
pub trait JsonResources: Send + Sync {
    /// Sends `request` and returns the resulting resource.
    fn request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send;

    /// GET `uri`.
    fn get(&self, uri: impl Into<String>) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        self.get_with_headers(uri, Headers::new())
    }

    /// GET `uri` with extra request headers.
    fn get_with_headers(
        &self,
        uri: impl Into<String>,
        headers: Headers,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = HttpRequest::builder(HttpMethod::Get, uri)
            .headers(headers)
            .build();
        async move { self.request(request?).await }
    }

    /// POST `body` to `uri`.
    fn post(
        &self,
        uri: impl Into<String>,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = HttpRequest::builder(HttpMethod::Post, uri).body(body).build();
        async move { self.request(request?).await }
    }

    /// PUT `body` to `uri`.
    fn put(
        &self,
        uri: impl Into<String>,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = HttpRequest::builder(HttpMethod::Put, uri).body(body).build();
        async move { self.request(request?).await }
    }

    /// PATCH `uri` with `body`.
    fn patch(
        &self,
        uri: impl Into<String>,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = HttpRequest::builder(HttpMethod::Patch, uri).body(body).build();
        async move { self.request(request?).await }
    }

    /// DELETE `uri`.
    fn delete(&self, uri: impl Into<String>) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = HttpRequest::builder(HttpMethod::Delete, uri).build();
        async move { self.request(request?).await }
    }

    /// Wraps this instance so every request carries `token`.
    fn authenticated(self, token: AccessToken) -> Authenticated<Self>
    where
        Self: Sized,
    {
        Authenticated::new(self, token)
    }

    /// Wraps this instance so GET requests are revalidated against `cache`.
    fn conditional(self, cache: Arc<ResourceCache>) -> Conditional<Self>
    where
        Self: Sized,
    {
        Conditional::new(self, cache)
    }
}
