//! Access-token layer.

use std::future::Future;
use std::sync::Arc;

use crate::auth::AccessToken;
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::json_resources::JsonResources;
use crate::resource::Fetched;

const AUTHORIZATION: &str = "Authorization";

/// Attaches an `Authorization` header to every request before delegating.
///
/// The wrapped layer sits behind an [`Arc`], so [`with_token`](Self::with_token)
/// produces an independent view over the same inner layer (and the same
/// cache, if a [`Conditional`](crate::clients::Conditional) sits below).
/// The original instance keeps its own token.
///
/// An empty token sends no `Authorization` header.
#[derive(Debug)]
pub struct Authenticated<R> {
    inner: Arc<R>,
    token: AccessToken,
}

impl<R> Clone for Authenticated<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token: self.token.clone(),
        }
    }
}

impl<R: JsonResources> Authenticated<R> {
    /// Wraps `inner`, presenting `token` on every request.
    #[must_use]
    pub fn new(inner: R, token: AccessToken) -> Self {
        Self {
            inner: Arc::new(inner),
            token,
        }
    }

    /// Returns a new view over the same inner layer that presents `token`.
    #[must_use]
    pub fn with_token(&self, token: AccessToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            token,
        }
    }

    /// Returns the token presented by this view.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns the wrapped layer.
    #[must_use]
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: JsonResources> JsonResources for Authenticated<R> {
    fn request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        let request = match self.token.authorization() {
            Some(credentials) => request.with_header(AUTHORIZATION, credentials),
            None => request,
        };
        self.inner.request(request)
    }
}
