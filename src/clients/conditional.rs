//! ETag revalidation layer.

use std::future::Future;
use std::sync::Arc;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::json_resources::JsonResources;
use crate::resource::{ConditionalResource, Fetched, ResourceCache};

const IF_NONE_MATCH: &str = "If-None-Match";

/// Revalidates GET requests against a shared [`ResourceCache`].
///
/// For a GET to a cached URI the request carries `If-None-Match: <etag>`.
/// Then:
///
/// - `304 Not Modified` returns the cached [`ConditionalResource`] as is;
///   its creation time still reflects the last real fetch.
/// - A 2xx response with an `ETag` is cached under the URI (replacing any
///   earlier entry) and returned as conditional.
/// - Anything else is returned untouched and the cache is left alone.
///
/// POST, PUT, PATCH and DELETE bypass the cache. A GET carrying a body is
/// rejected before it reaches the inner layer.
#[derive(Debug, Clone)]
pub struct Conditional<R> {
    inner: R,
    cache: Arc<ResourceCache>,
}

impl<R: JsonResources> Conditional<R> {
    /// Wraps `inner`, revalidating against `cache`.
    #[must_use]
    pub const fn new(inner: R, cache: Arc<ResourceCache>) -> Self {
        Self { inner, cache }
    }

    /// Returns the cache this layer reads and writes.
    #[must_use]
    pub const fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    /// Returns the wrapped layer.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    async fn revalidate(&self, request: HttpRequest) -> Result<Fetched, HttpError> {
        request.verify()?;

        let uri = request.uri.clone();
        let cached = self.cache.get(&uri);
        let request = match &cached {
            Some(conditional) => request.with_header(IF_NONE_MATCH, conditional.etag()),
            None => request,
        };

        let fetched = self.inner.request(request).await?;

        if fetched.is_not_modified() {
            if let Some(conditional) = cached {
                tracing::debug!(
                    "Resource [{}] not modified (ETag {}), serving cached copy",
                    uri,
                    conditional.etag()
                );
                return Ok(Fetched::Conditional(conditional));
            }
            return Ok(fetched);
        }

        if fetched.is_success() {
            if let Some(conditional) = ConditionalResource::from_resource(uri.as_str(), &fetched) {
                tracing::debug!(
                    "Caching resource [{}] with ETag {}",
                    uri,
                    conditional.etag()
                );
                self.cache.put(uri, Arc::clone(&conditional));
                return Ok(Fetched::Conditional(conditional));
            }
        }

        Ok(fetched)
    }
}

impl<R: JsonResources> JsonResources for Conditional<R> {
    fn request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        async move {
            if request.http_method == HttpMethod::Get {
                self.revalidate(request).await
            } else {
                self.inner.request(request).await
            }
        }
    }
}
