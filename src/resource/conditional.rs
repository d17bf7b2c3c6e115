//! Resources eligible for ETag revalidation.

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Resource, ResourceBuilder};

const ETAG: &str = "ETag";

/// A [`Resource`] that carried an `ETag` header, annotated with the URI that
/// produced it and the moment it was fetched.
///
/// The URI doubles as the cache key. Instances are never mutated: a
/// successful revalidation replaces the cached value with a new one, and a
/// `304 Not Modified` hands back the existing one with its original
/// [`created_at`](Self::created_at).
#[derive(Debug)]
pub struct ConditionalResource {
    uri: String,
    etag: String,
    created_at: DateTime<Utc>,
    resource: Resource,
}

impl ConditionalResource {
    /// Decides whether `resource` is cacheable and wraps it if so.
    ///
    /// An already conditional input is returned as the same [`Arc`]. For a
    /// plain resource the headers are scanned for `ETag` ignoring case; the
    /// first value of the first match becomes the validator. Without one the
    /// response is not cacheable and `None` is returned.
    ///
    /// This is the only place that decides cache eligibility.
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_resources::{ConditionalResource, Fetched, Headers, Resource};
    /// use serde_json::json;
    ///
    /// let uri = "https://api.example/resource";
    /// let plain = Fetched::from(Resource::new(
    ///     200,
    ///     Headers::new().with("etag", "\"abc\""),
    ///     json!({"id": 1}),
    /// ));
    ///
    /// let conditional = ConditionalResource::from_resource(uri, &plain).unwrap();
    /// assert_eq!(conditional.etag(), "\"abc\"");
    /// assert_eq!(conditional.uri(), uri);
    ///
    /// let uncacheable = Fetched::from(Resource::new(200, Headers::new(), json!({})));
    /// assert!(ConditionalResource::from_resource(uri, &uncacheable).is_none());
    /// ```
    #[must_use]
    pub fn from_resource(uri: impl Into<String>, resource: &Fetched) -> Option<Arc<Self>> {
        match resource {
            Fetched::Conditional(conditional) => Some(Arc::clone(conditional)),
            Fetched::Plain(plain) => {
                let etag = plain.headers().first(ETAG)?.to_string();
                Some(Arc::new(Self::new(uri.into(), etag, plain.clone())))
            }
        }
    }

    fn new(uri: String, etag: String, resource: Resource) -> Self {
        Self {
            uri,
            etag,
            created_at: Utc::now(),
            resource,
        }
    }

    /// Returns the URI this resource was fetched from.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the validator sent back as `If-None-Match`.
    #[must_use]
    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// Returns when the underlying response was received.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the wrapped resource.
    #[must_use]
    pub const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Derives a new conditional resource with the same URI and ETag.
    ///
    /// Used to correct a cached response (e.g. normalize its body before it is
    /// stored) without losing its cache metadata.
    #[must_use]
    pub fn rebuild(&self, derive: impl FnOnce(ResourceBuilder) -> ResourceBuilder) -> Self {
        Self::new(
            self.uri.clone(),
            self.etag.clone(),
            derive(self.resource.to_builder()).build(),
        )
    }
}

impl Deref for ConditionalResource {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}

/// The outcome of a fetch: either a plain [`Resource`] or a cached
/// [`ConditionalResource`].
///
/// Both dereference to [`Resource`], so callers read status, headers and body
/// the same way regardless of how the value was produced.
#[derive(Clone, Debug)]
pub enum Fetched {
    /// A response that was not cached.
    Plain(Resource),
    /// A response tracked in the conditional cache.
    Conditional(Arc<ConditionalResource>),
}

impl Fetched {
    /// Returns the underlying resource.
    #[must_use]
    pub fn resource(&self) -> &Resource {
        match self {
            Self::Plain(resource) => resource,
            Self::Conditional(conditional) => conditional.resource(),
        }
    }

    /// Returns the conditional wrapper, if this value is cached.
    #[must_use]
    pub const fn as_conditional(&self) -> Option<&Arc<ConditionalResource>> {
        match self {
            Self::Plain(_) => None,
            Self::Conditional(conditional) => Some(conditional),
        }
    }

    /// Returns `true` if this value is tracked in the conditional cache.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        matches!(self, Self::Conditional(_))
    }

    /// Derives a new value; a conditional input stays conditional.
    #[must_use]
    pub fn rebuild(&self, derive: impl FnOnce(ResourceBuilder) -> ResourceBuilder) -> Self {
        match self {
            Self::Plain(resource) => Self::Plain(derive(resource.to_builder()).build()),
            Self::Conditional(conditional) => Self::Conditional(Arc::new(conditional.rebuild(derive))),
        }
    }
}

impl Deref for Fetched {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        self.resource()
    }
}

impl From<Resource> for Fetched {
    fn from(resource: Resource) -> Self {
        Self::Plain(resource)
    }
}

impl From<Arc<ConditionalResource>> for Fetched {
    fn from(conditional: Arc<ConditionalResource>) -> Self {
        Self::Conditional(conditional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Headers;
    use serde_json::json;

    const URI: &str = "https://api.example/resource";

    fn with_headers(headers: Headers) -> Fetched {
        Fetched::from(Resource::new(200, headers, json!({"id": 1})))
    }

    #[test]
    fn test_etag_header_makes_resource_conditional() {
        for name in ["ETag", "etag", "ETAG", "Etag"] {
            let fetched = with_headers(Headers::new().with(name, "\"abc\""));
            let conditional = ConditionalResource::from_resource(URI, &fetched)
                .unwrap_or_else(|| panic!("Expected {name} to be recognized"));
            assert_eq!(conditional.etag(), "\"abc\"");
            assert_eq!(conditional.uri(), URI);
        }
    }

    #[test]
    fn test_missing_etag_is_not_cacheable() {
        let fetched = with_headers(Headers::new().with("Last-Modified", "yesterday"));
        assert!(ConditionalResource::from_resource(URI, &fetched).is_none());
    }

    #[test]
    fn test_first_etag_value_wins() {
        let mut headers = Headers::new();
        headers.append("etag", "\"first\"");
        headers.append("ETag", "\"second\"");
        let fetched = with_headers(headers);

        let conditional = ConditionalResource::from_resource(URI, &fetched).unwrap();
        assert_eq!(conditional.etag(), "\"first\"");
    }

    #[test]
    fn test_from_resource_is_idempotent() {
        let fetched = with_headers(Headers::new().with("ETag", "\"abc\""));
        let first = ConditionalResource::from_resource(URI, &fetched).unwrap();
        let again = ConditionalResource::from_resource(URI, &Fetched::from(Arc::clone(&first))).unwrap();

        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn test_forwarding_to_wrapped_resource() {
        let fetched = with_headers(Headers::new().with("ETag", "\"abc\""));
        let conditional = ConditionalResource::from_resource(URI, &fetched).unwrap();

        assert_eq!(conditional.status(), 200);
        assert_eq!(conditional.body(), &json!({"id": 1}));
        assert_eq!(conditional.headers(), fetched.headers());
    }

    #[test]
    fn test_rebuild_keeps_cache_metadata() {
        let fetched = with_headers(Headers::new().with("ETag", "\"abc\""));
        let conditional = ConditionalResource::from_resource(URI, &fetched).unwrap();

        let corrected = conditional.rebuild(|builder| builder.body(json!({"id": 1, "fixed": true})));

        assert_eq!(corrected.etag(), "\"abc\"");
        assert_eq!(corrected.uri(), URI);
        assert_eq!(corrected.body()["fixed"], json!(true));
        assert_eq!(conditional.body(), &json!({"id": 1}));
    }

    #[test]
    fn test_fetched_rebuild_preserves_conditionality() {
        let plain = with_headers(Headers::new().with("ETag", "\"abc\""));
        assert!(!plain.rebuild(|builder| builder.status(201)).is_conditional());

        let conditional = Fetched::from(ConditionalResource::from_resource(URI, &plain).unwrap());
        let derived = conditional.rebuild(|builder| builder.status(201));
        assert!(derived.is_conditional());
        assert_eq!(derived.status(), 201);
        assert_eq!(derived.as_conditional().unwrap().etag(), "\"abc\"");
    }
}
