//! URI-keyed store of conditional resources.

use std::sync::Arc;

use dashmap::DashMap;

use super::ConditionalResource;

/// The in-process store behind conditional revalidation.
///
/// Maps a request URI to the last [`ConditionalResource`] fetched from it.
/// A `put` replaces any prior entry for the URI atomically; concurrent
/// writers to the same URI resolve as last-writer-wins and readers never see
/// a partial entry.
///
/// There is no expiry: an entry lives until it is overwritten, removed, or
/// the cache is dropped. Share one instance per process (or per session) as
/// an `Arc<ResourceCache>`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use provider_resources::{ConditionalResource, Fetched, Headers, Resource, ResourceCache};
/// use serde_json::json;
///
/// let cache = ResourceCache::new();
/// let uri = "https://api.example/resource";
/// let fetched = Fetched::from(Resource::new(200, Headers::new().with("ETag", "\"abc\""), json!({})));
/// let conditional = ConditionalResource::from_resource(uri, &fetched).unwrap();
///
/// cache.put(uri, Arc::clone(&conditional));
/// assert!(Arc::ptr_eq(&cache.get(uri).unwrap(), &conditional));
/// ```
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: DashMap<String, Arc<ConditionalResource>>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceCache>();
};

impl ResourceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resource for `uri`, if any.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<Arc<ConditionalResource>> {
        self.entries.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores `resource` under `uri`, returning the entry it replaced.
    pub fn put(
        &self,
        uri: impl Into<String>,
        resource: Arc<ConditionalResource>,
    ) -> Option<Arc<ConditionalResource>> {
        self.entries.insert(uri.into(), resource)
    }

    /// Drops the entry for `uri`, returning it.
    pub fn remove(&self, uri: &str) -> Option<Arc<ConditionalResource>> {
        self.entries.remove(uri).map(|(_, resource)| resource)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached URIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
