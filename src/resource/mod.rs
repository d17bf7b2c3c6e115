//! Immutable JSON resources returned by provider APIs.
//!
//! # Overview
//!
//! - [`Resource`]: one HTTP response outcome (status, headers, JSON body)
//! - [`ResourceBuilder`]: derives a modified copy of a [`Resource`]
//! - [`ConditionalResource`]: a [`Resource`] that carried an `ETag`
//! - [`Fetched`]: what a fetch hands back, either plain or conditional
//! - [`ResourceCache`]: the URI-keyed store of conditional resources
//! - [`Headers`]: ordered, case-insensitive header multimap
//!
//! # Example
//!
//! ```rust
//! use provider_resources::{Headers, Resource};
//! use serde_json::json;
//!
//! let original = Resource::new(200, Headers::new(), json!({"id": 1}));
//! let derived = original.to_builder().status(201).build();
//!
//! assert_eq!(original.status(), 200);
//! assert_eq!(derived.status(), 201);
//! assert_eq!(derived.body(), original.body());
//! ```

mod cache;
mod conditional;
mod headers;

pub use cache::ResourceCache;
pub use conditional::{ConditionalResource, Fetched};
pub use headers::Headers;

use std::sync::Arc;

/// HTTP status code for "Not Modified".
pub const NOT_MODIFIED: u16 = 304;

/// A single HTTP response outcome: status code, headers and JSON body.
///
/// A `Resource` never changes after construction. "Modifying" one means
/// deriving a new value through [`Resource::to_builder`]; the body is shared
/// behind an [`Arc`] so derived copies are cheap and can never observe a
/// later edit.
///
/// The body is not self-describing: callers pick the view they expect with
/// [`as_json_object`](Self::as_json_object) or
/// [`as_json_array`](Self::as_json_array).
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    status: u16,
    headers: Headers,
    body: Arc<serde_json::Value>,
}

impl Resource {
    /// Creates a new resource.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: serde_json::Value) -> Self {
        Self {
            status,
            headers,
            body: Arc::new(body),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the raw JSON body.
    #[must_use]
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Returns the body as a JSON object, if it is one.
    #[must_use]
    pub fn as_json_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.body.as_object()
    }

    /// Returns the body as a JSON array, if it is one.
    #[must_use]
    pub fn as_json_array(&self) -> Option<&Vec<serde_json::Value>> {
        self.body.as_array()
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns `true` if the status code is 304 Not Modified.
    #[must_use]
    pub const fn is_not_modified(&self) -> bool {
        self.status == NOT_MODIFIED
    }

    /// Starts deriving a new resource from this one.
    ///
    /// Every field not overridden on the builder is copied from `self`.
    #[must_use]
    pub fn to_builder(&self) -> ResourceBuilder {
        ResourceBuilder {
            status: self.status,
            headers: self.headers.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

/// Builder deriving a new [`Resource`] from an existing one.
///
/// # Example
///
/// ```rust
/// use provider_resources::{Headers, Resource};
/// use serde_json::json;
///
/// let base = Resource::new(200, Headers::new().with("ETag", "\"v1\""), json!([]));
/// let derived = base
///     .to_builder()
///     .headers(|headers| headers.with("X-Normalized", "true"))
///     .body(json!([1, 2, 3]))
///     .build();
///
/// assert_eq!(derived.headers().first("etag"), Some("\"v1\""));
/// assert_eq!(derived.as_json_array().unwrap().len(), 3);
/// assert!(base.as_json_array().unwrap().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct ResourceBuilder {
    status: u16,
    headers: Headers,
    body: Arc<serde_json::Value>,
}

impl ResourceBuilder {
    /// Overrides the status code.
    #[must_use]
    pub const fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Overrides the body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Arc::new(body);
        self
    }

    /// Transforms the headers.
    ///
    /// The closure receives the current headers and returns the headers to
    /// use, so it can add to them or replace them entirely.
    #[must_use]
    pub fn headers(mut self, transform: impl FnOnce(Headers) -> Headers) -> Self {
        self.headers = transform(self.headers);
        self
    }

    /// Builds the derived [`Resource`].
    #[must_use]
    pub fn build(self) -> Resource {
        Resource {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}
