//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! carry absolute URIs: the URI of a GET is also its cache key.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;
use crate::resource::Headers;

/// HTTP methods supported by provider APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to a provider API.
///
/// # Example
///
/// ```rust
/// use provider_resources::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get = HttpRequest::builder(HttpMethod::Get, "https://api.github.com/user")
///     .build()
///     .unwrap();
///
/// let post = HttpRequest::builder(HttpMethod::Post, "https://api.github.com/user/repos")
///     .body(json!({"name": "test"}))
///     .header("X-Custom", "value")
///     .build()
///     .unwrap();
/// assert_eq!(post.headers.first("x-custom"), Some("value"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URI for this request.
    pub uri: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Headers to send in addition to the client defaults.
    pub headers: Headers,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, uri: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, uri)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `uri` is not absolute
    /// - `http_method` is `Post`, `Put` or `Patch` but `body` is `None`
    /// - `http_method` is `Get` and `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !Self::is_absolute(&self.uri) {
            return Err(InvalidHttpRequestError::InvalidUri {
                uri: self.uri.clone(),
            });
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.http_method == HttpMethod::Get && self.body.is_some() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                uri: self.uri.clone(),
            });
        }

        Ok(())
    }

    /// Returns this request with `name` set to `value`, replacing any value
    /// already present under any casing.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub(crate) fn is_absolute(uri: &str) -> bool {
        uri.split_once("://").is_some_and(|(scheme, rest)| {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
                && !rest.starts_with('/')
        })
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    uri: String,
    body: Option<serde_json::Value>,
    headers: Headers,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            http_method: method,
            uri: uri.into(),
            body: None,
            headers: Headers::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            uri: self.uri,
            body: self.body,
            headers: self.headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URI: &str = "https://api.github.com/repos/john/test";

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, URI).build().unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.uri, URI);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_verify_requires_body_for_writes() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, URI).build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { method: m }) if m == method.to_string()
            ));
        }
    }

    #[test]
    fn test_delete_needs_no_body() {
        assert!(HttpRequest::builder(HttpMethod::Delete, URI).build().is_ok());
    }

    #[test]
    fn test_verify_rejects_body_on_get() {
        let result = HttpRequest::builder(HttpMethod::Get, URI)
            .body(json!({"key": "value"}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::BodyNotAllowed { uri }) if uri == URI
        ));
    }

    #[test]
    fn test_verify_rejects_relative_uri() {
        for uri in ["repos/john/test", "", "https://", "https:///repos", "://host"] {
            let result = HttpRequest::builder(HttpMethod::Get, uri).build();
            assert!(
                matches!(result, Err(InvalidHttpRequestError::InvalidUri { .. })),
                "Expected {uri:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_with_header_replaces_existing_casing() {
        let request = HttpRequest::builder(HttpMethod::Get, URI)
            .header("if-none-match", "\"old\"")
            .build()
            .unwrap()
            .with_header("If-None-Match", "\"new\"");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers.first("IF-NONE-MATCH"), Some("\"new\""));
    }
}
