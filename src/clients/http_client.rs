//! HTTP transport for provider APIs.
//!
//! This module provides the [`HttpClient`] type, the bottom of every
//! [`JsonResources`] stack.

use std::future::Future;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::json_resources::JsonResources;
use crate::config::ProviderConfig;
use crate::resource::{Fetched, Headers, Resource};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends requests to a provider API over `reqwest`.
///
/// The client adds default headers (`User-Agent`, the provider's `Accept`,
/// and `Content-Type` when a body is present), then returns every response,
/// whatever its status, as a [`Resource`]. It never retries and never
/// interprets status codes.
///
/// Cloning is cheap: clones share the same connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use provider_resources::{Provider, ProviderConfig};
/// use provider_resources::clients::{HttpClient, JsonResources};
///
/// let config = ProviderConfig::builder().provider(Provider::Github).build()?;
/// let client = HttpClient::new(&config);
///
/// let resource = client.get(config.uri("repos/john/test")).await?;
/// if resource.is_success() {
///     println!("{}", resource.body());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: Headers,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured provider.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}provider-resources v{SDK_VERSION} | Rust {rust_version}");

        let default_headers = Headers::new()
            .with("User-Agent", user_agent)
            .with("Accept", config.provider().accept());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
        }
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Sends `request` and parses the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation
    /// and [`HttpError::Network`] if no response was received.
    pub async fn send(&self, request: HttpRequest) -> Result<Resource, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type", "application/json");
        }
        for (name, values) in request.headers.iter() {
            headers.remove(name);
            for value in values {
                headers.append(name, value.as_str());
            }
        }

        let method = match request.http_method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut req_builder = self.client.request(method, &request.uri);
        for (name, values) in headers.iter() {
            for value in values {
                req_builder = req_builder.header(name, value);
            }
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        // A body cut short is a transport failure, not an empty resource
        let body_text = res.text().await?;
        let body = Self::parse_body(code, &body_text);

        tracing::debug!(
            "{} [{}] answered {}",
            request.http_method,
            request.uri,
            code
        );

        Ok(Resource::new(code, res_headers, body))
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| match value.to_str() {
                Ok(value) => Some((name.as_str().to_string(), value.to_string())),
                Err(_) => {
                    tracing::debug!("Skipping non-ASCII value of response header [{}]", name);
                    None
                }
            })
            .collect()
    }

    fn parse_body(code: u16, body_text: &str) -> serde_json::Value {
        if body_text.is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text).unwrap_or_else(|_| {
            // 5xx pages are often HTML; keep them for diagnostics
            if code >= 500 {
                serde_json::json!({ "raw_body": body_text })
            } else {
                serde_json::json!({})
            }
        })
    }
}

impl JsonResources for HttpClient {
    fn request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Fetched, HttpError>> + Send {
        async move { self.send(request).await.map(Fetched::Plain) }
    }
}
