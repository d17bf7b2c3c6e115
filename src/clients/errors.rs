//! Error types for fetching resources.
//!
//! Status codes are never errors at this layer: a 404 or a 500 comes back as
//! an ordinary [`Resource`](crate::Resource). What fails is:
//!
//! - [`InvalidHttpRequestError`]: a request rejected before it is sent
//! - [`HttpError`]: the unified error returned by every fetch
//! - [`PagingError`]: a page walk that cannot continue
//!
//! # Example
//!
//! ```rust,ignore
//! use provider_resources::clients::{HttpError, JsonResources};
//!
//! match resources.get("https://api.github.com/user").await {
//!     Ok(resource) if resource.is_success() => println!("{}", resource.body()),
//!     Ok(resource) => println!("Unexpected status {}", resource.status()),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use provider_resources::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request was given a body.
    #[error("Cannot send a body with GET [{uri}]; GET requests are revalidated by URI alone.")]
    BodyNotAllowed {
        /// The URI of the rejected request.
        uri: String,
    },

    /// The request URI is empty or not absolute.
    #[error("Invalid request URI '{uri}'. Expected an absolute URI (e.g., 'https://api.github.com/user').")]
    InvalidUri {
        /// The URI that was provided.
        uri: String,
    },
}

/// Unified error type for fetch operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error ending a [`ResourcePaging`](crate::clients::ResourcePaging) walk.
///
/// Paging is best-effort enumeration: consumers searching a collection are
/// expected to treat these as "not found" rather than propagate them.
#[derive(Debug, Error)]
pub enum PagingError {
    /// Fetching a page failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A page came back with a non-2xx status.
    #[error("Unexpected status {status} when fetching page [{uri}].")]
    UnexpectedStatus {
        /// The page URI.
        uri: String,
        /// The status code received.
        status: u16,
    },

    /// A page body was not a JSON array.
    #[error("Page [{uri}] is not a JSON array; paging requires a list resource.")]
    NotAList {
        /// The page URI.
        uri: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "patch".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use patch without specifying data.");
    }

    #[test]
    fn test_body_not_allowed_names_uri() {
        let error = InvalidHttpRequestError::BodyNotAllowed {
            uri: "https://api.github.com/user".to_string(),
        };
        assert!(error.to_string().contains("https://api.github.com/user"));
    }

    #[test]
    fn test_http_error_is_transparent_over_invalid_request() {
        let error = HttpError::from(InvalidHttpRequestError::InvalidUri {
            uri: "user".to_string(),
        });
        assert!(error.to_string().starts_with("Invalid request URI 'user'"));
    }

    #[test]
    fn test_paging_error_messages() {
        let status = PagingError::UnexpectedStatus {
            uri: "https://api.example/items".to_string(),
            status: 500,
        };
        assert!(status.to_string().contains("500"));

        let not_a_list = PagingError::NotAList {
            uri: "https://api.example/item/1".to_string(),
        };
        assert!(not_a_list.to_string().contains("not a JSON array"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        let _ = invalid;

        let paging: &dyn std::error::Error = &PagingError::NotAList {
            uri: String::new(),
        };
        let _ = paging;
    }
}
