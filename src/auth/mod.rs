//! Authentication types for provider API access.
//!
//! - [`AccessToken`]: a provider access token with a masked `Debug`
//! - [`AuthScheme`]: how the token is written into the `Authorization` header
//!
//! Tokens are attached to requests by the
//! [`Authenticated`](crate::clients::Authenticated) layer.

mod token;

pub use token::{AccessToken, AuthScheme};
