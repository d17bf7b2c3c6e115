//! Lazy traversal of paginated list endpoints.
//!
//! Provider list endpoints return one JSON array per page and announce the
//! following page through a `Link` header:
//!
//! ```text
//! Link: <https://api.github.com/user/starred?page=2>; rel="next",
//!       <https://api.github.com/user/starred?page=5>; rel="last"
//! ```
//!
//! [`ResourcePaging`] follows the `next` relation one page at a time.

use crate::clients::errors::PagingError;
use crate::clients::http_request::HttpRequest;
use crate::clients::json_resources::JsonResources;
use crate::resource::{Fetched, Headers};

const LINK: &str = "Link";

/// Page URLs parsed from a `Link` header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// The URL of the next page, if any.
    pub next: Option<String>,
    /// The URL of the previous page, if any.
    pub prev: Option<String>,
    /// The URL of the first page, if any.
    pub first: Option<String>,
    /// The URL of the last page, if any.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parses a `Link` header value.
    ///
    /// The format is a comma-separated list of `<url>; rel="name"` entries.
    /// Entries without a bracketed URL or a `rel` parameter are skipped. When
    /// a relation appears more than once the first entry wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use provider_resources::clients::PaginationLinks;
    ///
    /// let links = PaginationLinks::parse_link_header(
    ///     r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next", <https://gitlab.com/api/v4/projects?page=1>; rel="first""#,
    /// );
    /// assert_eq!(links.next.as_deref(), Some("https://gitlab.com/api/v4/projects?page=2"));
    /// assert_eq!(links.first.as_deref(), Some("https://gitlab.com/api/v4/projects?page=1"));
    /// assert!(links.prev.is_none());
    /// ```
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();
        result.merge_link_header(header_value);
        result
    }

    /// Parses every `Link` header in `headers`, in order.
    #[must_use]
    pub fn from_headers(headers: &Headers) -> Self {
        let mut result = Self::default();
        for value in headers.all(LINK) {
            result.merge_link_header(value);
        }
        result
    }

    fn merge_link_header(&mut self, header_value: &str) {
        for link in header_value.split(',') {
            let mut parts = link.split(';').map(str::trim);

            let Some(url) = parts
                .next()
                .and_then(|part| part.strip_prefix('<'))
                .and_then(|part| part.strip_suffix('>'))
                .filter(|url| !url.is_empty())
            else {
                continue;
            };

            let rels = parts.find_map(|param| {
                let (key, value) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("rel")
                    .then(|| value.trim().trim_matches('"'))
            });

            // rel may list several space-separated relation types
            for rel in rels.into_iter().flat_map(str::split_whitespace) {
                let slot = match rel.to_ascii_lowercase().as_str() {
                    "next" => &mut self.next,
                    "prev" | "previous" => &mut self.prev,
                    "first" => &mut self.first,
                    "last" => &mut self.last,
                    _ => continue,
                };
                slot.get_or_insert_with(|| url.to_string());
            }
        }
    }
}

/// A lazy, forward-only walk over the pages of a list endpoint.
///
/// Each call to [`next_page`](Self::next_page) fetches one page and reads its
/// `Link` header to find the next one, so pages arrive strictly in order and
/// no page is requested before its predecessor has been read. The walk ends
/// when a page carries no usable `next` link.
///
/// An instance cannot be rewound: start a new `ResourcePaging` from the
/// original URI to traverse again. After any error the instance is
/// exhausted.
///
/// # Example
///
/// ```rust,ignore
/// let mut pages = ResourcePaging::new(&resources, "https://api.github.com/user/starred");
/// while let Some(page) = pages.next_page().await? {
///     for repo in page.as_json_array().into_iter().flatten() {
///         println!("{}", repo["full_name"]);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ResourcePaging<'a, R> {
    resources: &'a R,
    next: Option<String>,
    pages: usize,
}

impl<'a, R: JsonResources> ResourcePaging<'a, R> {
    /// Starts a walk at `uri`. Nothing is fetched until the first pull.
    #[must_use]
    pub fn new(resources: &'a R, uri: impl Into<String>) -> Self {
        Self {
            resources,
            next: Some(uri.into()),
            pages: 0,
        }
    }

    /// Returns `true` if another page remains to be fetched.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Number of pages yielded so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Fetches the next page, or returns `Ok(None)` once the walk is over.
    ///
    /// # Errors
    ///
    /// - [`PagingError::Http`] if the fetch itself failed
    /// - [`PagingError::UnexpectedStatus`] if the page status is not 2xx
    /// - [`PagingError::NotAList`] if the page body is not a JSON array
    pub async fn next_page(&mut self) -> Result<Option<Fetched>, PagingError> {
        let Some(uri) = self.next.take() else {
            return Ok(None);
        };

        tracing::debug!("Fetching page {} from [{}]", self.pages + 1, uri);
        let page = self.resources.get(uri.as_str()).await?;

        if !page.is_success() {
            return Err(PagingError::UnexpectedStatus {
                uri,
                status: page.status(),
            });
        }
        if page.as_json_array().is_none() {
            return Err(PagingError::NotAList { uri });
        }

        self.next = PaginationLinks::from_headers(page.headers())
            .next
            .filter(|next| {
                let usable = HttpRequest::is_absolute(next);
                if !usable {
                    tracing::debug!("Ignoring relative next link [{}] on [{}]", next, uri);
                }
                usable
            });
        self.pages += 1;
        Ok(Some(page))
    }

    /// Returns the first entry, across all remaining pages, that matches
    /// `predicate`.
    ///
    /// Paging is best-effort: if a page cannot be fetched or read, the search
    /// stops, logs a warning and reports "not found".
    pub async fn find(
        mut self,
        mut predicate: impl FnMut(&serde_json::Value) -> bool,
    ) -> Option<serde_json::Value> {
        loop {
            match self.next_page().await {
                Ok(Some(page)) => {
                    let found = page
                        .as_json_array()
                        .and_then(|entries| entries.iter().find(|&entry| predicate(entry)));
                    if let Some(entry) = found {
                        return Some(entry.clone());
                    }
                }
                Ok(None) => return None,
                Err(error) => {
                    tracing::warn!(
                        "Something went wrong while walking pages after {} page(s): [{}].",
                        self.pages,
                        error
                    );
                    return None;
                }
            }
        }
    }
}
