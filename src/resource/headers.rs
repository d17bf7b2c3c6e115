//! Ordered, case-insensitive HTTP header multimap.

use indexmap::IndexMap;

/// HTTP headers as an ordered multimap from name to values.
///
/// Entries keep their insertion order and the casing they were inserted
/// with. Lookups ignore ASCII case and return the first matching entry in
/// iteration order, so a response carrying both `ETag` and `etag` resolves
/// deterministically to whichever arrived first.
///
/// # Example
///
/// ```rust
/// use provider_resources::Headers;
///
/// let headers = Headers::new()
///     .with("ETag", "\"abc\"")
///     .with("Link", "<https://api.example/items?page=2>; rel=\"next\"");
///
/// assert_eq!(headers.first("etag"), Some("\"abc\""));
/// assert!(headers.contains("LINK"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, Vec<String>>,
}

impl Headers {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the values of the first entry whose name matches `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value of the first entry whose name matches `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Returns every value of every entry whose name matches `name`, in order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().map(String::as_str))
    }

    /// Returns `true` if an entry matches `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets `name` to a single value, dropping every entry that matches it.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.entries.insert(name, vec![value.into()]);
    }

    /// Adds a value to the first entry matching `name`, creating it if absent.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let existing = self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name));
        match existing {
            Some((_, values)) => values.push(value.into()),
            None => {
                self.entries.insert(name, vec![value.into()]);
            }
        }
    }

    /// Removes every entry matching `name`, returning the removed values.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.entries.retain(|key, values| {
            if key.eq_ignore_ascii_case(name) {
                removed.append(values);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Consuming form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}
