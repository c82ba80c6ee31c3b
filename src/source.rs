//! Read-only sources of decoded query parameters.

use std::collections::{BTreeMap, HashMap};

/// A read-only snapshot of the decoded query parameters of one request.
///
/// This trait is the boundary between a web framework's request type and the
/// [`ParameterAccessor`](crate::ParameterAccessor). Values are already
/// percent-decoded by the time they come out of `get`.
///
/// # Examples
///
/// ```
/// use cgi_core::ParameterSource;
/// use std::collections::HashMap;
///
/// let mut query = HashMap::new();
/// query.insert("page".to_string(), "2".to_string());
///
/// assert_eq!(query.get_param("page"), Some("2"));
/// assert_eq!(query.get_param("sort"), None);
/// ```
pub trait ParameterSource {
    /// Returns the raw value of the parameter `name`, if present.
    fn get_param(&self, name: &str) -> Option<&str>;
}

impl ParameterSource for HashMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for &T {
    fn get_param(&self, name: &str) -> Option<&str> {
        (**self).get_param(name)
    }
}

/// Decoded query parameters of a request.
///
/// Framework integrations build one per request, either from the raw query
/// string or by inserting already-decoded pairs, and hand it to a
/// [`ParameterAccessor`](crate::ParameterAccessor).
///
/// When a name occurs more than once the last value wins.
///
/// # Examples
///
/// ```
/// use cgi_core::{ParameterSource, QueryParams};
///
/// let params = QueryParams::parse("q=rust+cgi&page=2&q=tokio%20axum");
/// assert_eq!(params.get_param("q"), Some("tokio axum"));
/// assert_eq!(params.get_param("page"), Some("2"));
///
/// let params = QueryParams::from_uri("/search?term=caf%C3%A9#top");
/// assert_eq!(params.get_param("term"), Some("café"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. `+` decodes to a space. A pair without `=`
    /// yields an empty value, which the accessor treats as absent.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self { params }
    }

    /// Parses the query component of a URI or request target.
    ///
    /// Everything before the first `?` and after the first `#` is ignored.
    pub fn from_uri(uri: &str) -> Self {
        let without_fragment = uri.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((_, query)) => Self::parse(query),
            None => Self::new(),
        }
    }

    /// Adds a decoded parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Adds a decoded parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl ParameterSource for QueryParams {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
