//! Raw query parameters as supplied by the client.
//!
//! Pairs keep their original order so repeatable parameters such as
//! `osm_tag` are interpreted in the sequence the client sent them.

use url::form_urlencoded;

/// Ordered, possibly repeated `name=value` pairs from a query string.
///
/// # Examples
/// ```
/// use geosearch::domain::QueryParams;
///
/// let params = QueryParams::parse("q=berlin&osm_tag=amenity&osm_tag=%3A%21bar");
/// assert_eq!(params.first("q"), Some("berlin"));
/// assert_eq!(params.all("osm_tag").collect::<Vec<_>>(), ["amenity", ":!bar"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Build from already decoded pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Supplied parameter names in order of appearance, repeats included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }

    /// First value supplied for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value supplied for `name`, treating blank values as absent.
    pub fn first_non_blank(&self, name: &str) -> Option<&str> {
        self.first(name).filter(|value| !value.trim().is_empty())
    }

    /// Every value supplied for `name`, in order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }
}
