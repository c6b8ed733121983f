//! OSM tag filter clauses supplied through repeated `osm_tag` parameters.
//!
//! Grammar, one clause per parameter value:
//!
//! ```text
//! key          entity carries `key`
//! !key         entity does not carry `key`
//! key:         same as `key`
//! key:value    entity has `key=value`
//! !key:value   entity does not have `key=value`
//! key:!value   entity carries `key`, with any value except `value`
//! :value       some tag has `value`
//! :!value      no tag has `value`
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Polarity and match kind of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFilterKind {
    /// The entity must match.
    Include,
    /// The entity must not match.
    Exclude,
    /// The entity must carry the key but with a different value.
    ExcludeValue,
}

/// Reasons a filter expression is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagFilterError {
    /// Nothing but whitespace was supplied.
    #[error("filter must not be empty")]
    Empty,
    /// More than one `:` separator.
    #[error("filter must contain at most one ':' separator")]
    TooManySegments,
    /// Neither a key nor a value survived stripping the negation markers.
    #[error("filter must name a key or a value")]
    MissingTerm,
    /// A negation marker was applied where the grammar does not allow it.
    #[error("filter negation must precede either the key or the value, not both")]
    MisplacedNegation,
}

/// One parsed `osm_tag` clause.
///
/// At least one of `key` and `value` is always present;
/// [`TagFilterKind::ExcludeValue`] always carries both.
///
/// # Examples
/// ```
/// use geosearch::domain::{TagFilter, TagFilterKind};
///
/// let filter: TagFilter = "tourism:!hotel".parse().expect("valid filter");
/// assert_eq!(filter.kind(), TagFilterKind::ExcludeValue);
/// assert_eq!(filter.key(), Some("tourism"));
/// assert_eq!(filter.value(), Some("hotel"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFilter {
    kind: TagFilterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl TagFilter {
    /// Parse a single filter expression.
    pub fn parse(raw: &str) -> Result<Self, TagFilterError> {
        let filter = raw.trim();
        if filter.is_empty() {
            return Err(TagFilterError::Empty);
        }

        let mut segments = filter.split(':');
        let key_segment = segments.next().unwrap_or_default();
        let value_segment = segments.next();
        if segments.next().is_some() {
            return Err(TagFilterError::TooManySegments);
        }

        let (exclude_key, key) = strip_negation(key_segment);
        let (exclude_value, value) = strip_negation(value_segment.unwrap_or_default());

        let kind = match (key.is_empty(), value.is_empty()) {
            (true, true) => return Err(TagFilterError::MissingTerm),
            (true, false) if exclude_key => return Err(TagFilterError::MisplacedNegation),
            (false, true) if exclude_value => return Err(TagFilterError::MisplacedNegation),
            (false, false) if exclude_key && exclude_value => {
                return Err(TagFilterError::MisplacedNegation);
            }
            (false, false) if exclude_value => TagFilterKind::ExcludeValue,
            (true, false) if exclude_value => TagFilterKind::Exclude,
            _ if exclude_key => TagFilterKind::Exclude,
            _ => TagFilterKind::Include,
        };

        Ok(Self {
            kind,
            key: non_empty(key),
            value: non_empty(value),
        })
    }

    /// Polarity and match kind.
    pub fn kind(&self) -> TagFilterKind {
        self.kind
    }

    /// Constrained key, absent for value-only clauses.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Constrained value, absent for key-presence clauses.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Evaluate the clause against an entity's tags.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use geosearch::domain::TagFilter;
    ///
    /// let tags = BTreeMap::from([("amenity".to_owned(), "cafe".to_owned())]);
    /// assert!(TagFilter::parse("amenity").expect("valid").matches(&tags));
    /// assert!(!TagFilter::parse(":!cafe").expect("valid").matches(&tags));
    /// ```
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        let hit = match (self.key(), self.value()) {
            (Some(key), None) => tags.contains_key(key),
            (None, Some(value)) => tags.values().any(|candidate| candidate == value),
            (Some(key), Some(value)) => tags.get(key).is_some_and(|candidate| candidate == value),
            (None, None) => false,
        };

        match self.kind {
            TagFilterKind::Include => hit,
            TagFilterKind::Exclude => !hit,
            TagFilterKind::ExcludeValue => {
                !hit && self.key().is_some_and(|key| tags.contains_key(key))
            }
        }
    }
}

impl FromStr for TagFilter {
    type Err = TagFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn strip_negation(segment: &str) -> (bool, &str) {
    match segment.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, segment),
    }
}

fn non_empty(term: &str) -> Option<String> {
    (!term.is_empty()).then(|| term.to_owned())
}
