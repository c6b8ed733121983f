//! `Accept-Language` parsing and language-tag lookup.
//!
//! Parsing follows the HTTP list syntax with optional `q` weights; lookup
//! follows the RFC 4647 "lookup" scheme: ranges are tried by descending weight
//! and progressively truncated until one matches a supported tag. Zero-weight
//! ranges never select a tag and veto any tag they would match.

use thiserror::Error;

const MAX_WEIGHT: f64 = 1.0;
const WILDCARD: &str = "*";

/// Reasons a header value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceptLanguageError {
    /// A range is not a syntactically valid language range.
    #[error("invalid language range '{range}'")]
    InvalidRange {
        /// Offending range text.
        range: String,
    },
    /// A parameter other than a well-formed `q` weight followed a range.
    #[error("invalid weight '{weight}' for language range '{range}'")]
    InvalidWeight {
        /// Range the parameter belonged to.
        range: String,
        /// Offending parameter text.
        weight: String,
    },
}

/// A weighted language range, normalised to lower case.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    range: String,
    /// Always within `0.0..=1.0`.
    weight: f64,
}

impl LanguageRange {
    /// Lower-cased range text, e.g. `de-ch` or `*`.
    pub fn range(&self) -> &str {
        self.range.as_str()
    }

    /// Weight between `0.0` and `1.0`; ranges without `q` weigh `1.0`.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Parse a header into ranges ordered by descending weight. Ranges of equal
/// weight keep their header order.
///
/// # Examples
/// ```
/// use geosearch::domain::accept_language::parse;
///
/// let ranges = parse("fr;q=0.5, de-CH, en;q=0.8").expect("valid header");
/// let order: Vec<_> = ranges.iter().map(|r| r.range()).collect();
/// assert_eq!(order, ["de-ch", "en", "fr"]);
/// ```
pub fn parse(header: &str) -> Result<Vec<LanguageRange>, AcceptLanguageError> {
    let mut ranges = header
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;
    ranges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    Ok(ranges)
}

fn parse_item(item: &str) -> Result<LanguageRange, AcceptLanguageError> {
    let mut parts = item.split(';');
    let range = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !is_valid_range(&range) {
        return Err(AcceptLanguageError::InvalidRange { range });
    }

    let weight = match parts.next() {
        None => MAX_WEIGHT,
        Some(param) => {
            let invalid = || AcceptLanguageError::InvalidWeight {
                range: range.clone(),
                weight: param.trim().to_owned(),
            };
            if parts.next().is_some() {
                return Err(invalid());
            }
            parse_weight(param).ok_or_else(invalid)?
        }
    };

    Ok(LanguageRange { range, weight })
}

fn is_valid_range(range: &str) -> bool {
    if range == WILDCARD {
        return true;
    }
    let mut subtags = range.split('-');
    let primary_ok = subtags.next().is_some_and(|primary| {
        primary == WILDCARD || is_subtag(primary, |c| c.is_ascii_alphabetic())
    });
    primary_ok
        && subtags.all(|subtag| {
            subtag == WILDCARD || is_subtag(subtag, |c| c.is_ascii_alphanumeric())
        })
}

fn is_subtag(subtag: &str, allowed: impl Fn(char) -> bool) -> bool {
    (1..=8).contains(&subtag.len()) && subtag.chars().all(allowed)
}

/// Parse `q=<qvalue>`. Any decimal within `0..=1` is accepted, regardless
/// of how many fractional digits it carries.
fn parse_weight(param: &str) -> Option<f64> {
    let (name, value) = param.split_once('=')?;
    if !name.trim().eq_ignore_ascii_case("q") {
        return None;
    }
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| (0.0..=MAX_WEIGHT).contains(weight))
}

/// Select the best tag for the given ranges. `tags` are scanned in order for
/// every candidate range, so their order breaks ties.
///
/// # Examples
/// ```
/// use geosearch::domain::accept_language::{lookup, parse};
///
/// let ranges = parse("de-CH-1996, fr;q=0.4").expect("valid header");
/// assert_eq!(lookup(&ranges, ["en", "fr", "de"]), Some("de"));
/// ```
pub fn lookup<'t, I>(ranges: &[LanguageRange], tags: I) -> Option<&'t str>
where
    I: IntoIterator<Item = &'t str>,
    I::IntoIter: Clone,
{
    let tags = tags.into_iter();
    let vetoes: Vec<&str> = ranges
        .iter()
        .filter(|r| r.weight == 0.0 && r.range != WILDCARD)
        .map(LanguageRange::range)
        .collect();

    ranges
        .iter()
        .filter(|r| r.weight > 0.0 && r.range != WILDCARD)
        .find_map(|r| {
            truncations(r.range()).find_map(|candidate| {
                tags.clone().find(|tag| {
                    let tag = tag.to_ascii_lowercase();
                    range_matches(candidate, &tag) && !is_vetoed(&vetoes, &tag)
                })
            })
        })
}

fn is_vetoed(vetoes: &[&str], tag: &str) -> bool {
    vetoes
        .iter()
        .any(|veto| truncations(veto).any(|candidate| range_matches(candidate, tag)))
}

/// `range`, then each shorter prefix obtained by dropping the last subtag
/// together with a dangling single-character extension singleton.
fn truncations(range: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(range), |current| {
        let (prefix, _) = current.rsplit_once('-')?;
        match prefix.rsplit_once('-') {
            Some((shorter, singleton)) if singleton.len() == 1 => Some(shorter),
            _ => Some(prefix),
        }
    })
}

fn range_matches(range: &str, tag: &str) -> bool {
    let mut range_subtags = range.split('-');
    let mut tag_subtags = tag.split('-');
    loop {
        match (range_subtags.next(), tag_subtags.next()) {
            (None, None) => return true,
            (Some(pattern), Some(subtag)) if pattern == WILDCARD || pattern == subtag => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("de", &[("de", 1.0)])]
    #[case::weights("en;q=0.5, de", &[("de", 1.0), ("en", 0.5)])]
    #[case::stable_ties("fr, de, it;q=1.0", &[("fr", 1.0), ("de", 1.0), ("it", 1.0)])]
    #[case::spaces(" de-CH ; q=0.9 ,, en ;q=0.25", &[("de-ch", 0.9), ("en", 0.25)])]
    #[case::wildcard("*;q=0.1", &[("*", 0.1)])]
    #[case::zero("en;q=0", &[("en", 0.0)])]
    #[case::four_digits("fr;q=0.8764, de;q=0.8765", &[("de", 0.8765), ("fr", 0.8764)])]
    #[case::leading_point("en;q=.5, it", &[("it", 1.0), ("en", 0.5)])]
    #[case::trailing_point("en;q=1.", &[("en", 1.0)])]
    fn parses_weighted_ranges(#[case] header: &str, #[case] expected: &[(&str, f64)]) {
        let ranges = parse(header).expect("valid header");
        let actual: Vec<_> = ranges.iter().map(|r| (r.range(), r.weight())).collect();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::bad_chars("en_US")]
    #[case::long_subtag("abcdefghi-us")]
    #[case::digit_primary("1en")]
    #[case::empty_subtag("en--us")]
    #[case::weight_too_big("en;q=1.5")]
    #[case::weight_negative("en;q=-0.5")]
    #[case::weight_nan("en;q=NaN")]
    #[case::weight_empty("en;q=")]
    #[case::weight_garbage("en;q=abc")]
    #[case::unknown_param("en;level=1")]
    #[case::two_params("en;q=0.5;q=0.4")]
    fn rejects_malformed_headers(#[case] header: &str) {
        assert!(parse(header).is_err());
    }

    #[rstest]
    #[case::exact("de", Some("de"))]
    #[case::truncated_region("de-AT", Some("de"))]
    #[case::truncated_extension("de-CH-x-phonebk", Some("de"))]
    #[case::prefers_weight("fr;q=0.2, it;q=0.9", Some("it"))]
    #[case::falls_through("ja, fr;q=0.5", Some("fr"))]
    #[case::wildcard_ignored("*", None)]
    #[case::zero_weight_never_selects("de;q=0", None)]
    #[case::zero_weight_vetoes("de-CH, de;q=0, fr;q=0.1", Some("fr"))]
    #[case::no_match("ja, zh", None)]
    fn looks_up_supported_tags(#[case] header: &str, #[case] expected: Option<&str>) {
        let ranges = parse(header).expect("valid header");
        assert_eq!(lookup(&ranges, ["en", "de", "fr", "it"]), expected);
    }

    #[rstest]
    fn configured_order_breaks_ties_within_a_range() {
        let ranges = parse("*-ch").expect("valid header");
        assert_eq!(lookup(&ranges, ["fr-CH", "de-CH"]), Some("fr-CH"));
        assert_eq!(lookup(&ranges, ["de-CH", "fr-CH"]), Some("de-CH"));
    }

    #[rstest]
    fn truncation_drops_singletons() {
        let chain: Vec<_> = truncations("de-ch-x-phonebk").collect();
        assert_eq!(chain, ["de-ch-x-phonebk", "de-ch", "de"]);
    }
}
