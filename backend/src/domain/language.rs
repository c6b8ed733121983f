//! Response language resolution.
//!
//! Precedence: an explicit `lang` parameter (which must be supported), then
//! the best supported match from `Accept-Language`, then [`DEFAULT_LANGUAGE`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::accept_language;
use super::validation::unsupported_language_error;
use super::{Error, QueryParams};

/// Fallback when neither the parameter nor the header selects a language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Name of the explicit language query parameter.
pub const LANG_PARAMETER: &str = "lang";

/// Validation errors for [`LanguageCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageCodeError {
    /// The code is not a well-formed language tag.
    #[error("'{code}' is not a well-formed language tag")]
    Malformed {
        /// Offending code.
        code: String,
    },
}

/// A well-formed language tag such as `en` or `de-CH`.
///
/// # Examples
/// ```
/// use geosearch::domain::LanguageCode;
///
/// let code = LanguageCode::new("de").expect("valid tag");
/// assert_eq!(code.as_str(), "de");
/// assert!(LanguageCode::new("de_CH").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validate and wrap a language tag.
    pub fn new(code: impl Into<String>) -> Result<Self, LanguageCodeError> {
        let code = code.into();
        let mut subtags = code.split('-');
        let primary_ok = subtags.next().is_some_and(|primary| {
            is_subtag(primary) && primary.chars().all(|c| c.is_ascii_alphabetic())
        });
        if primary_ok && subtags.all(is_subtag) {
            Ok(Self(code))
        } else {
            Err(LanguageCodeError::Malformed { code })
        }
    }

    /// Borrow the tag.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_subtag(subtag: &str) -> bool {
    (1..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors for [`SupportedLanguages`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportedLanguagesError {
    /// No languages were configured.
    #[error("at least one supported language must be configured")]
    Empty,
    /// A configured code was not a valid tag.
    #[error(transparent)]
    InvalidCode(#[from] LanguageCodeError),
    /// A code was listed twice.
    #[error("language '{code}' is configured more than once")]
    Duplicate {
        /// Repeated code.
        code: String,
    },
}

/// Ordered, non-empty set of languages the service can answer in.
///
/// Built once at startup and shared read-only; cloning is cheap.
///
/// # Examples
/// ```
/// use geosearch::domain::SupportedLanguages;
///
/// let languages: SupportedLanguages = "en, de,fr".parse().expect("valid list");
/// assert!(languages.contains("de"));
/// assert_eq!(languages.to_string(), "en, de, fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLanguages(Arc<[LanguageCode]>);

impl SupportedLanguages {
    /// Validate a configured list, preserving its order.
    pub fn new<I, S>(codes: I) -> Result<Self, SupportedLanguagesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages: Vec<LanguageCode> = Vec::new();
        for code in codes {
            let code = LanguageCode::new(code)?;
            if languages.contains(&code) {
                return Err(SupportedLanguagesError::Duplicate {
                    code: code.as_str().to_owned(),
                });
            }
            languages.push(code);
        }
        if languages.is_empty() {
            return Err(SupportedLanguagesError::Empty);
        }
        Ok(Self(languages.into()))
    }

    /// Whether `code` is supported. Comparison is exact.
    pub fn contains(&self, code: &str) -> bool {
        self.iter().any(|language| language.as_str() == code)
    }

    /// Supported languages in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> + Clone {
        self.0.iter()
    }

    /// Accept an explicitly requested language or reject it, listing the
    /// supported set.
    pub fn require(&self, code: &str) -> Result<LanguageCode, Error> {
        self.iter()
            .find(|language| language.as_str() == code)
            .cloned()
            .ok_or_else(|| unsupported_language_error(code, &self.to_string()))
    }
}

impl fmt::Display for SupportedLanguages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, language) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(language.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for SupportedLanguages {
    type Err = SupportedLanguagesError;

    /// Parse a comma-separated list, ignoring blank entries.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').map(str::trim).filter(|code| !code.is_empty()))
    }
}

/// Picks the response language for a request.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    supported: SupportedLanguages,
}

impl LanguageResolver {
    /// Create a resolver over the process-wide supported set.
    pub fn new(supported: SupportedLanguages) -> Self {
        Self { supported }
    }

    /// The supported set this resolver validates against.
    pub fn supported(&self) -> &SupportedLanguages {
        &self.supported
    }

    /// Resolve the language for one request.
    ///
    /// Fails only when `lang` is supplied and unsupported; header problems
    /// fall back silently.
    ///
    /// # Examples
    /// ```
    /// use geosearch::domain::{LanguageResolver, QueryParams};
    ///
    /// let resolver = LanguageResolver::new("en,de".parse().expect("valid list"));
    /// let params = QueryParams::parse("q=berlin");
    /// let language = resolver.resolve(&params, Some("de-AT, en;q=0.5")).expect("resolves");
    /// assert_eq!(language.as_str(), "de");
    /// ```
    pub fn resolve(
        &self,
        params: &QueryParams,
        accept_language: Option<&str>,
    ) -> Result<LanguageCode, Error> {
        if let Some(requested) = params.first_non_blank(LANG_PARAMETER) {
            return self.supported.require(requested);
        }

        Ok(accept_language
            .filter(|header| !header.trim().is_empty())
            .and_then(|header| self.negotiate(header))
            .unwrap_or_else(default_language))
    }

    /// Best supported language for an `Accept-Language` value, if any.
    pub fn negotiate(&self, header: &str) -> Option<LanguageCode> {
        let ranges = match accept_language::parse(header) {
            Ok(ranges) => ranges,
            Err(error) => {
                debug!(%error, header, "ignoring malformed Accept-Language header");
                return None;
            }
        };

        let tags = self.supported.iter().map(LanguageCode::as_str);
        let selected = accept_language::lookup(&ranges, tags)
            .and_then(|tag| self.supported.iter().find(|language| language.as_str() == tag))
            .cloned();
        if selected.is_none() {
            debug!(header, "Accept-Language header matched no supported language");
        }
        selected
    }
}

fn default_language() -> LanguageCode {
    LanguageCode(DEFAULT_LANGUAGE.to_owned())
}
