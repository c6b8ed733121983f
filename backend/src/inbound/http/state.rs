//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the request interpreters and the engine port, and remain testable
//! without I/O.

use std::num::NonZeroU32;
use std::sync::Arc;

use crate::domain::ports::SearchEngine;
use crate::domain::{LanguageResolver, SearchRequestFactory, SupportedLanguages};

/// Dependency bundle for the search handler.
#[derive(Clone)]
pub struct HttpState {
    pub resolver: LanguageResolver,
    pub factory: SearchRequestFactory,
    pub engine: Arc<dyn SearchEngine>,
}

impl HttpState {
    /// Build the interpreters for one supported-language set.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU32;
    /// use std::sync::Arc;
    ///
    /// use geosearch::domain::ports::FixtureSearchEngine;
    /// use geosearch::inbound::http::state::HttpState;
    ///
    /// let languages = "en,de".parse().expect("valid languages");
    /// let max_limit = NonZeroU32::new(50).expect("non-zero");
    /// let state = HttpState::new(languages, max_limit, Arc::new(FixtureSearchEngine));
    /// assert!(state.resolver.supported().contains("de"));
    /// ```
    pub fn new(
        languages: SupportedLanguages,
        max_limit: NonZeroU32,
        engine: Arc<dyn SearchEngine>,
    ) -> Self {
        Self {
            resolver: LanguageResolver::new(languages.clone()),
            factory: SearchRequestFactory::new(languages).with_max_limit(max_limit),
            engine,
        }
    }
}
