//! Domain primitives for interpreting search requests.
//!
//! Purpose: turn untyped query parameters and request headers into validated,
//! immutable values before anything reaches the search engine. Every type
//! documents its invariants in Rustdoc; constructors reject invalid input
//! instead of normalising it silently.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - LanguageResolver: picks the response language for a request.
//! - SearchRequestFactory: builds a `SearchRequest` from raw parameters.
//! - TagFilter: one parsed `osm_tag` clause.

pub mod accept_language;
pub mod error;
pub mod geometry;
pub mod language;
pub mod ports;
pub mod query_params;
pub mod search_request;
pub mod tag_filter;
pub mod trace_id;
pub(crate) mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geometry::{Envelope, EnvelopeError, Point};
pub use self::language::{
    DEFAULT_LANGUAGE, LanguageCode, LanguageCodeError, LanguageResolver, SupportedLanguages,
    SupportedLanguagesError,
};
pub use self::query_params::QueryParams;
pub use self::search_request::{
    DEFAULT_LIMIT, DEFAULT_LOCATION_BIAS_SCALE, DEFAULT_MAX_LIMIT, QueryParameter, SearchRequest,
    SearchRequestFactory,
};
pub use self::tag_filter::{TagFilter, TagFilterError, TagFilterKind};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
