//! Request interpretation for a geocoding search API.
//!
//! [`domain`] turns raw query parameters and the `Accept-Language` header
//! into a validated [`domain::SearchRequest`]; [`inbound`] exposes it over
//! HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
