//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror the serialised shape of their domain counterparts
//! and exist only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A query parameter is unknown, missing or malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The search engine failed; details are withheld from clients.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message naming the offending parameter.
    #[schema(example = "missing search term 'q'")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending `field`, validation `code` and raw `value`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::TagFilter`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TagFilter)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TagFilterSchema {
    /// `include`, `exclude` or `exclude_value`.
    #[schema(example = "include")]
    kind: String,
    /// Constrained key; absent for value-only filters.
    #[schema(example = "amenity")]
    key: Option<String>,
    /// Constrained value; absent for key-presence filters.
    #[schema(example = "cafe")]
    value: Option<String>,
}

/// OpenAPI schema for [`crate::domain::SearchRequest`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SearchRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchRequestSchema {
    #[schema(example = "berlin")]
    query: String,
    #[schema(example = 15)]
    limit: u32,
    /// `{ "lon": .., "lat": .. }` when both coordinates were supplied.
    location_bias: Option<serde_json::Value>,
    #[schema(example = 0.2)]
    scale_for_bias: f64,
    /// `{ "minLon": .., "minLat": .., "maxLon": .., "maxLat": .. }`.
    bbox: Option<serde_json::Value>,
    debug: bool,
    osm_tag_filters: Vec<TagFilterSchema>,
    #[schema(example = "en")]
    language: String,
}

/// Body of a successful search.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchResponseSchema {
    /// The request as interpreted by the service.
    request: SearchRequestSchema,
    /// Engine hits, best match first.
    hits: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_domain_codes() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert!(schema_json.contains("invalid_request"), "missing invalid_request");
        assert!(schema_json.contains("internal_error"), "missing internal_error");
    }

    #[test]
    fn error_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "schema should contain traceId");
    }

    #[test]
    fn search_request_schema_mirrors_wire_names() {
        let schema_json = schema_to_json::<SearchRequestSchema>();
        for field in ["scaleForBias", "locationBias", "osmTagFilters"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
