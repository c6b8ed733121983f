//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the search endpoint, the health checks and the schema
//! wrappers ([`ErrorSchema`], [`ErrorCodeSchema`], [`SearchResponseSchema`])
//! that document domain types without coupling them to utoipa.
//!
//! The generated document backs Swagger UI in debug builds and is exported
//! via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, SearchRequestSchema, SearchResponseSchema, TagFilterSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the search API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geosearch API",
        description = "Free-text geocoding search with strict parameter validation \
                       and language negotiation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::search::search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SearchResponseSchema,
        SearchRequestSchema,
        TagFilterSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "search", description = "Geocoding search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const REQUEST_SCHEMA_NAME: &str = "crate.domain.SearchRequest";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn search_request_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let request_schema = schemas.get(REQUEST_SCHEMA_NAME).expect("SearchRequest schema");

        assert_object_schema_has_field(request_schema, "query");
        assert_object_schema_has_field(request_schema, "osmTagFilters");
    }

    #[test]
    fn search_path_documents_every_parameter() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api").expect("search path");
        let operation = item.get.as_ref().expect("GET operation");
        let names: Vec<_> = operation
            .parameters
            .iter()
            .flatten()
            .map(|parameter| parameter.name.as_str())
            .collect();
        for name in crate::domain::QueryParameter::ALL.map(|parameter| parameter.name()) {
            assert!(names.contains(&name), "missing parameter {name}");
        }
    }
}
