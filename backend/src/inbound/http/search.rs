//! Search API handler.
//!
//! ```text
//! GET /api?q=berlin&lon=13.4&lat=52.5&osm_tag=place:city
//! ```

use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::{HttpRequest, get, web};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Error, QueryParams, SearchRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SearchResponseSchema};
use crate::inbound::http::state::HttpState;

/// Body of a successful search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The request as interpreted by the service.
    pub request: SearchRequest,
    /// Engine hits, best match first.
    pub hits: Vec<Value>,
}

/// Interpret the query string and pass the validated request to the engine.
///
/// Any unknown parameter or malformed value rejects the whole request with
/// 400; engine failures surface as a redacted 500.
#[utoipa::path(
    get,
    path = "/api",
    params(
        ("q" = String, Query, description = "Free-text search string"),
        ("lon" = Option<f64>, Query, description = "Longitude of the location bias; requires lat"),
        ("lat" = Option<f64>, Query, description = "Latitude of the location bias; requires lon"),
        ("limit" = Option<u32>, Query, description = "Maximum number of results, default 15"),
        (
            "location_bias_scale" = Option<f64>,
            Query,
            description = "Bias strength in (0, 1], default 0.2"
        ),
        ("debug" = Option<bool>, Query, description = "Request verbose diagnostics"),
        (
            "lang" = Option<String>,
            Query,
            description = "Response language; overrides Accept-Language"
        ),
        ("bbox" = Option<String>, Query, description = "minLon,minLat,maxLon,maxLat"),
        (
            "osm_tag" = Option<Vec<String>>,
            Query,
            description = "Repeatable tag filter such as amenity:!cafe"
        ),
        (
            "Accept-Language" = Option<String>,
            Header,
            description = "Preferred response languages"
        )
    ),
    responses(
        (
            status = 200,
            description = "Interpreted request and engine hits",
            body = SearchResponseSchema
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["search"],
    operation_id = "search"
)]
#[get("/api")]
pub async fn search(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<SearchResponse>> {
    let params = QueryParams::parse(req.query_string());
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let request = state
        .resolver
        .resolve(&params, accept_language)
        .and_then(|language| state.factory.create(&params, &language))?;

    let hits = state
        .engine
        .search(&request)
        .await
        .map_err(|err| Error::internal(err.to_string()))?;

    Ok(web::Json(SearchResponse { request, hits }))
}
