//! Interpretation of raw search parameters into a validated [`SearchRequest`].
//!
//! Parsing is a strict whitelist: any parameter name outside
//! [`QueryParameter`] rejects the whole request, as does the first malformed
//! value. No partially interpreted request ever reaches the engine.

use std::num::NonZeroU32;

use serde::Serialize;

use super::geometry::{valid_latitude, valid_longitude};
use super::validation::{
    invalid_bbox_error, invalid_format_error, invalid_integer_error, invalid_number_error,
    invalid_tag_filter_error, missing_parameter_error, out_of_range_error,
    unknown_parameter_error,
};
use super::{
    Envelope, Error, LanguageCode, Point, QueryParams, SupportedLanguages, TagFilter,
};

/// Result count used when `limit` is absent or blank.
pub const DEFAULT_LIMIT: u32 = 15;
/// Upper bound applied to `limit` unless configured otherwise.
pub const DEFAULT_MAX_LIMIT: NonZeroU32 = match NonZeroU32::new(50) {
    Some(value) => value,
    None => panic!("default maximum limit must be non-zero"),
};
/// Location bias strength used when `location_bias_scale` is absent or blank.
pub const DEFAULT_LOCATION_BIAS_SCALE: f64 = 0.2;
/// Strongest location bias; positive infinity collapses to this.
pub const MAX_LOCATION_BIAS_SCALE: f64 = 1.0;

/// Query parameters the search endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParameter {
    /// `q`: free-text search string.
    Query,
    /// `lon`: longitude of the location bias.
    Lon,
    /// `lat`: latitude of the location bias.
    Lat,
    /// `limit`: maximum number of results.
    Limit,
    /// `location_bias_scale`: strength of the location bias.
    LocationBiasScale,
    /// `debug`: verbose diagnostics downstream.
    Debug,
    /// `lang`: explicit response language.
    Lang,
    /// `bbox`: bounding box restriction.
    Bbox,
    /// `osm_tag`: repeatable tag filter.
    OsmTag,
}

impl QueryParameter {
    /// Every recognised parameter, in documentation order.
    pub const ALL: [Self; 9] = [
        Self::Query,
        Self::Lon,
        Self::Lat,
        Self::Limit,
        Self::LocationBiasScale,
        Self::Debug,
        Self::Lang,
        Self::Bbox,
        Self::OsmTag,
    ];

    /// Wire name of the parameter.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "q",
            Self::Lon => "lon",
            Self::Lat => "lat",
            Self::Limit => "limit",
            Self::LocationBiasScale => "location_bias_scale",
            Self::Debug => "debug",
            Self::Lang => "lang",
            Self::Bbox => "bbox",
            Self::OsmTag => "osm_tag",
        }
    }

    /// Look up a recognised parameter by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|parameter| parameter.name() == name)
    }

    fn allowed_names() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

/// Validated search request handed to the engine.
///
/// ## Invariants
/// - `query` is non-empty and trimmed;
/// - `limit` is within `1..=max_limit`;
/// - `scale_for_bias` is within `(0, 1]`;
/// - `location_bias` and `bbox` hold only in-range coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    query: String,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_bias: Option<Point>,
    scale_for_bias: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<Envelope>,
    debug: bool,
    osm_tag_filters: Vec<TagFilter>,
    language: LanguageCode,
}

impl SearchRequest {
    /// Free-text search string.
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Maximum number of results.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Point to bias ranking towards.
    pub fn location_bias(&self) -> Option<Point> {
        self.location_bias
    }

    /// Strength of the location bias.
    pub fn scale_for_bias(&self) -> f64 {
        self.scale_for_bias
    }

    /// Bounding box restriction.
    pub fn bbox(&self) -> Option<Envelope> {
        self.bbox
    }

    /// Whether verbose diagnostics were requested.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Tag filters in request order; empty means no filtering.
    pub fn osm_tag_filters(&self) -> &[TagFilter] {
        &self.osm_tag_filters
    }

    /// Language results are localised in.
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }
}

/// Builds [`SearchRequest`] values from raw parameters.
///
/// # Examples
/// ```
/// use geosearch::domain::{LanguageCode, QueryParams, SearchRequestFactory};
///
/// let factory = SearchRequestFactory::new("en,de".parse().expect("valid languages"));
/// let default_language = LanguageCode::new("en").expect("valid tag");
/// let params = QueryParams::parse("q=berlin&lon=13.4&lat=52.5&osm_tag=place:city");
///
/// let request = factory.create(&params, &default_language).expect("valid request");
/// assert_eq!(request.query(), "berlin");
/// assert_eq!(request.limit(), 15);
/// assert_eq!(request.osm_tag_filters().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequestFactory {
    supported: SupportedLanguages,
    max_limit: NonZeroU32,
}

impl SearchRequestFactory {
    /// Create a factory validating `lang` against `supported`.
    pub fn new(supported: SupportedLanguages) -> Self {
        Self {
            supported,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }

    /// Override the upper bound applied to `limit`.
    #[must_use]
    pub fn with_max_limit(mut self, max_limit: NonZeroU32) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Interpret `params`. `default_language` applies when `lang` is absent,
    /// normally the language negotiated for the request.
    ///
    /// # Errors
    /// Returns an [`crate::domain::ErrorCode::InvalidRequest`] error naming
    /// the first offending parameter.
    pub fn create(
        &self,
        params: &QueryParams,
        default_language: &LanguageCode,
    ) -> Result<SearchRequest, Error> {
        reject_unknown_parameters(params)?;

        let query = params
            .first_non_blank(QueryParameter::Query.name())
            .map(str::trim)
            .ok_or_else(|| missing_parameter_error(QueryParameter::Query.name()))?;

        let location_bias = parse_location_bias(params)?;
        let limit = self.parse_limit(params.first_non_blank(QueryParameter::Limit.name()))?;
        let scale_for_bias =
            parse_scale(params.first_non_blank(QueryParameter::LocationBiasScale.name()))?;
        let debug = parse_debug(params.first_non_blank(QueryParameter::Debug.name()))?;
        let bbox = params
            .first_non_blank(QueryParameter::Bbox.name())
            .map(parse_bbox)
            .transpose()?;
        let osm_tag_filters = params
            .all(QueryParameter::OsmTag.name())
            .map(|raw| {
                TagFilter::parse(raw)
                    .map_err(|error| invalid_tag_filter_error(raw, &error.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let language = match params.first_non_blank(QueryParameter::Lang.name()) {
            Some(code) => self.supported.require(code)?,
            None => default_language.clone(),
        };

        Ok(SearchRequest {
            query: query.to_owned(),
            limit,
            location_bias,
            scale_for_bias,
            bbox,
            debug,
            osm_tag_filters,
            language,
        })
    }

    fn parse_limit(&self, raw: Option<&str>) -> Result<u32, Error> {
        let max = self.max_limit.get();
        let Some(raw) = raw else {
            return Ok(DEFAULT_LIMIT.min(max));
        };
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let positive = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits.bytes().any(|b| b != b'0');
        if !positive {
            return Err(invalid_integer_error(QueryParameter::Limit.name(), raw));
        }
        // Too large for u32 means above any configurable maximum.
        Ok(digits.parse::<u32>().map_or(max, |value| value.min(max)))
    }
}

fn reject_unknown_parameters(params: &QueryParams) -> Result<(), Error> {
    match params
        .names()
        .find(|name| QueryParameter::from_name(name).is_none())
    {
        Some(name) => Err(unknown_parameter_error(name, &QueryParameter::allowed_names())),
        None => Ok(()),
    }
}

/// Parse a decimal number the way clients of the search API write them:
/// plain or exponent notation, plus the literal tokens `Infinity`,
/// `+Infinity`, `-Infinity` and `NaN`. Spellings such as `inf` are rejected.
fn parse_decimal(raw: &str) -> Option<f64> {
    let token = raw.trim();
    match token {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ if token
            .chars()
            .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) =>
        {
            None
        }
        _ => token.parse().ok(),
    }
}

fn parse_coordinate(
    parameter: QueryParameter,
    raw: &str,
    in_range: fn(f64) -> bool,
    range: &str,
) -> Result<f64, Error> {
    let name = parameter.name();
    let value = parse_decimal(raw)
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_number_error(name, raw))?;
    if in_range(value) {
        Ok(value)
    } else {
        Err(out_of_range_error(name, raw, range))
    }
}

fn parse_location_bias(params: &QueryParams) -> Result<Option<Point>, Error> {
    let lon = params.first_non_blank(QueryParameter::Lon.name());
    let lat = params.first_non_blank(QueryParameter::Lat.name());
    match (lon, lat) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(missing_parameter_error(QueryParameter::Lat.name())),
        (None, Some(_)) => Err(missing_parameter_error(QueryParameter::Lon.name())),
        (Some(lon), Some(lat)) => {
            let lon = parse_coordinate(QueryParameter::Lon, lon, valid_longitude, "[-180, 180]")?;
            let lat = parse_coordinate(QueryParameter::Lat, lat, valid_latitude, "[-90, 90]")?;
            Ok(Some(Point::new(lon, lat)))
        }
    }
}

fn parse_scale(raw: Option<&str>) -> Result<f64, Error> {
    let name = QueryParameter::LocationBiasScale.name();
    let Some(raw) = raw else {
        return Ok(DEFAULT_LOCATION_BIAS_SCALE);
    };
    let value = parse_decimal(raw)
        .filter(|value| !value.is_nan())
        .ok_or_else(|| invalid_number_error(name, raw))?;
    if value <= 0.0 {
        return Err(out_of_range_error(name, raw, "(0, 1]"));
    }
    Ok(value.min(MAX_LOCATION_BIAS_SCALE))
}

fn parse_debug(raw: Option<&str>) -> Result<bool, Error> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_format_error(
            QueryParameter::Debug.name(),
            raw,
            "a boolean flag such as 1 or 0",
        )),
    }
}

fn parse_bbox(raw: &str) -> Result<Envelope, Error> {
    let name = QueryParameter::Bbox.name();
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [min_lon, min_lat, max_lon, max_lat] = tokens.as_slice() else {
        return Err(invalid_format_error(
            name,
            raw,
            "four comma-separated coordinates minLon,minLat,maxLon,maxLat",
        ));
    };
    Envelope::new(
        bbox_coordinate(min_lon, raw)?,
        bbox_coordinate(min_lat, raw)?,
        bbox_coordinate(max_lon, raw)?,
        bbox_coordinate(max_lat, raw)?,
    )
    .map_err(|reason| invalid_bbox_error(raw, reason))
}

fn bbox_coordinate(token: &str, raw: &str) -> Result<f64, Error> {
    parse_decimal(token)
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_number_error(QueryParameter::Bbox.name(), raw))
}

#[cfg(test)]
mod tests;
