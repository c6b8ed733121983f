//! Tests for interpreting raw query parameters into search requests.

use super::*;
use crate::domain::{ErrorCode, TagFilterKind};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn factory() -> SearchRequestFactory {
    SearchRequestFactory::new("en".parse().expect("valid languages"))
}

#[fixture]
fn english() -> LanguageCode {
    LanguageCode::new("en").expect("valid tag")
}

fn create(
    factory: &SearchRequestFactory,
    language: &LanguageCode,
    query: &str,
) -> Result<SearchRequest, Error> {
    factory.create(&QueryParams::parse(query), language)
}

fn field_of(err: &Error) -> Option<&str> {
    err.details()
        .and_then(|details| details.get("field"))
        .and_then(|field| field.as_str())
}

#[rstest]
fn location_bias_and_limit(factory: SearchRequestFactory, english: LanguageCode) {
    let request = create(&factory, &english, "q=berlin&lon=-87&lat=41&limit=5")
        .expect("valid request");

    assert_eq!(request.query(), "berlin");
    assert_eq!(request.location_bias(), Some(Point::new(-87.0, 41.0)));
    assert_eq!(request.limit(), 5);
}

#[rstest]
fn defaults_apply_when_only_query_is_given(factory: SearchRequestFactory, english: LanguageCode) {
    let request = create(&factory, &english, "q=berlin").expect("valid request");

    assert_eq!(request.limit(), DEFAULT_LIMIT);
    assert_eq!(request.location_bias(), None);
    assert_eq!(request.scale_for_bias(), DEFAULT_LOCATION_BIAS_SCALE);
    assert_eq!(request.bbox(), None);
    assert!(!request.debug());
    assert!(request.osm_tag_filters().is_empty());
    assert_eq!(request.language(), &english);
}

#[rstest]
#[case::empty("q=berlin&limit=")]
#[case::blank("q=berlin&limit=%20")]
fn blank_limit_uses_default(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] query: &str,
) {
    let request = create(&factory, &english, query).expect("valid request");
    assert_eq!(request.limit(), 15);
}

#[rstest]
#[case::above_max("q=berlin&limit=500", 50)]
#[case::overflowing("q=berlin&limit=99999999999", 50)]
#[case::wider_than_u64("q=berlin&limit=99999999999999999999", 50)]
#[case::leading_zeros("q=berlin&limit=0007", 7)]
#[case::at_max("q=berlin&limit=50", 50)]
fn limit_is_clamped_to_maximum(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] query: &str,
    #[case] expected: u32,
) {
    let request = create(&factory, &english, query).expect("valid request");
    assert_eq!(request.limit(), expected);
}

#[rstest]
fn configured_maximum_bounds_default_limit(english: LanguageCode) {
    let max = NonZeroU32::new(10).expect("non-zero");
    let factory =
        SearchRequestFactory::new("en".parse().expect("valid languages")).with_max_limit(max);

    let request = create(&factory, &english, "q=berlin").expect("valid request");
    assert_eq!(request.limit(), 10);
}

#[rstest]
#[case::infinity("Infinity", 1.0)]
#[case::plus_infinity("%2BInfinity", 1.0)]
#[case::above_one("3.5", 1.0)]
#[case::exponent("5e-1", 0.5)]
#[case::empty("", 0.2)]
#[case::plain("0.7", 0.7)]
fn location_bias_scale_is_normalised(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] raw: &str,
    #[case] expected: f64,
) {
    let request = create(&factory, &english, &format!("q=berlin&location_bias_scale={raw}"))
        .expect("valid request");
    assert_eq!(request.scale_for_bias(), expected);
}

#[rstest]
#[case::one("1", true)]
#[case::word("TRUE", true)]
#[case::zero("0", false)]
#[case::off("off", false)]
#[case::blank("", false)]
fn debug_flag_is_read(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] raw: &str,
    #[case] expected: bool,
) {
    let request = create(&factory, &english, &format!("q=berlin&debug={raw}"))
        .expect("valid request");
    assert_eq!(request.debug(), expected);
}

#[rstest]
fn bbox_round_trips(factory: SearchRequestFactory, english: LanguageCode) {
    let request = create(&factory, &english, "q=hanover&bbox=9.6,52.3,9.8,52.4")
        .expect("valid request");
    assert_eq!(
        request.bbox(),
        Some(Envelope::new(9.6, 52.3, 9.8, 52.4).expect("valid envelope"))
    );
}

#[rstest]
#[case::unknown("q=nowhere&extra=data", "'extra'", "extra")]
#[case::limit_garbage("q=berlin&limit=x", "'limit'", "limit")]
#[case::limit_zero("q=berlin&limit=0", "'limit'", "limit")]
#[case::limit_negative("q=berlin&limit=-3", "'limit'", "limit")]
#[case::bad_lat("q=berlin&lon=3&lat=bad", "'lat'", "lat")]
#[case::bad_lon("q=berlin&lon=bad&lat=45", "'lon'", "lon")]
#[case::lat_out_of_range("q=berlin&lon=3&lat=91", "'lat'", "lat")]
#[case::lon_infinite("q=berlin&lon=Infinity&lat=45", "'lon'", "lon")]
#[case::lon_without_lat("q=berlin&lon=3", "'lat'", "lat")]
#[case::lat_without_lon("q=berlin&lat=3", "'lon'", "lon")]
#[case::missing_query("lat=45&lon=45", "'q'", "q")]
#[case::blank_query("q=%20%20", "'q'", "q")]
#[case::debug_garbage("q=berlin&debug=maybe", "'debug'", "debug")]
#[case::bbox_arity("q=hanover&bbox=9.6,52.3,9.8", "'bbox'", "bbox")]
#[case::bbox_nan("q=hanover&bbox=9.6,52.3,NaN,9.8", "'bbox'", "bbox")]
#[case::bbox_infinite("q=hanover&bbox=9.6,52.3,-Infinity,9.8", "'bbox'", "bbox")]
#[case::bbox_garbage("q=hanover&bbox=9.6,52.3,r34,9.8", "'bbox'", "bbox")]
#[case::bbox_min_lat("q=hanover&bbox=9.6,-92,9.8,14", "'bbox'", "bbox")]
#[case::bbox_max_lat("q=hanover&bbox=9.6,14,9.8,91", "'bbox'", "bbox")]
#[case::bbox_min_lon("q=hanover&bbox=-181,%209,%204,%2012", "'bbox'", "bbox")]
#[case::bbox_max_lon("q=hanover&bbox=12,%209,%20181,%2012", "'bbox'", "bbox")]
#[case::bbox_inverted("q=hanover&bbox=9.8,52.3,9.6,52.4", "'bbox'", "bbox")]
#[case::unsupported_lang("q=berlin&lang=de", "language de is not supported", "lang")]
fn rejects_bad_parameters(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] query: &str,
    #[case] fragment: &str,
    #[case] field: &str,
) {
    let err = create(&factory, &english, query).expect_err("request must be rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(
        err.message().contains(fragment),
        "message {:?} does not contain {fragment:?}",
        err.message()
    );
    assert_eq!(field_of(&err), Some(field));
}

#[rstest]
#[case::garbage("-e")]
#[case::nan("NaN")]
#[case::zero("0")]
#[case::lowercase_inf("inf")]
fn rejects_bad_location_bias_scale(
    factory: SearchRequestFactory,
    english: LanguageCode,
    #[case] raw: &str,
) {
    let query = format!("q=berlin&location_bias_scale={raw}");
    let err = create(&factory, &english, &query).expect_err("scale must be rejected");

    assert!(err.message().contains("'location_bias_scale'"), "{}", err.message());
    assert_eq!(field_of(&err), Some("location_bias_scale"));
}

#[rstest]
fn tag_filters_keep_request_order(factory: SearchRequestFactory, english: LanguageCode) {
    let request = create(&factory, &english, "q=new+york&osm_tag=foo&osm_tag=%3A%21bar")
        .expect("valid request");

    let filters = request.osm_tag_filters();
    assert_eq!(filters.len(), 2);
    assert_eq!(
        (filters[0].kind(), filters[0].key(), filters[0].value()),
        (TagFilterKind::Include, Some("foo"), None)
    );
    assert_eq!(
        (filters[1].kind(), filters[1].key(), filters[1].value()),
        (TagFilterKind::Exclude, None, Some("bar"))
    );
}

#[rstest]
fn one_malformed_tag_filter_rejects_the_request(
    factory: SearchRequestFactory,
    english: LanguageCode,
) {
    let err = create(&factory, &english, "q=new+york&osm_tag=good&osm_tag=bad:bad:bad")
        .expect_err("malformed filter");

    assert!(err.message().contains("'osm_tag=bad:bad:bad'"));
    assert_eq!(
        err.details(),
        Some(&json!({ "field": "osm_tag", "value": "bad:bad:bad", "code": "invalid_tag_filter" }))
    );
}

#[rstest]
fn explicit_language_overrides_default(english: LanguageCode) {
    let factory = SearchRequestFactory::new("en,de".parse().expect("valid languages"));

    let request = create(&factory, &english, "q=berlin&lang=de").expect("valid request");
    assert_eq!(request.language().as_str(), "de");

    let request = create(&factory, &english, "q=berlin&lang=").expect("valid request");
    assert_eq!(request.language(), &english);
}

#[rstest]
fn first_occurrence_of_singular_parameter_wins(
    factory: SearchRequestFactory,
    english: LanguageCode,
) {
    let request = create(&factory, &english, "q=berlin&q=paris&limit=3&limit=7")
        .expect("valid request");
    assert_eq!((request.query(), request.limit()), ("berlin", 3));
}

#[rstest]
fn parsing_is_idempotent(factory: SearchRequestFactory, english: LanguageCode) {
    let query = "q=berlin&lon=13.4&lat=52.5&bbox=9.6,52.3,9.8,52.4&osm_tag=place:city";
    assert_eq!(
        create(&factory, &english, query).expect("valid request"),
        create(&factory, &english, query).expect("valid request")
    );
    assert_eq!(
        create(&factory, &english, "q=berlin&limit=x").expect_err("invalid"),
        create(&factory, &english, "q=berlin&limit=x").expect_err("invalid")
    );
}

#[rstest]
fn serialises_in_camel_case(factory: SearchRequestFactory, english: LanguageCode) {
    let request = create(&factory, &english, "q=berlin&lon=13.5&lat=52.5&osm_tag=!amenity")
        .expect("valid request");

    let value = serde_json::to_value(&request).expect("serialise request");
    assert_eq!(
        value,
        json!({
            "query": "berlin",
            "limit": 15,
            "locationBias": { "lon": 13.5, "lat": 52.5 },
            "scaleForBias": 0.2,
            "debug": false,
            "osmTagFilters": [{ "kind": "exclude", "key": "amenity" }],
            "language": "en"
        })
    );
}

#[rstest]
#[case::plain("12.5", Some(12.5))]
#[case::signed_exponent("-1.5E2", Some(-150.0))]
#[case::infinity("Infinity", Some(f64::INFINITY))]
#[case::negative_infinity("-Infinity", Some(f64::NEG_INFINITY))]
#[case::lowercase_inf("inf", None)]
#[case::lowercase_nan("nan", None)]
#[case::dangling_exponent("-e", None)]
#[case::garbage("r34", None)]
fn decimal_tokens(#[case] raw: &str, #[case] expected: Option<f64>) {
    assert_eq!(parse_decimal(raw), expected);
}

#[rstest]
fn query_parameter_names_round_trip() {
    for parameter in QueryParameter::ALL {
        assert_eq!(QueryParameter::from_name(parameter.name()), Some(parameter));
    }
    assert_eq!(QueryParameter::from_name("extra"), None);
}
