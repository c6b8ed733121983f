//! Error builders for rejected query parameters.
//!
//! Every rejection names the offending parameter quoted in its message and
//! repeats it in the structured details so clients can self-diagnose.

use serde_json::json;

use super::{EnvelopeError, Error};

/// Validation error codes attached to request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    UnknownParameter,
    MissingParameter,
    InvalidNumber,
    OutOfRange,
    InvalidFormat,
    UnsupportedLanguage,
    InvalidTagFilter,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnknownParameter => "unknown_parameter",
            Self::MissingParameter => "missing_parameter",
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange => "out_of_range",
            Self::InvalidFormat => "invalid_format",
            Self::UnsupportedLanguage => "unsupported_language",
            Self::InvalidTagFilter => "invalid_tag_filter",
        }
    }
}

/// Builder for a parameter rejection.
pub(crate) struct ParameterError {
    field: String,
    message: String,
}

impl ParameterError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn with_code(self, code: ValidationCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    pub(crate) fn with_value(self, code: ValidationCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn unknown_parameter_error(name: &str, allowed: &str) -> Error {
    ParameterError::new(
        name,
        format!("unknown query parameter '{name}', allowed parameters are: {allowed}"),
    )
    .with_code(ValidationCode::UnknownParameter)
}

pub(crate) fn missing_parameter_error(name: &str) -> Error {
    ParameterError::new(name, format!("missing search term '{name}'"))
        .with_code(ValidationCode::MissingParameter)
}

pub(crate) fn invalid_number_error(name: &str, value: &str) -> Error {
    ParameterError::new(
        name,
        format!("invalid search term '{name}', expected a number"),
    )
    .with_value(ValidationCode::InvalidNumber, value)
}

pub(crate) fn invalid_integer_error(name: &str, value: &str) -> Error {
    ParameterError::new(
        name,
        format!("invalid search term '{name}', expected a positive integer"),
    )
    .with_value(ValidationCode::InvalidNumber, value)
}

pub(crate) fn out_of_range_error(name: &str, value: &str, range: &str) -> Error {
    ParameterError::new(
        name,
        format!("invalid search term '{name}', expected a value in {range}"),
    )
    .with_value(ValidationCode::OutOfRange, value)
}

pub(crate) fn invalid_format_error(name: &str, value: &str, expected: &str) -> Error {
    ParameterError::new(
        name,
        format!("invalid search term '{name}', expected {expected}"),
    )
    .with_value(ValidationCode::InvalidFormat, value)
}

pub(crate) fn invalid_bbox_error(value: &str, reason: EnvelopeError) -> Error {
    let code = match reason {
        EnvelopeError::NonFinite => ValidationCode::InvalidNumber,
        EnvelopeError::LatitudeOutOfRange | EnvelopeError::LongitudeOutOfRange => {
            ValidationCode::OutOfRange
        }
        EnvelopeError::Inverted => ValidationCode::InvalidFormat,
    };
    ParameterError::new("bbox", format!("invalid search term 'bbox': {reason}"))
        .with_value(code, value)
}

pub(crate) fn unsupported_language_error(value: &str, supported: &str) -> Error {
    ParameterError::new(
        "lang",
        format!("language {value} is not supported, supported languages are: {supported}"),
    )
    .with_value(ValidationCode::UnsupportedLanguage, value)
}

pub(crate) fn invalid_tag_filter_error(value: &str, reason: &str) -> Error {
    ParameterError::new(
        "osm_tag",
        format!("invalid parameter 'osm_tag={value}': {reason}"),
    )
    .with_value(ValidationCode::InvalidTagFilter, value)
}
