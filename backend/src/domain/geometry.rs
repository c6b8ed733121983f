//! WGS84 point and envelope value types used for location bias and bounding
//! box filtering.

use serde::Serialize;
use thiserror::Error;

/// Longitudes outside this range are rejected.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;
/// Latitudes outside this range are rejected.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

pub(crate) fn valid_longitude(value: f64) -> bool {
    value.is_finite() && LONGITUDE_RANGE.contains(&value)
}

pub(crate) fn valid_latitude(value: f64) -> bool {
    value.is_finite() && LATITUDE_RANGE.contains(&value)
}

/// A coordinate in longitude/latitude order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    lon: f64,
    lat: f64,
}

impl Point {
    /// Construct a point from already validated coordinates.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude (x).
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude (y).
    pub const fn lat(&self) -> f64 {
        self.lat
    }
}

/// Reasons an envelope cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A bound was NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NonFinite,
    /// A latitude fell outside [-90, 90].
    #[error("latitude must be within [-90, 90]")]
    LatitudeOutOfRange,
    /// A longitude fell outside [-180, 180].
    #[error("longitude must be within [-180, 180]")]
    LongitudeOutOfRange,
    /// A minimum was not strictly below its maximum.
    #[error("minimum must be smaller than maximum on both axes")]
    Inverted,
}

/// Axis-aligned bounding box.
///
/// ## Invariants
/// - all bounds finite;
/// - latitudes within [-90, 90], longitudes within [-180, 180];
/// - `min_lon < max_lon` and `min_lat < max_lat`.
///
/// # Examples
/// ```
/// use geosearch::domain::Envelope;
///
/// let hanover = Envelope::new(9.6, 52.3, 9.8, 52.4).expect("valid bbox");
/// assert_eq!(hanover.max_lat(), 52.4);
/// assert!(Envelope::new(9.8, 52.3, 9.6, 52.4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Envelope {
    /// Validate and construct an envelope. Checks run in the order documented
    /// on [`EnvelopeError`].
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, EnvelopeError> {
        if ![min_lon, min_lat, max_lon, max_lat].iter().all(|v| v.is_finite()) {
            return Err(EnvelopeError::NonFinite);
        }
        if !(valid_latitude(min_lat) && valid_latitude(max_lat)) {
            return Err(EnvelopeError::LatitudeOutOfRange);
        }
        if !(valid_longitude(min_lon) && valid_longitude(max_lon)) {
            return Err(EnvelopeError::LongitudeOutOfRange);
        }
        if min_lon >= max_lon || min_lat >= max_lat {
            return Err(EnvelopeError::Inverted);
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Western bound.
    pub const fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Southern bound.
    pub const fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Eastern bound.
    pub const fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Northern bound.
    pub const fn max_lat(&self) -> f64 {
        self.max_lat
    }
}
