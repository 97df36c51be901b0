//! Geographic coordinates.
//!
//! A [`Coordinate`] can only be constructed through validation, so every
//! coordinate that reaches the bounding-box math is inside the valid range.

use serde::{Deserialize, Serialize};

/// Minimum latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum longitude in degrees.
pub const MIN_LNG: f64 = -180.0;
/// Maximum longitude in degrees.
pub const MAX_LNG: f64 = 180.0;

/// Errors raised when validating a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Latitude outside `[-90, 90]` or not a finite number.
    #[error("invalid latitude: {0} (expected -90..=90)")]
    InvalidLatitude(f64),

    /// Longitude outside `[-180, 180]` or not a finite number.
    #[error("invalid longitude: {0} (expected -180..=180)")]
    InvalidLongitude(f64),
}

/// A point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form of a [`Coordinate`].
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if either value is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        // NaN fails `contains`, so non-finite values are rejected here too.
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(MIN_LNG..=MAX_LNG).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in radians.
    #[must_use]
    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians.
    #[must_use]
    pub fn lng_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(52.52, 13.405).unwrap();
        assert_eq!(c.latitude(), 52.52);
        assert_eq!(c.longitude(), 13.405);
    }

    #[test]
    fn test_range_limits_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(GeoError::InvalidLatitude(90.5))
        );
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(GeoError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_invalid_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -181.0),
            Err(GeoError::InvalidLongitude(-181.0))
        );
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY),
            Err(GeoError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_radians() {
        let c = Coordinate::new(90.0, 180.0).unwrap();
        assert!((c.lat_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((c.lng_rad() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":1.0,"longitude":2.0}"#).unwrap();
        assert_eq!(ok, Coordinate::new(1.0, 2.0).unwrap());

        let bad: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude":100.0,"longitude":2.0}"#);
        assert!(bad.is_err());
    }
}
