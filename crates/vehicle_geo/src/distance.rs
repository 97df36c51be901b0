//! Great-circle distance on a spherical Earth.

use crate::Coordinate;

/// Mean Earth radius in metres used for every spherical computation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in metres between two coordinates, using the
/// spherical law of cosines.
#[must_use]
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    central_angle(a.lat_rad(), a.lng_rad(), b.lat_rad(), b.lng_rad()) * EARTH_RADIUS_M
}

/// Central angle in radians between two points given in radians.
///
/// The cosine is clamped to `[-1, 1]`: rounding can push it just past 1
/// for coincident points, and `acos` would return NaN.
fn central_angle(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lng2 - lng1).cos();
    cos_angle.clamp(-1.0, 1.0).acos()
}
