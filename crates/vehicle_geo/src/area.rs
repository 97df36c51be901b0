//! Circular search areas.
//!
//! A [`SearchArea`] answers "is this coordinate within `radius` metres of the
//! centre?" in two steps: a latitude/longitude bounding box that rejects most
//! candidates with a few comparisons, then the exact great-circle distance
//! for whatever survives the box.
//!
//! The bounding box follows the classic bounding-coordinates construction:
//! the angular radius `r = radius / EARTH_RADIUS_M` bounds latitude directly,
//! and longitude is bounded by `asin(sin(r) / cos(lat))`, which widens as the
//! centre moves toward a pole. When the circle reaches over a pole every
//! longitude is admitted.
//!
//! The box does not wrap around the antimeridian: a circle centred near
//! ±180° only admits candidates on its own side.

use std::f64::consts::FRAC_PI_2;

use crate::Coordinate;
use crate::distance::{EARTH_RADIUS_M, great_circle_distance};

/// A circle on the Earth's surface, with its pre-computed bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    /// Centre of the circle.
    center: Coordinate,
    /// Radius in metres.
    radius_m: f64,
    /// Latitude bounds in radians.
    lat_min: f64,
    lat_max: f64,
    /// Longitude half-width in radians, or `None` when the circle covers a
    /// pole and every longitude is admitted.
    lng_delta: Option<f64>,
}

impl SearchArea {
    /// Build a search area around `center`.
    ///
    /// Returns `None` when `radius_m` is not strictly positive (including
    /// NaN): no point can be closer than such a radius.
    #[must_use]
    pub fn new(center: Coordinate, radius_m: f64) -> Option<Self> {
        if !(radius_m > 0.0) {
            return None;
        }

        let angle = radius_m / EARTH_RADIUS_M;
        let center_lat = center.lat_rad();
        let lat_min = center_lat - angle;
        let lat_max = center_lat + angle;

        let lng_delta = if angle >= FRAC_PI_2 || lat_min < -FRAC_PI_2 || lat_max > FRAC_PI_2 {
            None
        } else {
            let ratio = angle.sin() / center_lat.cos();
            (ratio < 1.0).then(|| ratio.asin())
        };

        Some(Self {
            center,
            radius_m,
            lat_min,
            lat_max,
            lng_delta,
        })
    }

    /// Longitude half-width of the bounding box in radians, or `None` if
    /// longitude is unconstrained.
    #[must_use]
    pub const fn longitude_delta(&self) -> Option<f64> {
        self.lng_delta
    }

    /// Cheap pre-filter: `true` if `point` lies inside the bounding box.
    ///
    /// Never `false` for a point that [`contains`](Self::contains) accepts.
    #[must_use]
    pub fn in_bounding_box(&self, point: &Coordinate) -> bool {
        let lat = point.lat_rad();
        if lat < self.lat_min || lat > self.lat_max {
            return false;
        }
        match self.lng_delta {
            Some(delta) => {
                let center_lng = self.center.lng_rad();
                let lng = point.lng_rad();
                lng >= center_lng - delta && lng <= center_lng + delta
            }
            None => true,
        }
    }

    /// Great-circle distance in metres from the centre to `point`.
    #[must_use]
    pub fn distance_to(&self, point: &Coordinate) -> f64 {
        great_circle_distance(&self.center, point)
    }

    /// `true` if `point` is strictly closer than the radius.
    ///
    /// A point exactly on the circle is outside.
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.in_bounding_box(point) && self.distance_to(point) < self.radius_m
    }
}
