//! # vehicle_geo
//!
//! Spherical-Earth geometry used by the vehicle registry.
//!
//! This crate provides:
//!
//! - [`Coordinate`]: a validated latitude/longitude pair in degrees.
//! - [`SearchArea`]: a circular search area with a cheap bounding-box
//!   pre-filter and an exact great-circle refinement.
//! - [`great_circle_distance`]: spherical law of cosines distance.
//! - [`GeoError`]: coordinate validation errors.

pub mod area;
pub mod coordinate;
pub mod distance;

pub use area::SearchArea;
pub use coordinate::{Coordinate, GeoError, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
pub use distance::{EARTH_RADIUS_M, great_circle_distance};
