//! Registry error types.

use vehicle_geo::GeoError;

use crate::VehicleId;

/// Why a proximity query was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRejection {
    /// No vehicle with this identifier is registered.
    UnknownVehicle,
    /// The vehicle exists but has never reported a position.
    NoPosition,
}

impl std::fmt::Display for QueryRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVehicle => f.write_str("unknown vehicle"),
            Self::NoPosition => f.write_str("vehicle has no recorded position"),
        }
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// The reference vehicle of a proximity query is unknown or unpositioned.
    #[error("invalid query for vehicle {id}: {reason}")]
    InvalidQuery { id: VehicleId, reason: QueryRejection },

    /// A reported coordinate is outside the valid latitude/longitude range.
    #[error("malformed coordinate: {0}")]
    MalformedCoordinate(#[from] GeoError),

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}
