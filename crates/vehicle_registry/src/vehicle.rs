//! Vehicle identity and state.
//!
//! A [`VehicleId`] is a random 128-bit UUID generated by the registry. A
//! [`Vehicle`] carries its registration time and, once it has reported, a
//! [`PositionFix`] pairing the last location with the time it was reported.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vehicle_geo::Coordinate;

/// A unique vehicle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub Uuid);

impl VehicleId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for VehicleId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for VehicleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A reported location together with the time it was recorded.
///
/// Location and time live in one value so they are always replaced together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Where the vehicle was.
    pub location: Coordinate,
    /// When the position was reported.
    pub time: SystemTime,
}

/// The latest known state of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    fix: Option<PositionFix>,
    registration_time: SystemTime,
}

impl Vehicle {
    /// A freshly registered vehicle with no position yet.
    #[must_use]
    pub fn registered(id: VehicleId, registration_time: SystemTime) -> Self {
        Self {
            id,
            fix: None,
            registration_time,
        }
    }

    /// A vehicle first seen through a position report. Registration and
    /// position time are the same instant.
    #[must_use]
    pub fn first_seen_at(id: VehicleId, location: Coordinate, time: SystemTime) -> Self {
        Self {
            id,
            fix: Some(PositionFix { location, time }),
            registration_time: time,
        }
    }

    /// Record a new position, replacing the previous one.
    pub fn set_fix(&mut self, fix: PositionFix) {
        self.fix = Some(fix);
    }

    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    #[must_use]
    pub fn fix(&self) -> Option<&PositionFix> {
        self.fix.as_ref()
    }

    /// Last reported location, if any.
    #[must_use]
    pub fn location(&self) -> Option<Coordinate> {
        self.fix.map(|f| f.location)
    }

    /// Time of the last position report, if any.
    #[must_use]
    pub fn position_time(&self) -> Option<SystemTime> {
        self.fix.map(|f| f.time)
    }

    #[must_use]
    pub const fn registration_time(&self) -> SystemTime {
        self.registration_time
    }

    /// The most recent time this vehicle was heard from.
    #[must_use]
    pub fn last_activity(&self) -> SystemTime {
        self.position_time().unwrap_or(self.registration_time)
    }
}
