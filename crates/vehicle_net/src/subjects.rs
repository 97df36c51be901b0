//! NATS subject hierarchy.
//!
//! Every subject lives under a configurable prefix (default `vehicles`) so
//! several registries can share one NATS cluster:
//!
//! | subject                         | direction        | payload                |
//! |---------------------------------|------------------|------------------------|
//! | `{prefix}.register`             | request/reply    | none                   |
//! | `{prefix}.position`             | request/reply    | `PositionReport`       |
//! | `{prefix}.nearby`               | request/reply    | `NearbyRequest`        |
//! | `{prefix}.beacon`               | request/reply    | `BeaconRequest`        |
//! | `{prefix}.notifications.<id>`   | server → vehicle | `Notification`         |

use vehicle_registry::VehicleId;

/// Default root prefix for all registry subjects.
pub const DEFAULT_PREFIX: &str = "vehicles";

/// A request operation, identified by the last segment of its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Position,
    Nearby,
    Beacon,
}

impl Operation {
    /// The subject segment naming this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Position => "position",
            Self::Nearby => "nearby",
            Self::Beacon => "beacon",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "register" => Some(Self::Register),
            "position" => Some(Self::Position),
            "nearby" => Some(Self::Nearby),
            "beacon" => Some(Self::Beacon),
            _ => None,
        }
    }
}

/// Subject builder bound to one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subjects {
    prefix: String,
}

impl Default for Subjects {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl Subjects {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `{prefix}.{operation}`
    #[must_use]
    pub fn operation(&self, op: Operation) -> String {
        format!("{}.{}", self.prefix, op.as_str())
    }

    /// Subject matching every request operation: `{prefix}.*`
    #[must_use]
    pub fn requests(&self) -> String {
        format!("{}.*", self.prefix)
    }

    /// Subject on which a vehicle receives notifications.
    ///
    /// `{prefix}.notifications.<vehicle_id>`
    #[must_use]
    pub fn notifications(&self, vehicle: VehicleId) -> String {
        format!("{}.notifications.{vehicle}", self.prefix)
    }

    /// Map a request subject back to its operation.
    ///
    /// Returns `None` for subjects outside the prefix or unknown operations.
    #[must_use]
    pub fn parse(&self, subject: &str) -> Option<Operation> {
        subject
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(Operation::from_segment)
    }
}
