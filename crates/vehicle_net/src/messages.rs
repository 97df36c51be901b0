//! Message types exchanged between vehicles and the registry server.
//!
//! All payloads are JSON. Vehicle identifiers travel as their canonical
//! hyphenated UUID string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vehicle_registry::{Vehicle, VehicleId};

// ── Registration ────────────────────────────────────────────────────────────

/// Reply to `{prefix}.register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub vehicle_id: VehicleId,
}

// ── Position reports ────────────────────────────────────────────────────────

/// A vehicle reports where it is. Sent on `{prefix}.position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub vehicle_id: VehicleId,
    pub latitude: f64,
    pub longitude: f64,
}

/// Acknowledges a [`PositionReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAck {
    /// `true` if the vehicle was unknown and has been registered by this
    /// report.
    pub created: bool,
}

// ── Proximity ───────────────────────────────────────────────────────────────

/// Ask for vehicles near a reference vehicle. Sent on `{prefix}.nearby`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRequest {
    pub vehicle_id: VehicleId,
    /// Search radius in metres.
    pub radius: f64,
}

/// One vehicle in a [`NearbyResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyVehicle {
    pub id: VehicleId,
    pub latitude: f64,
    pub longitude: f64,
}

impl NearbyVehicle {
    /// Wire view of a vehicle. `None` if the vehicle has no position.
    #[must_use]
    pub fn from_vehicle(vehicle: &Vehicle) -> Option<Self> {
        vehicle.location().map(|loc| Self {
            id: vehicle.id(),
            latitude: loc.latitude(),
            longitude: loc.longitude(),
        })
    }
}

/// Reply to a [`NearbyRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub vehicles: Vec<NearbyVehicle>,
}

impl NearbyResponse {
    #[must_use]
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        Self {
            vehicles: vehicles.iter().filter_map(NearbyVehicle::from_vehicle).collect(),
        }
    }
}

// ── Beacons and notifications ───────────────────────────────────────────────

/// Broadcast a message to every vehicle near the sender. Sent on
/// `{prefix}.beacon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconRequest {
    pub vehicle_id: VehicleId,
    /// Broadcast radius in metres.
    pub radius: f64,
    pub message: String,
}

/// Reply to a [`BeaconRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconResponse {
    /// Number of vehicles a notification was published to.
    pub notified: usize,
}

/// Delivered to a vehicle on `{prefix}.notifications.<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The vehicle that sent the beacon.
    pub vehicle_id: VehicleId,
    pub message: String,
}

// ── Envelope ────────────────────────────────────────────────────────────────

/// Reply envelope: exactly one of `ok` or `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    #[must_use]
    pub fn ok(value: Value) -> Self {
        Self {
            ok: Some(value),
            error: None,
        }
    }

    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            ok: None,
            error: Some(msg.into()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
