//! Request handling, independent of the transport.
//!
//! [`Handler`] decodes a request payload, runs the matching registry
//! operation and produces the reply plus any notifications to publish. The
//! NATS loop in [`crate::api`] only moves bytes.

use std::sync::Arc;

use tracing::{debug, warn};

use vehicle_net::messages::{
    ApiResponse, BeaconRequest, BeaconResponse, NearbyRequest, NearbyResponse, Notification,
    PositionAck, PositionReport, RegisterResponse,
};
use vehicle_net::{Operation, Subjects};
use vehicle_registry::VehicleRegistry;

/// The result of handling one request.
#[derive(Debug)]
pub struct Reply {
    /// Sent back to the requester.
    pub response: ApiResponse,
    /// Notifications to publish, with their subjects.
    pub notifications: Vec<(String, Notification)>,
}

impl From<ApiResponse> for Reply {
    fn from(response: ApiResponse) -> Self {
        Self {
            response,
            notifications: Vec::new(),
        }
    }
}

/// Maps requests onto registry operations.
#[derive(Debug, Clone)]
pub struct Handler {
    registry: Arc<VehicleRegistry>,
    subjects: Subjects,
}

impl Handler {
    #[must_use]
    pub fn new(registry: Arc<VehicleRegistry>, subjects: Subjects) -> Self {
        Self { registry, subjects }
    }

    #[must_use]
    pub fn subjects(&self) -> &Subjects {
        &self.subjects
    }

    /// Handle a request received on `subject`.
    #[must_use]
    pub fn handle(&self, subject: &str, payload: &[u8]) -> Reply {
        let Some(op) = self.subjects.parse(subject) else {
            warn!(subject, "unknown operation");
            return ApiResponse::error(format!("unknown operation: {subject}")).into();
        };

        debug!(op = op.as_str(), "received request");

        match op {
            Operation::Register => self.handle_register().into(),
            Operation::Position => self.handle_position(payload).into(),
            Operation::Nearby => self.handle_nearby(payload).into(),
            Operation::Beacon => self.handle_beacon(payload),
        }
    }

    // -- Handlers --

    fn handle_register(&self) -> ApiResponse {
        let vehicle_id = self.registry.register_vehicle();
        ok_json(&RegisterResponse { vehicle_id })
    }

    fn handle_position(&self, payload: &[u8]) -> ApiResponse {
        let req: PositionReport = match vehicle_net::decode(payload) {
            Ok(r) => r,
            Err(e) => return ApiResponse::error(format!("invalid request: {e}")),
        };

        match self
            .registry
            .report_position(req.vehicle_id, req.latitude, req.longitude)
        {
            Ok(outcome) => ok_json(&PositionAck {
                created: outcome.was_created(),
            }),
            Err(e) => ApiResponse::error(e.to_string()),
        }
    }

    fn handle_nearby(&self, payload: &[u8]) -> ApiResponse {
        let req: NearbyRequest = match vehicle_net::decode(payload) {
            Ok(r) => r,
            Err(e) => return ApiResponse::error(format!("invalid request: {e}")),
        };

        match self.registry.query_nearby(req.vehicle_id, req.radius) {
            Ok(vehicles) => ok_json(&NearbyResponse::from_vehicles(&vehicles)),
            Err(e) => ApiResponse::error(e.to_string()),
        }
    }

    fn handle_beacon(&self, payload: &[u8]) -> Reply {
        let req: BeaconRequest = match vehicle_net::decode(payload) {
            Ok(r) => r,
            Err(e) => return ApiResponse::error(format!("invalid request: {e}")).into(),
        };

        let vehicles = match self.registry.query_nearby(req.vehicle_id, req.radius) {
            Ok(v) => v,
            Err(e) => return ApiResponse::error(e.to_string()).into(),
        };

        let notifications: Vec<(String, Notification)> = vehicles
            .iter()
            .map(|target| {
                (
                    self.subjects.notifications(target.id()),
                    Notification {
                        vehicle_id: req.vehicle_id,
                        message: req.message.clone(),
                    },
                )
            })
            .collect();

        debug!(
            vehicle_id = %req.vehicle_id,
            notified = notifications.len(),
            "beacon fan-out"
        );

        Reply {
            response: ok_json(&BeaconResponse {
                notified: notifications.len(),
            }),
            notifications,
        }
    }
}

fn ok_json<T: serde::Serialize>(value: &T) -> ApiResponse {
    match serde_json::to_value(value) {
        Ok(v) => ApiResponse::ok(v),
        Err(e) => ApiResponse::error(format!("failed to encode reply: {e}")),
    }
}
