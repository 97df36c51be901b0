//! The vehicle registry: the three operations exposed to transports.
//!
//! [`VehicleRegistry`] ties together the [`VehicleStore`], a [`Clock`] and a
//! [`RegistryConfig`]. It is an ordinary owned value: wrap it in an `Arc` to
//! share it between request handlers. All operations are synchronous and
//! take `&self`.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;
use vehicle_geo::Coordinate;

use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::error::{QueryRejection, RegistryError};
use crate::proximity::find_within_with_threshold;
use crate::store::{ReportOutcome, VehicleStore};
use crate::vehicle::{Vehicle, VehicleId};

/// A concurrent registry of vehicles and their latest positions.
#[derive(Debug)]
pub struct VehicleRegistry {
    store: VehicleStore,
    clock: Arc<dyn Clock>,
    config: RegistryConfig,
}

impl VehicleRegistry {
    /// Create an empty registry using the system clock.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty registry reading time from `clock`.
    #[must_use]
    pub fn with_clock(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: VehicleStore::new(),
            clock,
            config,
        }
    }

    /// Register a new vehicle and return its identifier.
    pub fn register_vehicle(&self) -> VehicleId {
        self.store.register(self.clock.now())
    }

    /// Record the current position of a vehicle.
    ///
    /// Unknown identifiers are registered implicitly; see
    /// [`ReportOutcome::CreatedImplicitly`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedCoordinate`] if the coordinate is
    /// out of range. Nothing is stored in that case.
    pub fn report_position(
        &self,
        id: VehicleId,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReportOutcome, RegistryError> {
        let location = Coordinate::new(latitude, longitude)?;
        Ok(self.store.report_position(id, location, self.clock.now()))
    }

    /// Find every other vehicle within `radius` metres of vehicle `id` that
    /// reported inside the configured time window.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidQuery`] if `id` is unknown or has no
    /// recorded position.
    pub fn query_nearby(&self, id: VehicleId, radius: f64) -> Result<Vec<Vehicle>, RegistryError> {
        let center = self.store.get(id).ok_or(RegistryError::InvalidQuery {
            id,
            reason: QueryRejection::UnknownVehicle,
        })?;

        find_within_with_threshold(
            &center,
            radius,
            &self.store.snapshot(),
            self.clock.now(),
            self.config.time_window,
            self.config.parallel_threshold,
        )
    }

    /// Remove vehicles idle for longer than the configured eviction horizon.
    ///
    /// Returns the number of vehicles removed; always `0` when no horizon is
    /// configured.
    pub fn evict_stale(&self) -> usize {
        let Some(horizon) = self.config.eviction_horizon else {
            return 0;
        };
        let cutoff = self
            .clock
            .now()
            .checked_sub(horizon)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let removed = self.store.evict_stale(cutoff);
        debug!(removed, remaining = self.store.len(), "eviction pass");
        removed
    }

    /// Returns a copy of a vehicle's current state.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<Vehicle> {
        self.store.get(id)
    }

    /// Returns the number of known vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no vehicle is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the registry configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
