//! Concurrent vehicle storage.
//!
//! [`VehicleStore`] keeps the latest state of every vehicle in a sharded
//! [`DashMap`]. Writes lock only the shard that owns the key, so unrelated
//! vehicles never contend on a single lock, and a vehicle's location and
//! position time are replaced under that shard's write lock in one step.
//!
//! The store does not read the clock itself: callers pass the timestamp of
//! each operation.

use std::time::SystemTime;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};
use vehicle_geo::Coordinate;

use crate::vehicle::{PositionFix, Vehicle, VehicleId};

/// What a position report did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The vehicle was known; its position was replaced.
    Updated(Vehicle),
    /// The vehicle was unknown and has been created from the report.
    CreatedImplicitly(Vehicle),
}

impl ReportOutcome {
    /// The vehicle state after the report.
    #[must_use]
    pub fn vehicle(&self) -> &Vehicle {
        match self {
            Self::Updated(v) | Self::CreatedImplicitly(v) => v,
        }
    }

    /// `true` if the report created a new vehicle.
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::CreatedImplicitly(_))
    }
}

/// Shared store of the latest known state of each vehicle.
#[derive(Debug, Default)]
pub struct VehicleStore {
    vehicles: DashMap<VehicleId, Vehicle>,
}

impl VehicleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
        }
    }

    /// Register a new vehicle with a fresh identifier.
    ///
    /// The identifier is only handed out once it has been inserted into an
    /// empty slot, so concurrent registrations never share an identifier.
    pub fn register(&self, now: SystemTime) -> VehicleId {
        loop {
            let id = VehicleId::new_random();
            if let Entry::Vacant(slot) = self.vehicles.entry(id) {
                slot.insert(Vehicle::registered(id, now));
                debug!(vehicle_id = %id, "vehicle registered");
                return id;
            }
        }
    }

    /// Record a position for `id` at time `now`.
    ///
    /// Unknown identifiers are accepted: the vehicle is created as if it had
    /// registered at `now`, and the report is logged as a warning.
    pub fn report_position(
        &self,
        id: VehicleId,
        location: Coordinate,
        now: SystemTime,
    ) -> ReportOutcome {
        match self.vehicles.entry(id) {
            Entry::Occupied(mut entry) => {
                let vehicle = entry.get_mut();
                vehicle.set_fix(PositionFix {
                    location,
                    time: now,
                });
                ReportOutcome::Updated(vehicle.clone())
            }
            Entry::Vacant(slot) => {
                warn!(vehicle_id = %id, %location, "position reported for unknown vehicle");
                let vehicle = Vehicle::first_seen_at(id, location, now);
                slot.insert(vehicle.clone());
                ReportOutcome::CreatedImplicitly(vehicle)
            }
        }
    }

    /// Returns a copy of the vehicle's current state.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.get(&id).map(|v| v.value().clone())
    }

    /// Copy every vehicle out of the store.
    ///
    /// Each vehicle is read atomically; the collection as a whole is not a
    /// consistent cut across vehicles updated while the snapshot runs.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles.iter().map(|v| v.value().clone()).collect()
    }

    /// Remove vehicles that have not been heard from after `cutoff`.
    ///
    /// Returns the number of vehicles removed.
    pub fn evict_stale(&self, cutoff: SystemTime) -> usize {
        let mut removed = 0;
        self.vehicles.retain(|_, vehicle| {
            let keep = vehicle.last_activity() > cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!(removed, "evicted stale vehicles");
        }
        removed
    }

    /// Returns the number of vehicles in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns `true` if no vehicle has been registered or reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_register_creates_unpositioned_vehicle() {
        let store = VehicleStore::new();
        let id = store.register(at(10));
        let v = store.get(id).unwrap();
        assert_eq!(v.id(), id);
        assert_eq!(v.registration_time(), at(10));
        assert!(v.location().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_report_updates_known_vehicle() {
        let store = VehicleStore::new();
        let id = store.register(at(1));
        let outcome = store.report_position(id, coord(1.0, 2.0), at(5));
        assert!(!outcome.was_created());
        assert_eq!(outcome.vehicle().location(), Some(coord(1.0, 2.0)));
        assert_eq!(outcome.vehicle().position_time(), Some(at(5)));
        assert_eq!(outcome.vehicle().registration_time(), at(1));
        assert_eq!(store.get(id), Some(outcome.vehicle().clone()));
    }

    #[test]
    fn test_report_for_unknown_vehicle_creates_it() {
        let store = VehicleStore::new();
        let id = VehicleId::new_random();
        let outcome = store.report_position(id, coord(3.0, 4.0), at(7));
        assert!(matches!(outcome, ReportOutcome::CreatedImplicitly(_)));
        let v = store.get(id).unwrap();
        assert_eq!(v.registration_time(), at(7));
        assert_eq!(v.position_time(), Some(at(7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_report_replaces_previous_position() {
        let store = VehicleStore::new();
        let id = store.register(at(0));
        store.report_position(id, coord(1.0, 1.0), at(1));
        store.report_position(id, coord(2.0, 2.0), at(2));
        let v = store.get(id).unwrap();
        assert_eq!(v.location(), Some(coord(2.0, 2.0)));
        assert_eq!(v.position_time(), Some(at(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_contains_all_vehicles() {
        let store = VehicleStore::new();
        let a = store.register(at(0));
        let b = store.register(at(0));
        store.report_position(b, coord(0.0, 0.0), at(1));
        let ids: HashSet<_> = store.snapshot().iter().map(Vehicle::id).collect();
        assert_eq!(ids, HashSet::from([a, b]));
    }

    #[test]
    fn test_evict_stale() {
        let store = VehicleStore::new();
        let old = store.register(at(0));
        let fresh = store.register(at(0));
        store.report_position(fresh, coord(0.0, 0.0), at(100));
        assert_eq!(store.evict_stale(at(50)), 1);
        assert!(store.get(old).is_none());
        assert!(store.get(fresh).is_some());
    }

    #[test]
    fn test_concurrent_register_is_unique() {
        let store = VehicleStore::new();
        let threads = 8;
        let per_thread = 500;

        let ids: Vec<VehicleId> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    s.spawn(|| {
                        (0..per_thread)
                            .map(|_| store.register(at(0)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), threads * per_thread);
        assert_eq!(store.len(), threads * per_thread);
    }

    #[test]
    fn test_concurrent_reports_never_tear() {
        // Report `k` always pairs latitude `k / 1000` with time `k` seconds,
        // so any mismatch in a snapshot means a torn update.
        let store = VehicleStore::new();
        let id = store.register(at(0));
        let writers = 4u64;
        let reports = 1000u64;

        std::thread::scope(|s| {
            for w in 0..writers {
                let store = &store;
                s.spawn(move || {
                    for i in 0..reports {
                        let k = w * reports + i + 1;
                        let lat = k as f64 / 1000.0;
                        store.report_position(id, coord(lat, 0.0), at(k));
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..2000 {
                    for v in store.snapshot() {
                        if let Some(fix) = v.fix() {
                            let secs = fix
                                .time
                                .duration_since(SystemTime::UNIX_EPOCH)
                                .unwrap()
                                .as_secs();
                            assert_eq!(fix.location.latitude(), secs as f64 / 1000.0);
                        }
                    }
                }
            });
        });
    }
}
