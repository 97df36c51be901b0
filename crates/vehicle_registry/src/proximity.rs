//! Proximity queries over a snapshot of the store.
//!
//! [`find_within`] returns every vehicle other than the centre that has a
//! position, reported strictly after `now - window`, lying strictly within
//! `radius` metres of the centre. Candidates pass through the cheap checks
//! first (position present, not the centre, fresh, inside the bounding box)
//! and only the survivors pay for the great-circle distance.
//!
//! Each candidate is evaluated independently, so large snapshots are split
//! across the rayon thread pool. The result is the same set either way; only
//! its order may differ.

use std::time::{Duration, SystemTime};

use rayon::prelude::*;
use tracing::debug;
use vehicle_geo::SearchArea;

use crate::error::{QueryRejection, RegistryError};
use crate::vehicle::{Vehicle, VehicleId};

/// Snapshot size at which filtering moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// The per-candidate filter of a proximity query.
#[derive(Debug, Clone, Copy)]
struct Filter {
    center_id: VehicleId,
    area: SearchArea,
    cutoff: SystemTime,
}

impl Filter {
    fn accepts(&self, candidate: &Vehicle) -> bool {
        let Some(fix) = candidate.fix() else {
            return false;
        };
        candidate.id() != self.center_id
            && fix.time > self.cutoff
            && self.area.contains(&fix.location)
    }
}

/// Find all vehicles in `all` within `radius` metres of `center`.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidQuery`] if `center` has no position.
pub fn find_within(
    center: &Vehicle,
    radius: f64,
    all: &[Vehicle],
    now: SystemTime,
    window: Duration,
) -> Result<Vec<Vehicle>, RegistryError> {
    find_within_with_threshold(center, radius, all, now, window, DEFAULT_PARALLEL_THRESHOLD)
}

/// [`find_within`] with an explicit parallelism threshold: snapshots with at
/// least `parallel_threshold` vehicles are filtered on the rayon pool.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidQuery`] if `center` has no position.
pub fn find_within_with_threshold(
    center: &Vehicle,
    radius: f64,
    all: &[Vehicle],
    now: SystemTime,
    window: Duration,
    parallel_threshold: usize,
) -> Result<Vec<Vehicle>, RegistryError> {
    let location = center.location().ok_or(RegistryError::InvalidQuery {
        id: center.id(),
        reason: QueryRejection::NoPosition,
    })?;

    let Some(area) = SearchArea::new(location, radius) else {
        debug!(vehicle_id = %center.id(), radius, "non-positive radius, nothing can match");
        return Ok(Vec::new());
    };

    let filter = Filter {
        center_id: center.id(),
        area,
        cutoff: now.checked_sub(window).unwrap_or(SystemTime::UNIX_EPOCH),
    };

    let parallel = all.len() >= parallel_threshold;
    let matches: Vec<Vehicle> = if parallel {
        all.par_iter()
            .filter(|v| filter.accepts(v))
            .cloned()
            .collect()
    } else {
        all.iter().filter(|v| filter.accepts(v)).cloned().collect()
    };

    debug!(
        vehicle_id = %center.id(),
        radius,
        candidates = all.len(),
        matches = matches.len(),
        parallel,
        "proximity query"
    );

    Ok(matches)
}
