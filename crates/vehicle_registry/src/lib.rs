//! # vehicle_registry
//!
//! A concurrent, in-memory registry of vehicles and their last known
//! positions, answering "which vehicles reported near this one recently?".
//!
//! This crate provides:
//!
//! - [`VehicleRegistry`]: register, report position, query nearby.
//! - [`VehicleStore`]: the sharded map holding each vehicle's latest state.
//! - [`find_within`]: the proximity filter over a store snapshot.
//! - [`Clock`]: the time source, swappable for tests.
//! - [`RegistryConfig`]: staleness window and tuning, loaded from the
//!   environment.
//! - [`RegistryError`]: query and validation errors.
//!
//! ## Usage
//!
//! ```rust
//! use vehicle_registry::{RegistryConfig, VehicleRegistry};
//!
//! let registry = VehicleRegistry::new(RegistryConfig::default());
//! let a = registry.register_vehicle();
//! let b = registry.register_vehicle();
//! registry.report_position(a, 0.0, 0.0).unwrap();
//! registry.report_position(b, 0.0, 0.01).unwrap();
//!
//! let nearby = registry.query_nearby(a, 2_000.0).unwrap();
//! assert_eq!(nearby.len(), 1);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod proximity;
pub mod registry;
pub mod store;
pub mod vehicle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RegistryConfig;
pub use error::{QueryRejection, RegistryError};
pub use proximity::{find_within, find_within_with_threshold};
pub use registry::VehicleRegistry;
pub use store::{ReportOutcome, VehicleStore};
pub use vehicle::{PositionFix, Vehicle, VehicleId};

// Re-export the coordinate type so transports need not depend on vehicle_geo.
pub use vehicle_geo::{Coordinate, GeoError};
