//! # vehicle_net
//!
//! NATS transport layer for the vehicle registry.
//!
//! This crate provides:
//!
//! - [`subjects`]: subject hierarchy and operation routing.
//! - [`messages`]: request, reply and notification payloads.
//! - [`codec`]: JSON serialisation helpers.
//! - [`connection`]: NATS connection management.
//! - [`error`]: network-layer error types.

pub mod codec;
pub mod connection;
pub mod error;
pub mod messages;
pub mod subjects;

pub use codec::{decode, encode};
pub use connection::NatsConnection;
pub use error::NetError;
pub use subjects::{Operation, Subjects};
