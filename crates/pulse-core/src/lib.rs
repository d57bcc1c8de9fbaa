//! Pulse Core - Foundational types for the Pulse simulation core
//!
//! This crate provides the core types that all other Pulse crates depend on:
//! - `Vector2D` - 2D vector algebra
//! - `EntityId` - Opaque entity identifiers
//! - `Event`, `EventLabel`, `EventSnapshot` - Per-frame input events
//! - Error types and Result alias

mod error;
mod event;
mod id;
mod snapshot;
mod types;

pub use error::{PulseError, Result};
pub use event::{Event, EventLabel};
pub use id::EntityId;
pub use snapshot::EventSnapshot;
pub use types::Vector2D;
