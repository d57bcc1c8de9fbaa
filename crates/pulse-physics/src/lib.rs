//! Pulse Physics - typed 2D rigid-body state and integration
//!
//! - `Position`, `Velocity`, `Acceleration`, `Force`, `Weight`, `Seconds` -
//!   quantities restricted to dimensionally valid operators
//! - `Body` - the physical state of one entity
//! - `integrate` - midpoint (semi-implicit) fixed-step integrator

mod body;
mod integrate;
mod quantity;

pub use body::Body;
pub use integrate::{integrate, rk1};
pub use quantity::{Acceleration, Displacement, Force, Position, Seconds, Velocity, Weight};
