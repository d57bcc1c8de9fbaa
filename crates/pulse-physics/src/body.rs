//! Rigid body state

use crate::quantity::{Acceleration, Force, Position, Velocity, Weight};
use pulse_core::Vector2D;
use serde::{Deserialize, Serialize};

/// Physical state of an entity.
///
/// `acceleration` holds the effect of the forces applied during the current
/// step only; the simulation step zeroes it after integrating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub velocity: Velocity,
    #[serde(default)]
    pub acceleration: Acceleration,
    /// Extent of the body in world units
    #[serde(default = "default_dimension")]
    pub dimension: Vector2D,
    #[serde(default)]
    pub weight: Weight,
}

fn default_dimension() -> Vector2D {
    Vector2D::ONE
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Position::ZERO,
            velocity: Velocity::ZERO,
            acceleration: Acceleration::ZERO,
            dimension: default_dimension(),
            weight: Weight::default(),
        }
    }
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_dimension(mut self, dimension: Vector2D) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Accumulate a force into this step's acceleration
    pub fn add_force(&mut self, force: Force) {
        self.acceleration += force / self.weight;
    }

    /// Value form of [`add_force`](Self::add_force)
    pub fn with_force(mut self, force: Force) -> Self {
        self.add_force(force);
        self
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = Acceleration::ZERO;
    }
}
