//! Strongly-typed physical quantities
//!
//! Each quantity wraps a [`Vector2D`] but only exposes the operators that are
//! dimensionally sound, so e.g. adding a `Velocity` to a `Position` does not
//! compile.

use pulse_core::Vector2D;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::time::Duration;

/// Simulated time in seconds. Zero and negative spans are allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    pub const ZERO: Self = Self(0.0);

    pub const fn new(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn count(&self) -> f64 {
        self.0
    }

    /// Convert to a wall-clock duration. Negative or non-finite spans have none.
    pub fn to_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.0).ok()
    }
}

impl From<Duration> for Seconds {
    fn from(duration: Duration) -> Self {
        Self(duration.as_secs_f64())
    }
}

impl Add for Seconds {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Seconds {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<f64> for Seconds {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self(self.0 * k)
    }
}

impl Div<f64> for Seconds {
    type Output = Self;
    fn div(self, k: f64) -> Self {
        Self(self.0 / k)
    }
}

/// Mass of a body. Must be positive; division by a zero weight is not guarded.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(pub f64);

impl Weight {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(1.0)
    }
}

macro_rules! vector_quantity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            pub value: Vector2D,
        }

        impl $name {
            pub const ZERO: Self = Self { value: Vector2D::ZERO };

            pub const fn new(x: f64, y: f64) -> Self {
                Self { value: Vector2D::new(x, y) }
            }

            pub const fn from_vector(value: Vector2D) -> Self {
                Self { value }
            }
        }
    };
}

vector_quantity!(
    /// Absolute location in world space
    Position
);
vector_quantity!(
    /// Difference between two positions
    Displacement
);
vector_quantity!(Velocity);
vector_quantity!(Acceleration);
vector_quantity!(Force);

// Position

impl Add<Displacement> for Position {
    type Output = Position;
    fn add(self, d: Displacement) -> Position {
        Position::from_vector(self.value + d.value)
    }
}

impl AddAssign<Displacement> for Position {
    fn add_assign(&mut self, d: Displacement) {
        self.value += d.value;
    }
}

impl Sub for Position {
    type Output = Displacement;
    fn sub(self, other: Position) -> Displacement {
        Displacement::from_vector(self.value - other.value)
    }
}

// Displacement

impl Add for Displacement {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_vector(self.value + other.value)
    }
}

impl Neg for Displacement {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_vector(-self.value)
    }
}

// Velocity

impl Add for Velocity {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_vector(self.value + other.value)
    }
}

impl AddAssign for Velocity {
    fn add_assign(&mut self, other: Self) {
        self.value += other.value;
    }
}

impl Sub for Velocity {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::from_vector(self.value - other.value)
    }
}

impl Neg for Velocity {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_vector(-self.value)
    }
}

impl Mul<Seconds> for Velocity {
    type Output = Displacement;
    fn mul(self, t: Seconds) -> Displacement {
        Displacement::from_vector(self.value * t.count())
    }
}

// Acceleration

impl Add for Acceleration {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_vector(self.value + other.value)
    }
}

impl AddAssign for Acceleration {
    fn add_assign(&mut self, other: Self) {
        self.value += other.value;
    }
}

impl Mul<Seconds> for Acceleration {
    type Output = Velocity;
    fn mul(self, t: Seconds) -> Velocity {
        Velocity::from_vector(self.value * t.count())
    }
}

// Force

impl Add for Force {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_vector(self.value + other.value)
    }
}

impl AddAssign for Force {
    fn add_assign(&mut self, other: Self) {
        self.value += other.value;
    }
}

impl Neg for Force {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_vector(-self.value)
    }
}

impl Div<Weight> for Force {
    type Output = Acceleration;
    fn div(self, w: Weight) -> Acceleration {
        Acceleration::from_vector(self.value / w.value())
    }
}
