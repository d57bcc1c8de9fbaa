//! Stock behaviors: constant gravity and a keyboard-style player controller

use crate::component::{Behavior, Binding};
use crate::entity::Entity;
use pulse_core::{EventLabel, EventSnapshot, Result};
use pulse_physics::Force;
use serde::{Deserialize, Serialize};

/// Pulls the body down with a force proportional to its weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    /// Gravitational acceleration magnitude
    pub g: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { g: 10.0 }
    }
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    fn on_update(&mut self, entity: &mut Entity) -> Result<()> {
        let weight = entity.body.weight.value();
        entity.body.add_force(Force::new(0.0, -weight * self.g));
        Ok(())
    }
}

impl Behavior for Gravity {
    fn binding() -> Binding<Self> {
        Binding::inert().entity(Self::on_update)
    }
}

/// Directional controller driven by press/release events.
///
/// A press latches the direction on and the matching release latches it off,
/// so a held key keeps pushing across frames without repeated events. Each
/// held direction contributes `input_force` along its axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    pub input_force: f64,
    #[serde(skip)]
    up: bool,
    #[serde(skip)]
    down: bool,
    #[serde(skip)]
    left: bool,
    #[serde(skip)]
    right: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl PlayerInput {
    pub fn new(input_force: f64) -> Self {
        Self {
            input_force,
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    /// Currently latched directions as `(up, down, left, right)`
    pub fn held(&self) -> (bool, bool, bool, bool) {
        (self.up, self.down, self.left, self.right)
    }

    /// Net force the latched directions produce
    pub fn force(&self) -> Force {
        let mut force = Force::ZERO;
        if self.up {
            force += Force::new(0.0, self.input_force);
        }
        if self.down {
            force += Force::new(0.0, -self.input_force);
        }
        if self.left {
            force += Force::new(-self.input_force, 0.0);
        }
        if self.right {
            force += Force::new(self.input_force, 0.0);
        }
        force
    }

    fn on_update(&mut self, entity: &mut Entity, input: &EventSnapshot) -> Result<()> {
        latch(input, EventLabel::UpPressed, EventLabel::UpReleased, &mut self.up);
        latch(input, EventLabel::DownPressed, EventLabel::DownReleased, &mut self.down);
        latch(input, EventLabel::LeftPressed, EventLabel::LeftReleased, &mut self.left);
        latch(input, EventLabel::RightPressed, EventLabel::RightReleased, &mut self.right);

        entity.body.add_force(self.force());
        Ok(())
    }
}

// press wins if both arrive in the same frame
fn latch(input: &EventSnapshot, pressed: EventLabel, released: EventLabel, flag: &mut bool) {
    if input.has(pressed) {
        *flag = true;
    } else if input.has(released) {
        *flag = false;
    }
}

impl Behavior for PlayerInput {
    fn binding() -> Binding<Self> {
        Binding::inert().input(Self::on_update)
    }
}
