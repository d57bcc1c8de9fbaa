//! Type-erased behavior components with signature-based update dispatch
//!
//! A behavior type declares which update signatures it offers through
//! [`Behavior::binding`]. The binding keeps only the most capable one:
//!
//! 1. `(entity, input, dt)` - [`Binding::full`]
//! 2. `(entity, input)` - [`Binding::input`]
//! 3. `(entity, dt)` - [`Binding::timed`]
//! 4. `(entity)` - [`Binding::entity`]
//!
//! The order the author lists them in does not matter. A type that offers
//! none is inert: attaching it is fine and updating it does nothing.

use crate::entity::Entity;
use pulse_core::{EventSnapshot, Result};
use pulse_physics::Seconds;
use std::any::{type_name, Any};
use std::fmt;

pub type FullUpdate<B> = fn(&mut B, &mut Entity, &EventSnapshot, Seconds) -> Result<()>;
pub type InputUpdate<B> = fn(&mut B, &mut Entity, &EventSnapshot) -> Result<()>;
pub type TimedUpdate<B> = fn(&mut B, &mut Entity, Seconds) -> Result<()>;
pub type EntityUpdate<B> = fn(&mut B, &mut Entity) -> Result<()>;

/// The update signature a component ended up bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateShape {
    /// `(entity, input, dt)`
    Full,
    /// `(entity, input)`
    Input,
    /// `(entity, dt)`
    Timed,
    /// `(entity)`
    EntityOnly,
    /// No update at all
    Inert,
}

impl UpdateShape {
    fn rank(self) -> u8 {
        match self {
            UpdateShape::Full => 4,
            UpdateShape::Input => 3,
            UpdateShape::Timed => 2,
            UpdateShape::EntityOnly => 1,
            UpdateShape::Inert => 0,
        }
    }
}

impl fmt::Display for UpdateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateShape::Full => "entity+input+dt",
            UpdateShape::Input => "entity+input",
            UpdateShape::Timed => "entity+dt",
            UpdateShape::EntityOnly => "entity",
            UpdateShape::Inert => "inert",
        };
        f.write_str(s)
    }
}

enum Update<B> {
    Full(FullUpdate<B>),
    Input(InputUpdate<B>),
    Timed(TimedUpdate<B>),
    EntityOnly(EntityUpdate<B>),
    Inert,
}

impl<B> Clone for Update<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Update<B> {}

impl<B> Update<B> {
    fn shape(&self) -> UpdateShape {
        match self {
            Update::Full(_) => UpdateShape::Full,
            Update::Input(_) => UpdateShape::Input,
            Update::Timed(_) => UpdateShape::Timed,
            Update::EntityOnly(_) => UpdateShape::EntityOnly,
            Update::Inert => UpdateShape::Inert,
        }
    }
}

/// The single update adapter selected for a behavior type.
pub struct Binding<B> {
    update: Update<B>,
}

impl<B> Clone for Binding<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Binding<B> {}

impl<B> Binding<B> {
    /// A binding with no update
    pub fn inert() -> Self {
        Self {
            update: Update::Inert,
        }
    }

    /// Offer an `(entity, input, dt)` update
    pub fn full(self, f: FullUpdate<B>) -> Self {
        self.offer(Update::Full(f))
    }

    /// Offer an `(entity, input)` update
    pub fn input(self, f: InputUpdate<B>) -> Self {
        self.offer(Update::Input(f))
    }

    /// Offer an `(entity, dt)` update
    pub fn timed(self, f: TimedUpdate<B>) -> Self {
        self.offer(Update::Timed(f))
    }

    /// Offer an `(entity)` update
    pub fn entity(self, f: EntityUpdate<B>) -> Self {
        self.offer(Update::EntityOnly(f))
    }

    pub fn shape(&self) -> UpdateShape {
        self.update.shape()
    }

    fn offer(self, candidate: Update<B>) -> Self {
        if candidate.shape().rank() > self.update.shape().rank() {
            Self { update: candidate }
        } else {
            self
        }
    }

    fn call(
        &self,
        behavior: &mut B,
        entity: &mut Entity,
        input: &EventSnapshot,
        dt: Seconds,
    ) -> Result<()> {
        match self.update {
            Update::Full(f) => f(behavior, entity, input, dt),
            Update::Input(f) => f(behavior, entity, input),
            Update::Timed(f) => f(behavior, entity, dt),
            Update::EntityOnly(f) => f(behavior, entity),
            Update::Inert => Ok(()),
        }
    }
}

impl<B> Default for Binding<B> {
    fn default() -> Self {
        Self::inert()
    }
}

/// A behavior that can be attached to an entity as a component.
///
/// `Clone` is required so that copying an entity copies its component state
/// instead of sharing it.
pub trait Behavior: Clone + Send + 'static {
    /// The update signatures this type offers. Defaults to none.
    fn binding() -> Binding<Self> {
        Binding::inert()
    }
}

pub(crate) trait ErasedBehavior: Send {
    fn update(&mut self, entity: &mut Entity, input: &EventSnapshot, dt: Seconds) -> Result<()>;
    fn clone_box(&self) -> Box<dyn ErasedBehavior>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Bound<B: Behavior> {
    behavior: B,
    binding: Binding<B>,
}

impl<B: Behavior> ErasedBehavior for Bound<B> {
    fn update(&mut self, entity: &mut Entity, input: &EventSnapshot, dt: Seconds) -> Result<()> {
        self.binding.call(&mut self.behavior, entity, input, dt)
    }

    fn clone_box(&self) -> Box<dyn ErasedBehavior> {
        Box::new(Bound {
            behavior: self.behavior.clone(),
            binding: self.binding,
        })
    }

    fn as_any(&self) -> &dyn Any {
        &self.behavior
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.behavior
    }
}

/// A named, type-erased behavior owned by one entity.
pub struct Component {
    name: &'static str,
    shape: UpdateShape,
    pub(crate) behavior: Box<dyn ErasedBehavior>,
}

impl Component {
    /// Wrap a behavior, binding its update adapter once
    pub fn new<B: Behavior>(behavior: B) -> Self {
        let binding = B::binding();
        Self {
            name: type_name::<B>(),
            shape: binding.shape(),
            behavior: Box::new(Bound { behavior, binding }),
        }
    }

    /// Fully qualified type name of the wrapped behavior
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn shape(&self) -> UpdateShape {
        self.shape
    }

    pub fn has_update(&self) -> bool {
        self.shape != UpdateShape::Inert
    }

    /// Run the bound update against an entity this component is not attached to.
    ///
    /// Attached components are driven through [`Entity::run_components`].
    pub fn on_update(&mut self, entity: &mut Entity, input: &EventSnapshot, dt: Seconds) -> Result<()> {
        self.behavior.update(entity, input, dt)
    }

    /// Borrow the wrapped behavior if it is a `B`
    pub fn get<B: Behavior>(&self) -> Option<&B> {
        self.behavior.as_any().downcast_ref::<B>()
    }

    /// Mutably borrow the wrapped behavior if it is a `B`
    pub fn get_mut<B: Behavior>(&mut self) -> Option<&mut B> {
        self.behavior.as_any_mut().downcast_mut::<B>()
    }
}

impl Clone for Component {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            shape: self.shape,
            behavior: self.behavior.clone_box(),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}
