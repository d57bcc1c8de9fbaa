//! Pulse ECS - entities, worlds and behavior components
//!
//! Components wrap arbitrary behavior types. Each type declares which of the
//! four update signatures it offers and the most capable one is bound once,
//! when the component is created.

pub mod behaviors;
mod component;
mod entity;
mod world;

pub use behaviors::{Gravity, PlayerInput};
pub use component::{
    Behavior, Binding, Component, EntityUpdate, FullUpdate, InputUpdate, TimedUpdate, UpdateShape,
};
pub use entity::Entity;
pub use world::World;
