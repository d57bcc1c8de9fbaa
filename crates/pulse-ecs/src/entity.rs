//! Entities: a body plus an ordered list of components

use crate::component::{Behavior, Component};
use pulse_core::{EntityId, EventSnapshot, Result};
use pulse_physics::{Body, Seconds};

/// A simulated object.
///
/// Components run in attachment order and each one sees the mutations made
/// by the ones before it in the same step. Cloning an entity deep-copies its
/// components and keeps its id; [`duplicate`](Entity::duplicate) assigns a
/// new one.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    components: Vec<Component>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(Body::default())
    }
}

impl Entity {
    /// Create an entity with a fresh id and no components
    pub fn new(body: Body) -> Self {
        Self::with_id(EntityId::new(), body)
    }

    pub fn with_id(id: EntityId, body: Body) -> Self {
        Self {
            id,
            body,
            components: Vec::new(),
        }
    }

    /// Builder form of [`attach`](Self::attach)
    pub fn with_component<B: Behavior>(mut self, behavior: B) -> Self {
        self.attach(behavior);
        self
    }

    /// Attach a behavior after the existing components
    pub fn attach<B: Behavior>(&mut self, behavior: B) -> &mut Self {
        self.attach_component(Component::new(behavior))
    }

    /// Attach an already-wrapped component after the existing ones
    pub fn attach_component(&mut self, component: Component) -> &mut Self {
        if component.has_update() {
            log::debug!(
                "entity {}: attached {} ({})",
                self.id,
                component.name(),
                component.shape()
            );
        } else {
            log::debug!(
                "entity {}: attached {} (inert, no update signature)",
                self.id,
                component.name()
            );
        }
        self.components.push(component);
        self
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First attached behavior of type `B`
    pub fn component<B: Behavior>(&self) -> Option<&B> {
        self.components.iter().find_map(|c| c.get::<B>())
    }

    /// First attached behavior of type `B`, mutably
    pub fn component_mut<B: Behavior>(&mut self) -> Option<&mut B> {
        self.components.iter_mut().find_map(|c| c.get_mut::<B>())
    }

    /// Run every attached component once, in attachment order.
    ///
    /// Each behavior runs as a working copy so it can take the whole entity
    /// mutably; the copy replaces the stored behavior once it returns, even
    /// on failure. While it runs, the entity still holds the behavior's
    /// state from before this update, so cloning the entity mid-update gives
    /// a fully working copy. The first failure stops the pass and is returned
    /// as-is. Components attached during the pass first run on the next one.
    pub fn run_components(&mut self, input: &EventSnapshot, dt: Seconds) -> Result<()> {
        let count = self.components.len();
        for index in 0..count {
            let mut behavior = self.components[index].behavior.clone_box();
            let result = behavior.update(self, input, dt);
            self.components[index].behavior = behavior;
            result?;
        }
        Ok(())
    }

    /// Clone this entity under a fresh id.
    ///
    /// `clone` keeps the id, which suits snapshots of a world; use this when
    /// the copy is added to the same world as the original.
    pub fn duplicate(&self) -> Self {
        Self {
            id: EntityId::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Binding;
    use pulse_core::PulseError;
    use pulse_physics::{Position, Velocity};

    #[derive(Clone)]
    struct SetVelocity(Velocity);

    impl SetVelocity {
        fn on_update(&mut self, entity: &mut Entity) -> Result<()> {
            entity.body.velocity = self.0;
            Ok(())
        }
    }

    impl Behavior for SetVelocity {
        fn binding() -> Binding<Self> {
            Binding::inert().entity(Self::on_update)
        }
    }

    /// Copies the current velocity into the position
    #[derive(Clone)]
    struct FollowVelocity;

    impl FollowVelocity {
        fn on_update(&mut self, entity: &mut Entity) -> Result<()> {
            entity.body.position = Position::from_vector(entity.body.velocity.value);
            Ok(())
        }
    }

    impl Behavior for FollowVelocity {
        fn binding() -> Binding<Self> {
            Binding::inert().entity(Self::on_update)
        }
    }

    #[derive(Clone, Default)]
    struct Counter {
        ticks: u32,
        saw_sibling: bool,
    }

    impl Counter {
        fn on_update(&mut self, entity: &mut Entity, _dt: Seconds) -> Result<()> {
            self.ticks += 1;
            self.saw_sibling = entity.component::<SetVelocity>().is_some();
            Ok(())
        }
    }

    impl Behavior for Counter {
        fn binding() -> Binding<Self> {
            Binding::inert().timed(Self::on_update)
        }
    }

    #[derive(Clone)]
    struct Failing;

    impl Failing {
        fn on_update(&mut self, _entity: &mut Entity) -> Result<()> {
            Err(PulseError::behavior("Failing", "always fails"))
        }
    }

    impl Behavior for Failing {
        fn binding() -> Binding<Self> {
            Binding::inert().entity(Self::on_update)
        }
    }

    fn tick(entity: &mut Entity) -> Result<()> {
        entity.run_components(&EventSnapshot::new(), Seconds(0.1))
    }

    #[test]
    fn test_components_see_earlier_mutations() {
        let mut entity = Entity::new(Body::new())
            .with_component(SetVelocity(Velocity::new(3.0, 4.0)))
            .with_component(FollowVelocity);

        tick(&mut entity).unwrap();
        assert_eq!(entity.body.position, Position::new(3.0, 4.0));
    }

    #[test]
    fn test_order_is_attachment_order() {
        let mut entity = Entity::new(Body::new())
            .with_component(FollowVelocity)
            .with_component(SetVelocity(Velocity::new(3.0, 4.0)));

        tick(&mut entity).unwrap();
        // follower ran first and saw the initial zero velocity
        assert_eq!(entity.body.position, Position::ZERO);
        assert_eq!(entity.body.velocity, Velocity::new(3.0, 4.0));
    }

    #[test]
    fn test_component_state_persists_between_passes() {
        let mut entity = Entity::new(Body::new())
            .with_component(SetVelocity(Velocity::ZERO))
            .with_component(Counter::default());

        for _ in 0..3 {
            tick(&mut entity).unwrap();
        }
        let counter = entity.component::<Counter>().unwrap();
        assert_eq!(counter.ticks, 3);
        assert!(counter.saw_sibling);
    }

    #[test]
    fn test_clone_does_not_share_state() {
        let mut original = Entity::new(Body::new()).with_component(Counter::default());
        let mut copy = original.clone();

        tick(&mut copy).unwrap();
        tick(&mut copy).unwrap();
        tick(&mut original).unwrap();

        assert_eq!(original.component::<Counter>().unwrap().ticks, 1);
        assert_eq!(copy.component::<Counter>().unwrap().ticks, 2);
        assert_eq!(original.id, copy.id);
    }

    #[test]
    fn test_failure_stops_pass_and_keeps_components() {
        let mut entity = Entity::new(Body::new())
            .with_component(Failing)
            .with_component(SetVelocity(Velocity::new(1.0, 0.0)));

        let err = tick(&mut entity).unwrap_err();
        assert!(matches!(err, PulseError::BehaviorError { .. }));
        assert_eq!(entity.body.velocity, Velocity::ZERO);
        assert_eq!(entity.components().len(), 2);
        assert!(entity.component::<Failing>().is_some());
    }

    #[test]
    fn test_component_mut_lookup() {
        let mut entity = Entity::default().with_component(Counter::default());
        entity.component_mut::<Counter>().unwrap().ticks = 41;
        tick(&mut entity).unwrap();
        assert_eq!(entity.component::<Counter>().unwrap().ticks, 42);
        assert!(entity.component::<FollowVelocity>().is_none());
    }

    /// Stores a copy of its own entity the first time it runs
    #[derive(Clone, Default)]
    struct Recorder {
        copy: Option<Box<Entity>>,
    }

    impl Recorder {
        fn on_update(&mut self, entity: &mut Entity) -> Result<()> {
            if self.copy.is_none() {
                self.copy = Some(Box::new(entity.clone()));
            }
            Ok(())
        }
    }

    impl Behavior for Recorder {
        fn binding() -> Binding<Self> {
            Binding::inert().entity(Self::on_update)
        }
    }

    #[test]
    fn test_clone_taken_mid_update_still_updates() {
        let mut entity = Entity::new(Body::new())
            .with_component(Recorder::default())
            .with_component(SetVelocity(Velocity::new(2.0, 0.0)));
        tick(&mut entity).unwrap();

        let mut copy = *entity.component_mut::<Recorder>().unwrap().copy.take().unwrap();
        assert_eq!(copy.components().len(), 2);
        assert!(copy.components().iter().all(|c| c.has_update()));
        assert!(copy.component::<Recorder>().is_some());
        assert!(copy.component::<SetVelocity>().is_some());

        // the copy was taken before SetVelocity ran and still runs it
        assert_eq!(copy.body.velocity, Velocity::ZERO);
        tick(&mut copy).unwrap();
        assert_eq!(copy.body.velocity, Velocity::new(2.0, 0.0));
        assert!(copy.component::<Recorder>().unwrap().copy.is_some());
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let original = Entity::new(Body::new()).with_component(Counter::default());
        let twin = original.duplicate();
        assert_ne!(twin.id, original.id);
        assert_eq!(twin.body, original.body);
        assert!(twin.component::<Counter>().is_some());
        assert_eq!(original.clone().id, original.id);
    }
}
