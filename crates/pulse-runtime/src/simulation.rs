//! One fixed simulation step over every entity

use pulse_core::{EventSnapshot, Result};
use pulse_ecs::{Entity, World};
use pulse_physics::{integrate, Seconds};

/// Advance entities by one fixed step.
///
/// For each entity in order: run its components, integrate the body, then
/// zero the acceleration so forces never carry over into the next step. The
/// first component failure aborts the step and is returned unchanged.
pub fn step_entities(entities: &mut [Entity], input: &EventSnapshot, dt: Seconds) -> Result<()> {
    for entity in entities.iter_mut() {
        entity.run_components(input, dt)?;
        entity.body = integrate(entity.body, dt);
        entity.body.reset_acceleration();
    }
    Ok(())
}

/// Advance every entity in the world by one fixed step
pub fn step_world(world: &mut World, input: &EventSnapshot, dt: Seconds) -> Result<()> {
    log::trace!("step: {} entities, dt = {:?}", world.entity_count(), dt);
    step_entities(world.entities_mut(), input, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pulse_core::{EventLabel, PulseError};
    use pulse_ecs::{Behavior, Binding, Gravity, PlayerInput};
    use pulse_physics::{Acceleration, Body, Force, Position, Velocity, Weight};

    #[derive(Clone)]
    struct Nameplate;

    impl Behavior for Nameplate {}

    #[derive(Clone)]
    struct Thruster;

    impl Thruster {
        fn on_update(&mut self, entity: &mut Entity, input: &EventSnapshot, _dt: Seconds) -> Result<()> {
            if input.has_tag("overheat") {
                return Err(PulseError::behavior("Thruster", "overheated"));
            }
            entity.body.add_force(Force::new(1.0, 0.0));
            Ok(())
        }
    }

    impl Behavior for Thruster {
        fn binding() -> Binding<Self> {
            Binding::inert().full(Self::on_update)
        }
    }

    #[test]
    fn test_gravity_and_idle_player() {
        let t = Seconds(1.0 / 60.0);
        let g = 10.0;
        let start = Body::new()
            .with_velocity(Velocity::new(1.0, 0.0))
            .with_weight(Weight(2.0));

        let mut world = World::new();
        world.add_entity(
            Entity::new(start)
                .with_component(Gravity::new(g))
                .with_component(PlayerInput::default()),
        );
        step_world(&mut world, &EventSnapshot::new(), t).unwrap();

        let body = world.entities()[0].body;
        assert_relative_eq!(body.velocity.value.y, -g * t.count());
        assert_relative_eq!(body.velocity.value.x, 1.0);
        assert_relative_eq!(body.position.value.x, t.count());
        assert_relative_eq!(body.position.value.y, -0.5 * g * t.count() * t.count());
        assert_eq!(body.acceleration, Acceleration::ZERO);
    }

    #[test]
    fn test_player_input_moves_body() {
        let mut world = World::new();
        world.add_entity(Entity::new(Body::new()).with_component(PlayerInput::new(20.0)));

        let pressed = EventSnapshot::new().with(EventLabel::UpPressed);
        step_world(&mut world, &pressed, Seconds(0.5)).unwrap();
        assert_eq!(world.entities()[0].body.velocity, Velocity::new(0.0, 10.0));

        // still held on the next step without a new event
        step_world(&mut world, &EventSnapshot::new(), Seconds(0.5)).unwrap();
        assert_eq!(world.entities()[0].body.velocity, Velocity::new(0.0, 20.0));
    }

    #[test]
    fn test_inert_component_never_moves_body() {
        let start = Body::new().with_position(Position::new(4.0, -2.0));
        let mut world = World::new();
        world.add_entity(Entity::new(start).with_component(Nameplate));

        for _ in 0..500 {
            step_world(&mut world, &EventSnapshot::new(), Seconds(1.0 / 60.0)).unwrap();
        }
        assert_eq!(world.entities()[0].body, start);
    }

    #[test]
    fn test_force_does_not_leak_across_steps() {
        let mut world = World::new();
        world.spawn(Body::new().with_force(Force::new(2.0, 0.0)));

        step_world(&mut world, &EventSnapshot::new(), Seconds(1.0)).unwrap();
        let after_kick = world.entities()[0].body.velocity;
        assert_eq!(after_kick, Velocity::new(2.0, 0.0));

        for _ in 0..5 {
            step_world(&mut world, &EventSnapshot::new(), Seconds(1.0)).unwrap();
            assert_eq!(world.entities()[0].body.velocity, after_kick);
        }
    }

    #[test]
    fn test_failure_aborts_step() {
        let mut world = World::new();
        world.add_entity(Entity::new(Body::new()).with_component(Thruster));
        world.add_entity(Entity::new(Body::new()).with_component(Thruster));

        let overheat = EventSnapshot::new().with(pulse_core::Event::tag("overheat"));
        let err = step_world(&mut world, &overheat, Seconds(1.0)).unwrap_err();
        assert!(matches!(err, PulseError::BehaviorError { .. }));
        // nothing after the failing component was integrated
        assert!(world.entities().iter().all(|e| e.body == Body::new()));
    }
}
