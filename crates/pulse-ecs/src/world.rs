//! World - owning container for all entities

use crate::entity::Entity;
use pulse_core::EntityId;
use pulse_physics::Body;

/// Owns every entity in the simulation, in insertion order.
///
/// Entities are stored contiguously; the update and publish stages work on
/// slices handed out by [`entities`](Self::entities) and
/// [`entities_mut`](Self::entities_mut).
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. Returns the world so setup calls can be chained.
    pub fn add_entity(&mut self, entity: Entity) -> &mut Self {
        log::debug!(
            "world: added entity {} with {} component(s)",
            entity.id,
            entity.components().len()
        );
        self.entities.push(entity);
        self
    }

    /// Append a component-less entity with the given body and return its id
    pub fn spawn(&mut self, body: Body) -> EntityId {
        let entity = Entity::new(body);
        let id = entity.id;
        self.add_entity(entity);
        id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::Gravity;
    use pulse_physics::{Position, Weight};

    #[test]
    fn test_add_entity_chains_and_keeps_order() {
        let first = Entity::new(Body::new().with_position(Position::new(1.0, 0.0)));
        let second = Entity::new(Body::new().with_position(Position::new(2.0, 0.0)));
        let (first_id, second_id) = (first.id, second.id);

        let mut world = World::new();
        world.add_entity(first).add_entity(second);

        assert_eq!(world.entity_count(), 2);
        let ids: Vec<EntityId> = world.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut world = World::new();
        assert!(world.is_empty());
        let id = world.spawn(Body::new().with_weight(Weight(5.0)));

        assert_eq!(world.entity(id).unwrap().body.weight, Weight(5.0));
        world.entity_mut(id).unwrap().attach(Gravity::default());
        assert!(world.entity(id).unwrap().component::<Gravity>().is_some());
        assert!(world.entity(EntityId::from_raw(0)).is_none());
    }

    #[test]
    fn test_mutable_view() {
        let mut world = World::new();
        world.spawn(Body::new());
        world.spawn(Body::new());

        for entity in world.entities_mut() {
            entity.body.position = Position::new(9.0, 9.0);
        }
        assert!(world
            .entities()
            .iter()
            .all(|e| e.body.position == Position::new(9.0, 9.0)));
    }

    #[test]
    fn test_world_clone_is_independent() {
        let mut world = World::new();
        let id = world.spawn(Body::new());
        let snapshot = world.clone();

        world.entity_mut(id).unwrap().body.position = Position::new(1.0, 1.0);
        assert_eq!(snapshot.entity(id).unwrap().body.position, Position::ZERO);
    }
}
