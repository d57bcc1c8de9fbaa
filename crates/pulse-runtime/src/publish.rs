//! Body state publication for render consumers
//!
//! The simulation owns a [`BodyPublisher`] and is the only writer. Readers,
//! possibly on other threads, hold [`BodyHandle`]s that can only load. Every
//! load returns a whole `Body` as stored by one publish; fields from different
//! publishes are never mixed.

use crossbeam::atomic::AtomicCell;
use pulse_core::EntityId;
use pulse_ecs::World;
use pulse_physics::Body;
use std::sync::{Arc, Weak};

type BodyCell = AtomicCell<Body>;

/// Single writer of the published body states, one cell per entity
#[derive(Debug, Default)]
pub struct BodyPublisher {
    cells: Vec<(EntityId, Arc<BodyCell>)>,
}

impl BodyPublisher {
    /// Create cells for every entity currently in the world
    pub fn new(world: &World) -> Self {
        let mut publisher = Self::default();
        publisher.publish(world);
        publisher
    }

    /// Store the current body of every entity. Entities appended to the world
    /// since the last publish get new cells.
    pub fn publish(&mut self, world: &World) {
        for (index, entity) in world.entities().iter().enumerate() {
            match self.cells.get(index) {
                Some((_, cell)) => cell.store(entity.body),
                None => self
                    .cells
                    .push((entity.id, Arc::new(AtomicCell::new(entity.body)))),
            }
        }
    }

    /// Read handles for every published entity, in world order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.cells
            .iter()
            .map(|(id, cell)| BodyHandle {
                id: *id,
                cell: Arc::downgrade(cell),
            })
            .collect()
    }

    pub fn handle(&self, id: EntityId) -> Option<BodyHandle> {
        self.cells
            .iter()
            .find(|(entity_id, _)| *entity_id == id)
            .map(|(id, cell)| BodyHandle {
                id: *id,
                cell: Arc::downgrade(cell),
            })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read-only view of one entity's published body
#[derive(Debug, Clone)]
pub struct BodyHandle {
    id: EntityId,
    cell: Weak<BodyCell>,
}

impl BodyHandle {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The latest published body, or `None` once the publisher is gone
    pub fn load(&self) -> Option<Body> {
        self.cell.upgrade().map(|cell| cell.load())
    }
}
