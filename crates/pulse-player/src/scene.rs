//! Scene loading from TOML files
//!
//! ```toml
//! [scene]
//! name = "Falling crate"
//!
//! [[entities]]
//! name = "crate"
//! position = [0.0, 10.0]
//! weight = 2.0
//!
//! [[entities.behaviors]]
//! type = "gravity"
//! g = 9.81
//! ```
//!
//! Entities and their behaviors are kept in file order, which is also the
//! order they update in.

use pulse_core::{EntityId, PulseError, Result, Vector2D};
use pulse_ecs::{Entity, Gravity, PlayerInput, World};
use pulse_physics::{Body, Position, Velocity, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Root structure of a scene TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

/// Scene metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Definition of an entity in a scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default = "default_dimension")]
    pub dimension: [f64; 2],
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub behaviors: Vec<BehaviorDef>,
}

fn default_dimension() -> [f64; 2] {
    [1.0, 1.0]
}

fn default_weight() -> f64 {
    1.0
}

/// A stock behavior and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviorDef {
    Gravity(Gravity),
    PlayerInput(PlayerInput),
}

impl Default for EntityDef {
    fn default() -> Self {
        Self {
            name: None,
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            dimension: default_dimension(),
            weight: default_weight(),
            behaviors: Vec::new(),
        }
    }
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorDef) -> Self {
        self.behaviors.push(behavior);
        self
    }

    fn body(&self) -> Body {
        Body::new()
            .with_position(Position::from_vector(Vector2D::from_array(self.position)))
            .with_velocity(Velocity::from_vector(Vector2D::from_array(self.velocity)))
            .with_dimension(Vector2D::from_array(self.dimension))
            .with_weight(Weight(self.weight))
    }

    /// Build the runtime entity with its behaviors attached in order
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::new(self.body());
        for behavior in &self.behaviors {
            match behavior {
                BehaviorDef::Gravity(gravity) => entity.attach(*gravity),
                BehaviorDef::PlayerInput(input) => entity.attach(input.clone()),
            };
        }
        entity
    }
}

impl SceneFile {
    /// Create a new scene file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneMetadata {
                name: name.into(),
                description: None,
            },
            entities: Vec::new(),
        }
    }

    /// Add an entity to the end of the scene
    pub fn add_entity(&mut self, entity: EntityDef) {
        self.entities.push(entity);
    }

    /// Display names in entity order. Unnamed entities get `entity<index>`.
    pub fn entity_names(&self) -> Vec<String> {
        self.entities
            .iter()
            .enumerate()
            .map(|(index, def)| def.name.clone().unwrap_or_else(|| format!("entity{index}")))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, def) in self.entities.iter().enumerate() {
            let label = def.name.clone().unwrap_or_else(|| format!("entity{index}"));
            if let Some(name) = &def.name {
                if !seen.insert(name.as_str()) {
                    return Err(PulseError::SceneError(format!("duplicate entity name '{name}'")));
                }
            }
            if !def.weight.is_finite() || def.weight <= 0.0 {
                return Err(PulseError::SceneError(format!(
                    "entity '{label}': weight must be positive, got {}",
                    def.weight
                )));
            }
            let mut coords = def.position.iter().chain(&def.velocity).chain(&def.dimension);
            if coords.any(|v| !v.is_finite()) {
                return Err(PulseError::SceneError(format!(
                    "entity '{label}': non-finite body value"
                )));
            }
        }
        Ok(())
    }

    /// Build a world holding one entity per definition, in file order
    pub fn build_world(&self) -> Result<(World, Vec<EntityId>)> {
        self.validate()?;
        let mut world = World::new();
        let mut ids = Vec::with_capacity(self.entities.len());
        for def in &self.entities {
            let entity = def.to_entity();
            ids.push(entity.id);
            world.add_entity(entity);
        }
        Ok((world, ids))
    }
}

/// Load a scene from a TOML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(World, SceneFile)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let loaded = load_scene_string(&content)?;
    log::info!(
        "Loaded scene '{}' from {} ({} entities)",
        loaded.1.scene.name,
        path.display(),
        loaded.0.entity_count()
    );
    Ok(loaded)
}

/// Load a scene from a TOML string
pub fn load_scene_string(content: &str) -> Result<(World, SceneFile)> {
    let scene_file: SceneFile = toml::from_str(content)?;
    let (world, _) = scene_file.build_world()?;
    Ok((world, scene_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_ecs::UpdateShape;

    const FALLING: &str = r#"
[scene]
name = "Falling"

[[entities]]
name = "crate"
position = [0, 10]
weight = 2.0

[[entities.behaviors]]
type = "gravity"
g = 9.81

[[entities]]
name = "ship"
velocity = [1.5, 0.0]

[[entities.behaviors]]
type = "player_input"
input_force = 35.0

[[entities.behaviors]]
type = "gravity"
"#;

    #[test]
    fn test_load_scene_string() {
        let (world, scene) = load_scene_string(FALLING).unwrap();
        assert_eq!(scene.scene.name, "Falling");
        assert_eq!(world.entity_count(), 2);
        assert_eq!(scene.entity_names(), vec!["crate", "ship"]);

        let crate_entity = &world.entities()[0];
        assert_eq!(crate_entity.body.position, Position::new(0.0, 10.0));
        assert_eq!(crate_entity.body.weight, Weight(2.0));
        assert_eq!(crate_entity.body.dimension, Vector2D::ONE);
        assert_eq!(crate_entity.component::<Gravity>(), Some(&Gravity::new(9.81)));
    }

    #[test]
    fn test_behaviors_keep_file_order() {
        let (world, _) = load_scene_string(FALLING).unwrap();
        let ship = &world.entities()[1];
        let shapes: Vec<UpdateShape> = ship.components().iter().map(|c| c.shape()).collect();
        assert_eq!(shapes, vec![UpdateShape::Input, UpdateShape::EntityOnly]);
        assert_eq!(ship.component::<PlayerInput>().unwrap().input_force, 35.0);
        // omitted parameters fall back to the behavior defaults
        assert_eq!(ship.component::<Gravity>(), Some(&Gravity::default()));
    }

    #[test]
    fn test_empty_scene() {
        let (world, scene) = load_scene_string("[scene]\nname = \"Empty\"\n").unwrap();
        assert!(world.is_empty());
        assert!(scene.entities.is_empty());
    }

    #[test]
    fn test_unknown_behavior_is_a_parse_error() {
        let toml_str = r#"
[scene]
name = "Bad"

[[entities]]
[[entities.behaviors]]
type = "levitate"
"#;
        let err = load_scene_string(toml_str).unwrap_err();
        assert!(matches!(err, PulseError::TomlParseError(_)));
    }

    #[test]
    fn test_rejects_bad_weight() {
        let toml_str = "[scene]\nname = \"Bad\"\n\n[[entities]]\nweight = 0.0\n";
        let err = load_scene_string(toml_str).unwrap_err();
        assert!(matches!(err, PulseError::SceneError(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut scene = SceneFile::new("Twins");
        scene.add_entity(EntityDef::new("a"));
        scene.add_entity(EntityDef::new("a"));
        assert!(matches!(scene.build_world(), Err(PulseError::SceneError(_))));
    }

    #[test]
    fn test_scene_file_round_trips_through_toml() {
        let mut scene = SceneFile::new("Built");
        scene.add_entity(
            EntityDef::new("lander")
                .with_position(3.0, -1.0)
                .with_behavior(BehaviorDef::Gravity(Gravity::new(1.6))),
        );
        let toml_str = toml::to_string_pretty(&scene).unwrap();
        let (world, parsed) = load_scene_string(&toml_str).unwrap();
        assert_eq!(parsed.entities[0].behaviors, scene.entities[0].behaviors);
        assert_eq!(world.entities()[0].body.position, Position::new(3.0, -1.0));
    }

    #[test]
    fn test_build_world_returns_ids_in_order() {
        let (_, scene) = load_scene_string(FALLING).unwrap();
        let (world, ids) = scene.build_world().unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(world.entities()[1].id, ids[1]);
        assert!(world.entity(ids[0]).is_some());
    }

    #[test]
    fn test_demo_scene_loads() {
        let (world, scene) = load_scene_string(include_str!("../../../demos/falling.toml")).unwrap();
        assert_eq!(world.entity_count(), 2);
        assert!(scene.scene.description.is_some());
    }

    fn demo_path(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
    }

    #[test]
    fn test_load_scene_from_file() {
        let (world, scene) = load_scene(demo_path("falling.toml")).unwrap();
        assert_eq!(world.entity_count(), 2);
        assert_eq!(scene.entities.len(), 2);
    }

    #[test]
    fn test_missing_scene_file_is_an_io_error() {
        let err = load_scene(demo_path("no-such-scene.toml")).unwrap_err();
        assert!(matches!(err, PulseError::IoError(_)));
    }
}
