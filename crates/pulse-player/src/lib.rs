//! Pulse Player - headless scene player library
//!
//! Loads scenes and input scripts from TOML and provides a render sink that
//! logs body states, for running the frame driver without a window.

pub mod scene;
pub mod script;
mod sink;

pub use scene::{load_scene, load_scene_string, BehaviorDef, EntityDef, SceneFile};
pub use script::{load_script, load_script_string, InputScript, ScriptFrame};
pub use sink::{describe, LogSink};
