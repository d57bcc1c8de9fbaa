//! Pulse Runtime - Frame loop infrastructure
//!
//! Provides the building blocks that drive a world through time:
//! - `GameClock` - fixed-timestep accumulator
//! - `SimConfig` - driver settings loaded from TOML
//! - `step_world` - one fixed step over every entity
//! - `BodyPublisher` / `BodyHandle` - whole-body publication to readers
//! - `FrameDriver` - polls input, steps, publishes and paces each frame

mod clock;
mod config;
mod driver;
mod publish;
mod simulation;

pub use clock::GameClock;
pub use config::SimConfig;
pub use driver::{
    FrameDriver, FrameInfo, FrameOutcome, FrameTimer, InputSource, NullSink, RenderSink,
    RunSummary, ScriptedInput, SystemTimer,
};
pub use publish::{BodyHandle, BodyPublisher};
pub use simulation::{step_entities, step_world};
