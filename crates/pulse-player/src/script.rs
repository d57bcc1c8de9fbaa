//! Scripted input loaded from TOML files
//!
//! ```toml
//! [[frames]]
//! events = ["up_pressed"]
//!
//! [[frames]]
//! repeat = 30
//!
//! [[frames]]
//! events = ["up_released", "exit"]
//! ```
//!
//! Each entry is the snapshot for one frame, repeated `repeat` times. Names
//! that are not event labels become free-form tags.

use pulse_core::{Event, EventSnapshot, PulseError, Result};
use pulse_runtime::ScriptedInput;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on the expanded frame count of one script
pub const MAX_SCRIPT_FRAMES: u64 = 1_000_000;

/// Root structure of an input script TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub frames: Vec<ScriptFrame>,
}

/// One snapshot and how many consecutive frames it is used for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl ScriptFrame {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            repeat: 1,
        }
    }

    pub fn repeated(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScriptFrame) -> &mut Self {
        self.frames.push(frame);
        self
    }

    /// Number of frames once repeats are expanded
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.frames.iter().position(|f| f.repeat == 0) {
            return Err(PulseError::ScriptError(format!(
                "frame entry {index} has repeat = 0"
            )));
        }
        let total = self.frame_count();
        if total > MAX_SCRIPT_FRAMES {
            return Err(PulseError::ScriptError(format!(
                "script expands to {total} frames, limit is {MAX_SCRIPT_FRAMES}"
            )));
        }
        Ok(())
    }

    /// Expand repeats into one snapshot per frame
    pub fn snapshots(&self) -> Vec<EventSnapshot> {
        self.frames
            .iter()
            .flat_map(|frame| {
                let snapshot: EventSnapshot = frame.events.iter().cloned().collect();
                std::iter::repeat(snapshot).take(frame.repeat as usize)
            })
            .collect()
    }

    /// An input source replaying this script, then reporting `exit`
    pub fn to_input(&self) -> Result<ScriptedInput> {
        self.validate()?;
        Ok(ScriptedInput::new(self.snapshots()))
    }
}

/// Load an input script from a TOML file
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<InputScript> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let script = load_script_string(&content)?;
    log::info!(
        "Loaded input script from {} ({} frames)",
        path.display(),
        script.frame_count()
    );
    Ok(script)
}

/// Load an input script from a TOML string
pub fn load_script_string(content: &str) -> Result<InputScript> {
    let script: InputScript = toml::from_str(content)?;
    script.validate()?;
    Ok(script)
}
