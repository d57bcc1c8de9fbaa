//! Simulation configuration loaded from TOML

use crate::clock::GameClock;
use pulse_core::{PulseError, Result};
use pulse_physics::Seconds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Frame driver settings. Every field has a default, so an empty file is valid.
///
/// ```toml
/// fixed_timestep_hz = 60.0
/// max_frame_time = 0.25
/// clamp_frame_time = false
/// max_frames = 600
/// pace_frames = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulation steps per simulated second
    pub fixed_timestep_hz: f64,
    /// Longest wall time, in seconds, credited to the accumulator per frame
    pub max_frame_time: f64,
    /// Whether `max_frame_time` is applied at all. Off by default, so every
    /// frame credits its full wall time.
    pub clamp_frame_time: bool,
    /// Stop after this many frames even without an exit event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
    /// Sleep out the rest of each frame that finishes early
    pub pace_frames: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep_hz: 60.0,
            max_frame_time: 0.25,
            clamp_frame_time: false,
            max_frames: None,
            pace_frames: true,
        }
    }
}

impl SimConfig {
    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fixed_timestep_hz.is_finite() || self.fixed_timestep_hz <= 0.0 {
            return Err(PulseError::ConfigError(format!(
                "fixed_timestep_hz must be a positive number, got {}",
                self.fixed_timestep_hz
            )));
        }
        if self.clamp_frame_time && !(self.max_frame_time > 0.0) {
            return Err(PulseError::ConfigError(format!(
                "max_frame_time must be positive, got {}",
                self.max_frame_time
            )));
        }
        Ok(())
    }

    pub fn fixed_timestep(&self) -> Seconds {
        Seconds(1.0 / self.fixed_timestep_hz)
    }

    /// A clock configured with this timestep and clamp
    pub fn clock(&self) -> GameClock {
        GameClock::with_settings(
            self.fixed_timestep(),
            self.clamp_frame_time.then_some(Seconds(self.max_frame_time)),
        )
    }
}
