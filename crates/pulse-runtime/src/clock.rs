//! Game clock with fixed-timestep accumulator

use pulse_physics::Seconds;

/// Accumulates wall time and hands it out in whole fixed timesteps
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: Seconds,
    /// Upper bound on the wall time credited per frame, if any
    pub max_frame_time: Option<Seconds>,
    /// Total wall time credited so far
    total_time: Seconds,
    /// Credited time not yet consumed by fixed steps
    accumulator: Seconds,
    /// Fixed steps consumed so far
    steps: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            fixed_timestep: Seconds(1.0 / 60.0),
            max_frame_time: None,
            total_time: Seconds::ZERO,
            accumulator: Seconds::ZERO,
            steps: 0,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: Seconds(1.0 / hz),
            ..Self::default()
        }
    }

    /// Create a game clock with an explicit timestep and optional per-frame clamp
    pub fn with_settings(fixed_timestep: Seconds, max_frame_time: Option<Seconds>) -> Self {
        Self {
            fixed_timestep,
            max_frame_time,
            ..Self::default()
        }
    }

    /// Credit wall time measured for a frame. With `max_frame_time` set, one
    /// long stall cannot queue an unbounded number of steps.
    pub fn add_elapsed(&mut self, elapsed: Seconds) {
        let elapsed = match self.max_frame_time {
            Some(max) if elapsed > max => max,
            _ => elapsed,
        };
        self.total_time += elapsed;
        self.accumulator += elapsed;
    }

    /// True while the accumulator strictly exceeds one fixed timestep
    pub fn should_step(&self) -> bool {
        self.accumulator > self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_step(&mut self) {
        self.accumulator = self.accumulator - self.fixed_timestep;
        self.steps += 1;
    }

    /// Get the interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator.count() / self.fixed_timestep.count()
    }

    pub fn accumulator(&self) -> Seconds {
        self.accumulator
    }

    pub fn total_time(&self) -> Seconds {
        self.total_time
    }

    /// Simulated time advanced so far
    pub fn simulated_time(&self) -> Seconds {
        self.fixed_timestep * self.steps as f64
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
