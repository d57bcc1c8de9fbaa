//! Fixed-timestep frame driver
//!
//! Each frame: poll one input snapshot, stop on `exit`, run as many whole
//! fixed steps as the accumulated wall time allows (all with the same
//! snapshot), publish body states, present, then pace the frame and credit
//! the measured wall time back to the clock.

use crate::clock::GameClock;
use crate::config::SimConfig;
use crate::publish::{BodyHandle, BodyPublisher};
use crate::simulation::step_world;
use pulse_core::{EventLabel, EventSnapshot, Result};
use pulse_ecs::World;
use pulse_physics::Seconds;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Supplies one input snapshot per frame
pub trait InputSource {
    fn poll(&mut self) -> Result<EventSnapshot>;
}

impl<F> InputSource for F
where
    F: FnMut() -> Result<EventSnapshot>,
{
    fn poll(&mut self) -> Result<EventSnapshot> {
        self()
    }
}

/// Called once per frame after body states are published
pub trait RenderSink {
    fn present(&mut self, frame: &FrameInfo) -> Result<()>;
}

impl<F> RenderSink for F
where
    F: FnMut(&FrameInfo) -> Result<()>,
{
    fn present(&mut self, frame: &FrameInfo) -> Result<()> {
        self(frame)
    }
}

/// A sink that presents nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &FrameInfo) -> Result<()> {
        Ok(())
    }
}

/// Wall-clock source used for frame pacing
pub trait FrameTimer {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Real time: `Instant::now` and `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimer;

impl FrameTimer for SystemTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Replays a fixed list of snapshots, then reports `exit` forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<EventSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = EventSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames left before the script starts reporting `exit`
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<EventSnapshot> {
        Ok(self
            .frames
            .pop_front()
            .unwrap_or_else(|| EventSnapshot::new().with(EventLabel::Exit)))
    }
}

/// What a render sink learns about the frame it presents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// 1-based frame number
    pub frame: u64,
    /// Fixed steps run during this frame
    pub steps: u32,
    /// Fixed steps run since the driver started
    pub total_steps: u64,
    /// Leftover accumulator as a fraction of one timestep
    pub interpolation_alpha: f64,
}

/// Result of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue { steps: u32 },
    Exit,
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    /// True when the run ended on an `exit` event rather than `max_frames`
    pub exited: bool,
}

/// Owns the world and drives it frame by frame
pub struct FrameDriver<T: FrameTimer = SystemTimer> {
    world: World,
    clock: GameClock,
    publisher: BodyPublisher,
    timer: T,
    frame_duration: Duration,
    pace_frames: bool,
    max_frames: Option<u64>,
    frames: u64,
}

impl FrameDriver<SystemTimer> {
    pub fn new(world: World, config: &SimConfig) -> Result<Self> {
        Self::with_timer(world, config, SystemTimer)
    }
}

impl<T: FrameTimer> FrameDriver<T> {
    /// Build a driver around an initial world. The config is validated here.
    pub fn with_timer(world: World, config: &SimConfig, timer: T) -> Result<Self> {
        config.validate()?;
        let clock = config.clock();
        let frame_duration = clock.fixed_timestep.to_duration().unwrap_or_default();
        let publisher = BodyPublisher::new(&world);
        Ok(Self {
            world,
            clock,
            publisher,
            timer,
            frame_duration,
            pace_frames: config.pace_frames,
            max_frames: config.max_frames,
            frames: 0,
        })
    }

    /// Read handles for the published body of every entity
    pub fn subscribe(&self) -> Vec<BodyHandle> {
        self.publisher.handles()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Run one frame
    pub fn run_frame<I, R>(&mut self, input: &mut I, sink: &mut R) -> Result<FrameOutcome>
    where
        I: InputSource + ?Sized,
        R: RenderSink + ?Sized,
    {
        let frame_start = self.timer.now();

        let snapshot = input.poll()?;
        if snapshot.has(EventLabel::Exit) {
            log::info!("Exit requested at frame {}", self.frames + 1);
            return Ok(FrameOutcome::Exit);
        }

        let mut steps = 0u32;
        while self.clock.should_step() {
            step_world(&mut self.world, &snapshot, self.clock.fixed_timestep)?;
            self.clock.consume_step();
            steps += 1;
        }

        self.publisher.publish(&self.world);
        self.frames += 1;
        sink.present(&FrameInfo {
            frame: self.frames,
            steps,
            total_steps: self.clock.steps(),
            interpolation_alpha: self.clock.interpolation_alpha(),
        })?;

        if self.pace_frames {
            let busy = self.timer.now().saturating_duration_since(frame_start);
            if busy < self.frame_duration {
                self.timer.sleep(self.frame_duration - busy);
            }
        }
        let elapsed = self.timer.now().saturating_duration_since(frame_start);
        self.clock.add_elapsed(Seconds::from(elapsed));

        Ok(FrameOutcome::Continue { steps })
    }

    /// Run frames until an `exit` event, `max_frames`, or the first error
    pub fn run<I, R>(&mut self, input: &mut I, sink: &mut R) -> Result<RunSummary>
    where
        I: InputSource + ?Sized,
        R: RenderSink + ?Sized,
    {
        log::info!(
            "Starting frame driver: {} entities, timestep {:.4}s",
            self.world.entity_count(),
            self.clock.fixed_timestep.count()
        );

        let exited = loop {
            if let Some(max) = self.max_frames {
                if self.frames >= max {
                    break false;
                }
            }
            if self.run_frame(input, sink)? == FrameOutcome::Exit {
                break true;
            }
        };

        let summary = RunSummary {
            frames: self.frames,
            steps: self.clock.steps(),
            exited,
        };
        log::info!(
            "Frame driver stopped after {} frames, {} steps",
            summary.frames,
            summary.steps
        );
        Ok(summary)
    }
}
