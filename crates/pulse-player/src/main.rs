//! Pulse Player - headless scene player binary
//!
//! Runs a scene through the fixed-timestep frame driver, feeding it an input
//! script and logging body states as it goes.
//!
//! Usage:
//!   pulse-player <scene.toml> [--script FILE] [--config FILE] [--frames N]
//!                [--report-every N] [--no-pacing]

use anyhow::{Context, Result};
use clap::Parser;
use pulse_core::EventSnapshot;
use pulse_player::{describe, load_scene, load_script, LogSink};
use pulse_runtime::{FrameDriver, InputSource, SimConfig};

#[derive(Parser)]
#[command(name = "pulse-player")]
#[command(about = "Pulse scene player - run a scene headless with scripted input")]
struct Args {
    /// Path to scene file
    scene: String,

    /// Input script; without one every frame has no events
    #[arg(long)]
    script: Option<String>,

    /// Simulation config file
    #[arg(long)]
    config: Option<String>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Log body states every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Run frames back to back instead of sleeping to the timestep
    #[arg(long)]
    no_pacing: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path).context("Failed to load config")?,
        None => SimConfig::default(),
    };
    if args.frames.is_some() {
        config.max_frames = args.frames;
    }
    if args.no_pacing {
        config.pace_frames = false;
    }

    let (world, scene_file) = load_scene(&args.scene).context("Failed to load scene")?;

    let mut input: Box<dyn InputSource> = match &args.script {
        Some(path) => {
            let script = load_script(path).context("Failed to load input script")?;
            Box::new(script.to_input().context("Invalid input script")?)
        }
        None => {
            if config.max_frames.is_none() {
                log::warn!("No input script or frame limit; running until interrupted");
            }
            Box::new(|| -> pulse_core::Result<EventSnapshot> { Ok(EventSnapshot::new()) })
        }
    };

    let mut driver = FrameDriver::new(world, &config).context("Failed to start frame driver")?;
    let mut sink = LogSink::new(driver.subscribe(), &scene_file.entity_names(), args.report_every);

    let summary = driver
        .run(input.as_mut(), &mut sink)
        .context("Simulation stopped with an error")?;

    println!("Scene: {}", scene_file.scene.name);
    println!(
        "Frames: {}  Steps: {}  Ended by: {}",
        summary.frames,
        summary.steps,
        if summary.exited { "exit event" } else { "frame limit" }
    );
    for (name, body) in sink.snapshot()? {
        println!("  {name}: {}", describe(&body));
    }

    Ok(())
}
