//! Headless render sink that logs published body states

use pulse_core::{PulseError, Result};
use pulse_physics::Body;
use pulse_runtime::{BodyHandle, FrameInfo, RenderSink};

/// Logs every tracked body once every `report_every` frames.
/// A `report_every` of zero never reports.
pub struct LogSink {
    bodies: Vec<(String, BodyHandle)>,
    report_every: u64,
    reports: u64,
}

impl LogSink {
    /// Pair each handle with a display name. Handles without a name are
    /// labelled by their entity id.
    pub fn new(handles: Vec<BodyHandle>, names: &[String], report_every: u64) -> Self {
        let bodies = handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                let name = names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| handle.id().to_string());
                (name, handle)
            })
            .collect();
        Self {
            bodies,
            report_every,
            reports: 0,
        }
    }

    /// Frames reported so far
    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Latest published body of every tracked entity
    pub fn snapshot(&self) -> Result<Vec<(&str, Body)>> {
        self.bodies
            .iter()
            .map(|(name, handle)| {
                handle.load().map(|body| (name.as_str(), body)).ok_or_else(|| {
                    PulseError::RenderError(format!("body of '{name}' is no longer published"))
                })
            })
            .collect()
    }
}

/// One-line summary of a body for logs
pub fn describe(body: &Body) -> String {
    let p = body.position.value;
    let v = body.velocity.value;
    format!("pos ({:.3}, {:.3}) vel ({:.3}, {:.3})", p.x, p.y, v.x, v.y)
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &FrameInfo) -> Result<()> {
        if self.report_every == 0 || frame.frame % self.report_every != 0 {
            return Ok(());
        }
        for (name, body) in self.snapshot()? {
            log::info!("[frame {} | step {}] {}: {}", frame.frame, frame.total_steps, name, describe(&body));
        }
        self.reports += 1;
        Ok(())
    }
}
