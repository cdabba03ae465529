//! Render intent interpretation

use camera_capture::VideoFrame;
use dms::{RenderIntent, RenderStatus};
use tracing::{debug, info, warn};

/// Draws (or otherwise presents) the per-frame status
pub trait Renderer {
    fn render(&mut self, frame: &VideoFrame, intent: Option<RenderIntent>);
}

/// Reports status through tracing; logs status changes at `info`/`warn`
/// and every frame at `debug`
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<RenderStatus>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<RenderStatus> {
        self.last
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &VideoFrame, intent: Option<RenderIntent>) {
        let Some(intent) = intent else {
            debug!("Frame {}: no measurement", frame.sequence);
            return;
        };

        debug!(
            "Frame {}: {} (EAR {:.3})",
            frame.sequence,
            intent.status.label(),
            intent.ear
        );

        if self.last != Some(intent.status) {
            match intent.status {
                RenderStatus::Alerting => warn!("{}", intent.status.label()),
                _ => info!("{} (EAR {:.3})", intent.status.label(), intent.ear),
            }
            self.last = Some(intent.status);
        }
    }
}
