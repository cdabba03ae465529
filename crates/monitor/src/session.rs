//! Monitoring session loop
//!
//! One cycle: acquire frame → detect landmarks → advance the monitor →
//! render → dispatch side effects → poll operator commands. Cycles run
//! strictly one after another on the calling task.

use crate::render::Renderer;
use alerting::EffectDispatcher;
use camera_capture::FrameSource;
use dms::{Command, DrowsinessMonitor, LandmarkDetector, Mode};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{error, info, warn};

/// Why a session stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Operator quit, or paused with no command source left to resume
    Operator,
    /// The frame source failed or ran dry
    AcquisitionFailure(String),
}

/// What happened over a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub alerts_raised: u32,
    pub ended_by: SessionEnd,
}

pub struct Session<S, D, R> {
    source: S,
    detector: D,
    monitor: DrowsinessMonitor,
    effects: EffectDispatcher,
    renderer: R,
    commands: mpsc::UnboundedReceiver<Command>,
    commands_open: bool,
    pacing: Option<Duration>,
}

impl<S, D, R> Session<S, D, R>
where
    S: FrameSource,
    D: LandmarkDetector,
    R: Renderer,
{
    pub fn new(
        source: S,
        detector: D,
        monitor: DrowsinessMonitor,
        effects: EffectDispatcher,
        renderer: R,
        commands: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        Self {
            source,
            detector,
            monitor,
            effects,
            renderer,
            commands,
            commands_open: true,
            pacing: None,
        }
    }

    /// Sleep this long between frames (replay at camera speed)
    pub fn with_pacing(mut self, interval: Duration) -> Self {
        self.pacing = Some(interval);
        self
    }

    pub fn monitor(&self) -> &DrowsinessMonitor {
        &self.monitor
    }

    /// Run until the operator quits or acquisition fails
    pub async fn run(&mut self) -> SessionSummary {
        info!("Starting monitoring. Press 'q' to quit, 'p' to pause, 'r' to resume.");
        let mut frames_processed = 0u64;

        let ended_by = loop {
            if self.monitor.mode() == Mode::Terminated {
                break SessionEnd::Operator;
            }

            if !self.monitor.state().is_processing() {
                if !self.wait_for_command().await {
                    info!("Paused with no command source; ending session");
                    break SessionEnd::Operator;
                }
                continue;
            }

            let frame = match self.source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!("Frame acquisition failed: {}", e);
                    break SessionEnd::AcquisitionFailure(e.to_string());
                }
            };

            let faces = self.detector.detect(&frame).unwrap_or_else(|e| {
                warn!("Landmark detection failed on frame {}: {}", frame.sequence, e);
                Vec::new()
            });

            let analysis = self.monitor.process_faces(&faces);
            self.renderer.render(&frame, analysis.render_intent());
            self.effects.dispatch(&analysis.action, &frame);
            frames_processed += 1;

            self.drain_commands();

            match self.pacing {
                Some(interval) => tokio::time::sleep(interval).await,
                None => tokio::task::yield_now().await,
            }
        };

        let summary = SessionSummary {
            frames_processed,
            alerts_raised: self.monitor.state().capture_count,
            ended_by,
        };
        info!(
            "Session ended: {} frames, {} alerts ({:?})",
            summary.frames_processed, summary.alerts_raised, summary.ended_by
        );
        summary
    }

    /// Apply every command already queued, without blocking
    fn drain_commands(&mut self) {
        while self.commands_open {
            match self.commands.try_recv() {
                Ok(command) => {
                    self.monitor.command(command);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.commands_open = false,
            }
        }
    }

    /// Block until the operator sends something. Returns false when no
    /// command can ever arrive.
    async fn wait_for_command(&mut self) -> bool {
        if !self.commands_open {
            return false;
        }
        match self.commands.recv().await {
            Some(command) => {
                self.monitor.command(command);
                true
            }
            None => {
                self.commands_open = false;
                false
            }
        }
    }
}
