//! Driver Monitoring System (DMS)
//!
//! Drowsiness detection from facial landmarks:
//! - Eye aspect ratio per eye, averaged over both eyes
//! - Debounced closed-eye counting
//! - Alert latch with pause/resume operator control
//!
//! The decision logic lives in the pure `machine::advance` function.
//! `DrowsinessMonitor` owns the state for a session and is what the I/O
//! shell drives, one frame or command at a time, from a single thread.

pub mod analysis;
pub mod config;
pub mod detector;
pub mod geometry;
pub mod landmarks;
pub mod machine;
pub mod state;

pub use analysis::{FrameAnalysis, RenderIntent, RenderStatus};
pub use config::DmsConfig;
pub use detector::{LandmarkDetector, ReplayDetector};
pub use geometry::{average_openness, compute_openness, measure_face, EyeMetrics, GeometryError};
pub use landmarks::{EyeDefinition, LandmarkPoint, LandmarkSet};
pub use machine::{advance, Action, Command, Event};
pub use state::{DetectionState, Mode};

use thiserror::Error;
use tracing::{debug, info, warn};

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("No landmarks detected")]
    NoLandmarksDetected,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Landmark recording error: {0}")]
    Replay(String),

    #[error("Landmark detection failed: {0}")]
    Detection(String),
}

/// Session-scoped drowsiness monitor
pub struct DrowsinessMonitor {
    config: DmsConfig,
    state: DetectionState,
}

impl DrowsinessMonitor {
    /// Create a new monitor with configuration
    pub fn new(config: DmsConfig) -> Result<Self, DmsError> {
        config.validate()?;
        info!(
            "Drowsiness monitor: EAR threshold {}, {} consecutive frames, pause on alert: {}",
            config.ear_threshold, config.consec_frames, config.pause_on_alert
        );
        Ok(Self {
            config,
            state: DetectionState::default(),
        })
    }

    pub fn config(&self) -> &DmsConfig {
        &self.config
    }

    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Feed one frame's detections. Only the first face is tracked.
    pub fn process_faces(&mut self, faces: &[LandmarkSet]) -> FrameAnalysis {
        let eyes = match self.measure(faces) {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                debug!("No measurement this frame: {}", e);
                None
            }
        };

        let action = self.step(Event::Frame(eyes.map(|m| m.average)));
        FrameAnalysis {
            face_detected: !faces.is_empty(),
            eyes,
            action,
            mode: self.state.mode(),
        }
    }

    /// Apply an operator command
    pub fn command(&mut self, command: Command) -> Action {
        let action = self.step(Event::Command(command));
        match action {
            Action::Paused => info!("Detection Paused."),
            Action::Resumed => info!("Detection Resumed."),
            Action::Shutdown => info!("Detection stopped by operator."),
            _ => {}
        }
        action
    }

    fn measure(&self, faces: &[LandmarkSet]) -> Result<EyeMetrics, DmsError> {
        let face = faces.first().ok_or(DmsError::NoLandmarksDetected)?;
        Ok(measure_face(face, &self.config.left_eye, &self.config.right_eye)?)
    }

    fn step(&mut self, event: Event) -> Action {
        let (next, action) = advance(self.state, event, &self.config);
        self.state = next;

        match action {
            Action::RaiseAlert { ear, capture_id } => {
                warn!("Drowsiness detected! EAR {:.3}, episode {}", ear, capture_id);
            }
            Action::MonitorLow { ear, consecutive } => {
                debug!("EAR {:.3} below threshold ({}/{})", ear, consecutive, self.config.consec_frames);
            }
            _ => {}
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 12-point face: left eye at indices 0..6, right eye at 6..12
    fn face(gap: f32) -> LandmarkSet {
        let eye = |x0: f32| {
            vec![
                LandmarkPoint::new(x0, 0.5),
                LandmarkPoint::new(x0 + 0.05, 0.5 - gap / 2.0),
                LandmarkPoint::new(x0 + 0.10, 0.5 - gap / 2.0),
                LandmarkPoint::new(x0 + 0.15, 0.5),
                LandmarkPoint::new(x0 + 0.10, 0.5 + gap / 2.0),
                LandmarkPoint::new(x0 + 0.05, 0.5 + gap / 2.0),
            ]
        };
        let mut points = eye(0.2);
        points.extend(eye(0.6));
        LandmarkSet::new(points)
    }

    fn monitor(consec_frames: u32) -> DrowsinessMonitor {
        DrowsinessMonitor::new(DmsConfig {
            consec_frames,
            left_eye: EyeDefinition([0, 1, 2, 3, 4, 5]),
            right_eye: EyeDefinition([6, 7, 8, 9, 10, 11]),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_open_face_clears() {
        let mut monitor = monitor(3);
        // gap 0.09 over width 0.15 -> EAR 0.6
        let analysis = monitor.process_faces(&[face(0.09)]);
        assert!(analysis.face_detected);
        assert!(matches!(analysis.action, Action::Clear { .. }));
        assert_eq!(analysis.render_intent().unwrap().status, RenderStatus::Awake);
    }

    #[test]
    fn test_episode_through_monitor() {
        let mut monitor = monitor(2);
        monitor.process_faces(&[face(0.01)]);
        let analysis = monitor.process_faces(&[face(0.01)]);
        assert!(analysis.raises_alert());
        assert_eq!(analysis.mode, Mode::Paused);

        let suspended = monitor.process_faces(&[face(0.01)]);
        assert_eq!(suspended.action, Action::Suspended);

        assert_eq!(monitor.command(Command::Resume), Action::Resumed);
        assert_eq!(monitor.mode(), Mode::Monitoring);
        assert_eq!(monitor.state().capture_count, 1);
    }

    #[test]
    fn test_no_face_is_no_signal() {
        let mut monitor = monitor(2);
        monitor.process_faces(&[face(0.01)]);
        let analysis = monitor.process_faces(&[]);
        assert!(!analysis.face_detected);
        assert_eq!(analysis.action, Action::NoSignal);
        assert_eq!(monitor.state().consecutive_low_frames, 1);
    }

    #[test]
    fn test_degenerate_face_is_no_signal() {
        let mut monitor = monitor(2);
        let flat = LandmarkSet::new(vec![LandmarkPoint::new(0.5, 0.5); 12]);
        let analysis = monitor.process_faces(&[flat]);
        assert!(analysis.face_detected);
        assert!(analysis.eyes.is_none());
        assert_eq!(analysis.action, Action::NoSignal);
    }

    #[test]
    fn test_only_first_face_counts() {
        let mut monitor = monitor(1);
        let analysis = monitor.process_faces(&[face(0.09), face(0.0)]);
        assert!(matches!(analysis.action, Action::Clear { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DrowsinessMonitor::new(DmsConfig {
            consec_frames: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(DmsError::Config(_))));
    }
}
