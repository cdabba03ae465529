//! DMS analysis results and render intents

use crate::geometry::EyeMetrics;
use crate::machine::Action;
use crate::state::Mode;
use serde::{Deserialize, Serialize};

/// On-frame status the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStatus {
    /// "Awake - Monitoring"
    Awake,
    /// Eyes below threshold, debounce still running
    LowNotYetAlerting,
    /// "DROWSINESS ALERT!"
    Alerting,
}

impl RenderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Awake => "Awake - Monitoring",
            Self::LowNotYetAlerting => "Eyes closing",
            Self::Alerting => "DROWSINESS ALERT!",
        }
    }
}

/// Annotation request for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderIntent {
    pub status: RenderStatus,
    pub ear: f32,
}

impl Action {
    /// Annotation for frame-derived actions; `None` for commands and
    /// frames that carried no measurement
    pub fn render_intent(&self) -> Option<RenderIntent> {
        let (status, ear) = match *self {
            Action::Clear { ear } => (RenderStatus::Awake, ear),
            Action::MonitorLow { ear, .. } => (RenderStatus::LowNotYetAlerting, ear),
            Action::RaiseAlert { ear, .. } | Action::SustainAlert { ear, .. } => {
                (RenderStatus::Alerting, ear)
            }
            _ => return None,
        };
        Some(RenderIntent { status, ear })
    }
}

/// Complete result of feeding one frame's detections to the monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether any face was detected
    pub face_detected: bool,

    /// Eye openness for the tracked face, when measurable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<EyeMetrics>,

    /// Decision for this frame
    pub action: Action,

    /// Mode after the decision
    pub mode: Mode,
}

impl FrameAnalysis {
    pub fn render_intent(&self) -> Option<RenderIntent> {
        self.action.render_intent()
    }

    /// Alarm and capture should fire for this frame
    pub fn raises_alert(&self) -> bool {
        self.action.is_alert_edge()
    }
}
