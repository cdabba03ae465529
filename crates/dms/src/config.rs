//! DMS configuration

use crate::landmarks::EyeDefinition;
use crate::DmsError;
use serde::{Deserialize, Serialize};

/// DMS configuration, fixed for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DmsConfig {
    /// EAR below this counts as a closed-eye frame
    pub ear_threshold: f32,

    /// Consecutive closed-eye frames before an alert is raised
    pub consec_frames: u32,

    /// Suspend processing right after an alert until the operator resumes
    pub pause_on_alert: bool,

    /// Landmark indices of the left eye
    pub left_eye: EyeDefinition,

    /// Landmark indices of the right eye
    pub right_eye: EyeDefinition,
}

impl Default for DmsConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            consec_frames: 20,
            pause_on_alert: true,
            left_eye: EyeDefinition::LEFT,
            right_eye: EyeDefinition::RIGHT,
        }
    }
}

impl DmsConfig {
    /// Create strict config (alerts sooner)
    pub fn strict() -> Self {
        Self {
            ear_threshold: 0.27,
            consec_frames: 12,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer closures)
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.22,
            consec_frames: 30,
            ..Default::default()
        }
    }

    /// Reject values the machine cannot work with
    pub fn validate(&self) -> Result<(), DmsError> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err(DmsError::Config(format!(
                "ear_threshold must be a positive number, got {}",
                self.ear_threshold
            )));
        }
        if self.consec_frames == 0 {
            return Err(DmsError::Config("consec_frames must be at least 1".into()));
        }
        Ok(())
    }
}
