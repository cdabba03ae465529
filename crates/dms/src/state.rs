//! Driver state tracking

use serde::{Deserialize, Serialize};

/// Coarse mode derived from the detection flags.
///
/// `Paused` supersedes the others: while paused no frame moves the
/// machine, whatever the alert latch says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Monitoring,
    Alerting,
    Paused,
    Terminated,
}

/// Everything the drowsiness machine remembers between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionState {
    /// Consecutive measured frames with EAR below threshold
    pub consecutive_low_frames: u32,

    /// Latched from alert raise until the next resume
    pub alert_active: bool,

    /// Frame processing suspended
    pub paused: bool,

    /// Alerts raised this session; the id of the latest evidence capture
    pub capture_count: u32,

    /// Session ended by the operator
    pub terminated: bool,
}

impl DetectionState {
    pub fn mode(&self) -> Mode {
        if self.terminated {
            Mode::Terminated
        } else if self.paused {
            Mode::Paused
        } else if self.alert_active {
            Mode::Alerting
        } else {
            Mode::Monitoring
        }
    }

    /// True while frames should be fed to the machine
    pub fn is_processing(&self) -> bool {
        !self.paused && !self.terminated
    }
}
