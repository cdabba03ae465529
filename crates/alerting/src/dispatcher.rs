//! Effect dispatcher

use crate::sinks::{AlarmSink, BellAlarm, CaptureSink, CommandAlarm, JpegCapture};
use camera_capture::VideoFrame;
use dms::Action;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Alert side-effect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// External alarm player command line; terminal bell when unset
    pub alarm_command: Option<String>,
    /// Directory evidence captures are written to
    pub capture_dir: PathBuf,
    /// Capture file name prefix, followed by `_<id>.jpg`
    pub capture_prefix: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            alarm_command: None,
            capture_dir: PathBuf::from("."),
            capture_prefix: "drowsy_capture".to_string(),
        }
    }
}

/// Outcome of one alert's side effects
#[derive(Debug, Default)]
pub struct EffectReport {
    pub alarm_played: bool,
    pub capture_path: Option<PathBuf>,
}

/// Runs the alarm and capture for each alert edge.
///
/// The two effects are independent: an alarm failure does not skip the
/// capture and neither failure is returned to the caller.
pub struct EffectDispatcher {
    alarm: Box<dyn AlarmSink>,
    capture: Box<dyn CaptureSink>,
    fire_count: u32,
    alarm_failures: u32,
    capture_failures: u32,
}

impl EffectDispatcher {
    pub fn new(alarm: Box<dyn AlarmSink>, capture: Box<dyn CaptureSink>) -> Self {
        Self {
            alarm,
            capture,
            fire_count: 0,
            alarm_failures: 0,
            capture_failures: 0,
        }
    }

    /// Build the default sinks from configuration
    pub fn from_config(config: &AlertConfig) -> Self {
        info!("Creating effect dispatcher with config: {:?}", config);
        let alarm: Box<dyn AlarmSink> = match config
            .alarm_command
            .as_deref()
            .and_then(CommandAlarm::from_command_line)
        {
            Some(command) => Box::new(command),
            None => Box::new(BellAlarm),
        };
        let capture = JpegCapture::new(&config.capture_dir, &config.capture_prefix);
        Self::new(alarm, Box::new(capture))
    }

    /// Interpret an action. Only `RaiseAlert` has side effects; everything
    /// else returns `None`.
    pub fn dispatch(&mut self, action: &Action, frame: &VideoFrame) -> Option<EffectReport> {
        match *action {
            Action::RaiseAlert { capture_id, .. } => Some(self.fire(frame, capture_id)),
            _ => None,
        }
    }

    fn fire(&mut self, frame: &VideoFrame, capture_id: u32) -> EffectReport {
        self.fire_count += 1;
        let mut report = EffectReport::default();

        match self.alarm.play() {
            Ok(()) => report.alarm_played = true,
            Err(e) => {
                self.alarm_failures += 1;
                warn!("{}", e);
            }
        }

        match self.capture.capture(frame, capture_id) {
            Ok(path) => {
                warn!("Drowsiness alert {} evidence: {}", capture_id, path.display());
                report.capture_path = Some(path);
            }
            Err(e) => {
                self.capture_failures += 1;
                warn!("{}", e);
            }
        }

        report
    }

    /// Alerts dispatched so far
    pub fn fire_count(&self) -> u32 {
        self.fire_count
    }

    pub fn alarm_failures(&self) -> u32 {
        self.alarm_failures
    }

    pub fn capture_failures(&self) -> u32 {
        self.capture_failures
    }
}
