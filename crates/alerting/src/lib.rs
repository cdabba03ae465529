//! Alerting System
//!
//! Interprets drowsiness actions into side effects: the alarm sound and
//! the evidence capture. Each effect is isolated; a failure is logged and
//! never reaches the decision engine.

mod dispatcher;
mod sinks;

pub use dispatcher::{AlertConfig, EffectDispatcher, EffectReport};
pub use sinks::{AlarmSink, BellAlarm, CaptureSink, CommandAlarm, JpegCapture};

use thiserror::Error;

/// Side-effect failures. Recoverable; never fatal to the session.
#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Alarm playback failed: {0}")]
    Alarm(String),

    #[error("Evidence capture failed: {0}")]
    Capture(String),
}
