//! Drowsiness decision engine
//!
//! `advance` is a pure function of the previous state, one event and the
//! configuration. It returns the next state and an `Action` describing
//! what the I/O shell should do; rendering, the alarm and evidence capture
//! are interpreters of that action and never feed back into the state.

use crate::config::DmsConfig;
use crate::state::DetectionState;
use serde::{Deserialize, Serialize};

/// Operator commands, accepted in every mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Pause,
    Resume,
    Quit,
}

/// Input to one step of the machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A processed frame: `Some(ear)` when both eyes were measured,
    /// `None` when the frame had no face or degenerate geometry
    Frame(Option<f32>),
    Command(Command),
}

/// What the shell should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Eyes open; debounce reset
    Clear { ear: f32 },

    /// Below threshold but not for long enough yet
    MonitorLow { ear: f32, consecutive: u32 },

    /// Start of an episode: play the alarm and capture evidence, once
    RaiseAlert { ear: f32, capture_id: u32 },

    /// Alert already latched; keep the visual escalation only
    SustainAlert { ear: f32, consecutive: u32 },

    /// Frame carried no measurement
    NoSignal,

    /// Frame arrived while paused and was ignored
    Suspended,

    Paused,
    Resumed,

    /// Operator quit; the session is over
    Shutdown,

    /// Input after shutdown, ignored
    Terminated,
}

impl Action {
    /// True for the one action per episode that triggers side effects
    pub fn is_alert_edge(&self) -> bool {
        matches!(self, Action::RaiseAlert { .. })
    }
}

/// Advance the machine by one event.
pub fn advance(state: DetectionState, event: Event, config: &DmsConfig) -> (DetectionState, Action) {
    if state.terminated {
        return (state, Action::Terminated);
    }

    match event {
        Event::Command(command) => apply_command(state, command),
        Event::Frame(_) if state.paused => (state, Action::Suspended),
        Event::Frame(None) => (state, Action::NoSignal),
        Event::Frame(Some(ear)) => apply_measurement(state, ear, config),
    }
}

fn apply_command(mut state: DetectionState, command: Command) -> (DetectionState, Action) {
    match command {
        Command::Pause => {
            state.paused = true;
            (state, Action::Paused)
        }
        Command::Resume => {
            state.paused = false;
            state.alert_active = false;
            state.consecutive_low_frames = 0;
            (state, Action::Resumed)
        }
        Command::Quit => {
            state.terminated = true;
            (state, Action::Shutdown)
        }
    }
}

fn apply_measurement(mut state: DetectionState, ear: f32, config: &DmsConfig) -> (DetectionState, Action) {
    if ear >= config.ear_threshold {
        state.consecutive_low_frames = 0;
        state.alert_active = false;
        return (state, Action::Clear { ear });
    }

    state.consecutive_low_frames = state.consecutive_low_frames.saturating_add(1);
    let consecutive = state.consecutive_low_frames;

    if consecutive < config.consec_frames {
        (state, Action::MonitorLow { ear, consecutive })
    } else if !state.alert_active {
        state.alert_active = true;
        state.capture_count += 1;
        if config.pause_on_alert {
            state.paused = true;
        }
        (
            state,
            Action::RaiseAlert {
                ear,
                capture_id: state.capture_count,
            },
        )
    } else {
        (state, Action::SustainAlert { ear, consecutive })
    }
}
