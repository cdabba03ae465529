//! Drowsiness Monitor
//!
//! Wires the decision engine to its collaborators: frame source, landmark
//! detector, renderer, alarm and evidence capture, and the operator's
//! keyboard.

pub mod commands;
pub mod render;
pub mod session;
pub mod settings;

pub use render::{LogRenderer, Renderer};
pub use session::{Session, SessionEnd, SessionSummary};
pub use settings::{Settings, SettingsError};

use settings::LogSettings;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(log: &LogSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = Level::from_str(&log.level).unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
