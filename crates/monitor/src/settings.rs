//! Session settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `DROWSY__*` environment variables
//! (e.g. `DROWSY__DMS__CONSEC_FRAMES=15`).

use alerting::AlertConfig;
use camera_capture::CameraConfig;
use config::{Config, ConfigError, Environment, File};
use dms::{DmsConfig, DmsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default settings file, read when present
pub const DEFAULT_SETTINGS_FILE: &str = "drowsiness.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error(transparent)]
    Invalid(#[from] DmsError),
}

/// Logging output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Frame geometry of the capture device
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = CameraConfig::default();
        Self {
            device: camera.device,
            width: camera.width,
            height: camera.height,
            fps: camera.fps,
        }
    }
}

impl From<&CameraSettings> for CameraConfig {
    fn from(s: &CameraSettings) -> Self {
        CameraConfig {
            device: s.device.clone(),
            width: s.width,
            height: s.height,
            fps: s.fps,
        }
    }
}

/// Landmark recording to play back instead of a live model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// JSON-lines landmark recording
    pub path: Option<PathBuf>,
    /// Pace playback at the camera frame rate
    pub realtime: bool,
}

/// Everything fixed at session start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dms: DmsConfig,
    pub alerts: AlertConfig,
    pub camera: CameraSettings,
    pub replay: ReplaySettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; without one the
    /// default file is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("DROWSY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.dms.validate()?;
        Ok(())
    }
}
