//! Camera Capture Library for the Drowsiness Monitor
//!
//! Frame acquisition is an external collaborator. This crate defines the
//! seam the monitor pulls frames through:
//! - `VideoFrame`, the decoded RGB frame handed to the landmark detector
//! - `FrameSource`, implemented by real camera drivers
//! - `SyntheticSource`, blank frames for replay and tests

pub mod frame;
pub mod source;

pub use frame::VideoFrame;
pub use source::{FrameSource, SyntheticSource};

use thiserror::Error;

/// Camera error types
///
/// Every variant is an acquisition failure: the session cannot continue
/// without frames and shuts down.
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open camera: {0}")]
    Open(String),

    #[error("Streaming error: {0}")]
    Stream(String),

    #[error("End of stream after {0} frames")]
    EndOfStream(u32),

    #[error("Camera not initialized")]
    NotInitialized,
}

/// Camera configuration
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Device path (e.g., "/dev/video0")
    pub device: String,
    /// Capture width
    pub width: u32,
    /// Capture height
    pub height: u32,
    /// Target FPS
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

impl CameraConfig {
    /// Frame period implied by the target FPS
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}
