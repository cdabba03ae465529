//! Frame sources

use crate::{CameraConfig, CameraError, VideoFrame};
use std::time::Instant;
use tracing::{debug, info};

/// Anything that can hand the monitor its next frame.
///
/// Implementations block until a frame is available. An `Err` ends the
/// session.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<VideoFrame, CameraError>;
}

/// Produces blank frames at the configured resolution.
///
/// Used when landmarks come from a recording rather than a live model, so
/// the pipeline still has a frame to annotate and capture.
pub struct SyntheticSource {
    config: CameraConfig,
    limit: Option<u32>,
    sequence: u32,
    started: Instant,
}

impl SyntheticSource {
    pub fn new(config: CameraConfig) -> Self {
        info!(
            "Synthetic frame source {}x{} @ {}fps",
            config.width, config.height, config.fps
        );
        Self {
            config,
            limit: None,
            sequence: 0,
            started: Instant::now(),
        }
    }

    /// Stop after `frames` frames with `CameraError::EndOfStream`
    pub fn with_limit(mut self, frames: u32) -> Self {
        self.limit = Some(frames);
        self
    }

    /// Frames handed out so far
    pub fn frames_produced(&self) -> u32 {
        self.sequence
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<VideoFrame, CameraError> {
        if let Some(limit) = self.limit {
            if self.sequence >= limit {
                return Err(CameraError::EndOfStream(self.sequence));
            }
        }

        let timestamp_ns = self.started.elapsed().as_nanos() as u64;
        let frame = VideoFrame::blank(
            self.config.width,
            self.config.height,
            timestamp_ns,
            self.sequence,
        );
        debug!("Synthetic frame {}", self.sequence);
        self.sequence += 1;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> CameraConfig {
        CameraConfig {
            width: 4,
            height: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_frames_are_sequenced() {
        let mut source = SyntheticSource::new(small());
        let a = source.next_frame().unwrap();
        let b = source.next_frame().unwrap();
        assert_eq!(a.sequence, 0);
        assert_eq!(b.sequence, 1);
        assert_eq!((b.width, b.height), (4, 3));
        assert_eq!(source.frames_produced(), 2);
    }

    #[test]
    fn test_limit_ends_stream() {
        let mut source = SyntheticSource::new(small()).with_limit(2);
        assert!(source.next_frame().is_ok());
        assert!(source.next_frame().is_ok());
        assert!(matches!(
            source.next_frame(),
            Err(CameraError::EndOfStream(2))
        ));
    }
}
