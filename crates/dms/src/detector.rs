//! Landmark detection seam
//!
//! The face-mesh model runs outside this crate. Anything that turns a
//! frame into landmark sets implements `LandmarkDetector`; `ReplayDetector`
//! plays back a recorded landmark stream so sessions can be reproduced
//! without a camera or model.

use crate::landmarks::{LandmarkPoint, LandmarkSet};
use crate::DmsError;
use camera_capture::VideoFrame;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Produces zero or more faces' landmarks for a frame
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>, DmsError>;
}

/// One line of a landmark recording
#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    faces: Vec<Vec<(f32, f32)>>,
}

/// Plays back a JSON-lines landmark recording, one frame per line:
///
/// ```text
/// {"faces": [[[0.41, 0.52], [0.43, 0.50], ...]]}
/// {"faces": []}
/// ```
pub struct ReplayDetector {
    frames: Vec<Vec<Vec<LandmarkPoint>>>,
    cursor: usize,
}

impl ReplayDetector {
    /// Load a recording from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DmsError> {
        let path = path.as_ref();
        info!("Loading landmark recording from {}", path.display());
        let file = File::open(path)
            .map_err(|e| DmsError::Replay(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a recording from any buffered reader. Blank lines are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, DmsError> {
        let mut frames = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| DmsError::Replay(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let recorded: RecordedFrame = serde_json::from_str(&line)
                .map_err(|e| DmsError::Replay(format!("line {}: {}", lineno + 1, e)))?;
            frames.push(
                recorded
                    .faces
                    .into_iter()
                    .map(|face| face.into_iter().map(LandmarkPoint::from).collect())
                    .collect(),
            );
        }
        info!("Landmark recording holds {} frames", frames.len());
        Ok(Self { frames, cursor: 0 })
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>, DmsError> {
        let Some(faces) = self.frames.get(self.cursor) else {
            debug!("Recording exhausted at frame {}", frame.sequence);
            return Ok(Vec::new());
        };
        self.cursor += 1;

        Ok(faces
            .iter()
            .map(|points| LandmarkSet::new(points.clone()).with_frame_size(frame.width, frame.height))
            .collect())
    }
}
