//! Alarm and capture sinks

use crate::EffectError;
use camera_capture::VideoFrame;
use image::ImageFormat;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info};

/// Plays the alarm sound. Must not block on playback.
pub trait AlarmSink {
    fn play(&mut self) -> Result<(), EffectError>;
}

/// Persists the frame that triggered an alert
pub trait CaptureSink {
    /// Store `frame` as evidence number `capture_id`; returns where it went
    fn capture(&mut self, frame: &VideoFrame, capture_id: u32) -> Result<PathBuf, EffectError>;
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct BellAlarm;

impl AlarmSink for BellAlarm {
    fn play(&mut self) -> Result<(), EffectError> {
        let mut out = std::io::stdout().lock();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| EffectError::Alarm(e.to_string()))
    }
}

/// Spawns an external player, e.g. `aplay alarm.wav`, without waiting for it
#[derive(Debug)]
pub struct CommandAlarm {
    program: String,
    args: Vec<String>,
    playing: Option<Child>,
}

impl CommandAlarm {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            playing: None,
        }
    }

    /// Build from a whitespace-separated command line
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    /// Reap the previous player if it has finished
    fn reap(&mut self) {
        if let Some(child) = self.playing.as_mut() {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!("Alarm player exited with {}", status);
                    self.playing = None;
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("Alarm player status unavailable: {}", e);
                    self.playing = None;
                }
            }
        }
    }
}

impl AlarmSink for CommandAlarm {
    fn play(&mut self) -> Result<(), EffectError> {
        self.reap();
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| EffectError::Alarm(format!("{}: {}", self.program, e)))?;
        debug!("Alarm player started (pid {})", child.id());
        self.playing = Some(child);
        Ok(())
    }
}

/// Writes captures as `<dir>/<prefix>_<id>.jpg`
#[derive(Debug, Clone)]
pub struct JpegCapture {
    dir: PathBuf,
    prefix: String,
}

impl JpegCapture {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn path_for(&self, capture_id: u32) -> PathBuf {
        self.dir.join(format!("{}_{}.jpg", self.prefix, capture_id))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CaptureSink for JpegCapture {
    fn capture(&mut self, frame: &VideoFrame, capture_id: u32) -> Result<PathBuf, EffectError> {
        let img = frame.to_rgb_image().ok_or_else(|| {
            EffectError::Capture(format!(
                "frame data does not match {}x{}",
                frame.width, frame.height
            ))
        })?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| EffectError::Capture(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.path_for(capture_id);
        img.save_with_format(&path, ImageFormat::Jpeg)
            .map_err(|e| EffectError::Capture(format!("{}: {}", path.display(), e)))?;

        info!("Saved: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_capture_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JpegCapture::new(dir.path().join("captures"), "drowsy_capture");
        let frame = VideoFrame::blank(16, 12, 0, 0);

        let first = sink.capture(&frame, 1).unwrap();
        let second = sink.capture(&frame, 2).unwrap();

        assert!(first.ends_with("drowsy_capture_1.jpg"));
        assert!(second.ends_with("drowsy_capture_2.jpg"));
        assert!(first.exists());
        assert!(second.exists());

        let decoded = image::open(&first).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
    }

    #[test]
    fn test_capture_rejects_malformed_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JpegCapture::new(dir.path(), "drowsy_capture");
        let frame = VideoFrame::new(vec![0; 3], 16, 12, 0, 0);
        assert!(matches!(
            sink.capture(&frame, 1),
            Err(EffectError::Capture(_))
        ));
    }

    #[test]
    fn test_command_alarm_parse() {
        let alarm = CommandAlarm::from_command_line("aplay -q alarm.wav").unwrap();
        assert_eq!(alarm.program, "aplay");
        assert_eq!(alarm.args, vec!["-q", "alarm.wav"]);
        assert!(CommandAlarm::from_command_line("   ").is_none());
    }

    #[test]
    fn test_missing_player_is_an_alarm_error() {
        let mut alarm = CommandAlarm::new("/nonexistent/alarm-player", vec![]);
        assert!(matches!(alarm.play(), Err(EffectError::Alarm(_))));
    }
}
