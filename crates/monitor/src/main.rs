//! Drowsiness Monitor - Main Entry Point
//!
//! Usage: `drowsiness-monitor [settings.toml]`

use alerting::EffectDispatcher;
use anyhow::{anyhow, bail, Context};
use camera_capture::{CameraConfig, SyntheticSource};
use dms::{DrowsinessMonitor, ReplayDetector};
use monitor::commands::stdin_commands;
use monitor::{init_logging, LogRenderer, Session, SessionEnd, Settings};
use std::path::PathBuf;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref()).context("loading settings")?;
    init_logging(&settings.log).map_err(|e| anyhow!("initializing logging: {}", e))?;

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let Some(recording) = settings.replay.path.as_ref() else {
        bail!("no landmark source configured; set replay.path to a landmark recording");
    };

    let detector = ReplayDetector::open(recording)?;
    let camera = CameraConfig::from(&settings.camera);
    let source = SyntheticSource::new(camera.clone()).with_limit(detector.len() as u32);

    let monitor = DrowsinessMonitor::new(settings.dms.clone())?;
    let effects = EffectDispatcher::from_config(&settings.alerts);

    let mut session = Session::new(
        source,
        detector,
        monitor,
        effects,
        LogRenderer::new(),
        stdin_commands(),
    );
    if settings.replay.realtime {
        session = session.with_pacing(camera.frame_interval());
    }

    let summary = session.run().await;
    match summary.ended_by {
        SessionEnd::AcquisitionFailure(reason) => info!("Frame source closed: {}", reason),
        SessionEnd::Operator => info!("Stopped by operator"),
    }

    Ok(())
}
