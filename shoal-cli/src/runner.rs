use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use shoal_core::{Flock, FlockConfig, TargetProvider};
use shoal_shared::{FlockSettings, FrameSnapshot};

use crate::script::ScriptedTargets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub frames: u64,
    /// Write a snapshot every `every` frames
    pub every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            every: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub snapshots: u64,
    pub idle_frames: u64,
    pub attracting_frames: u64,
}

/// Read flock settings from a JSON file and validate them
pub fn load_config(path: &Path) -> Result<FlockConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let settings: FlockSettings = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    let config = FlockConfig::try_from(settings)
        .with_context(|| format!("Rejected config {}", path.display()))?;
    Ok(config)
}

/// Drive `flock` for `options.frames` frames, writing JSON line snapshots
pub fn run<W: Write>(
    flock: &mut Flock,
    targets: &mut ScriptedTargets,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunSummary> {
    let every = options.every.max(1);
    let mut summary = RunSummary::default();

    for _ in 0..options.frames {
        let frame = targets.sample();

        if let Some(viewport) = targets.take_viewport() {
            flock
                .resize(viewport.width, viewport.height)
                .context("Cued viewport rejected")?;
        }

        flock.step(&frame);
        summary.frames += 1;
        if frame.idle {
            summary.idle_frames += 1;
        }
        if frame.is_attracting() {
            summary.attracting_frames += 1;
        }

        if flock.frame() % every == 0 {
            let snapshot = FrameSnapshot::capture(flock, &frame);
            let line = snapshot.to_json().context("Failed to encode snapshot")?;
            writeln!(out, "{}", line).context("Failed to write snapshot")?;
            summary.snapshots += 1;
        }
    }

    out.flush().context("Failed to flush output")?;
    log::info!(
        "Ran {} frames ({} idle), wrote {} snapshots",
        summary.frames,
        summary.idle_frames,
        summary.snapshots
    );

    Ok(summary)
}
