use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shoal_core::{TargetFrame, TargetProvider, TrackedTargets, Vector2D};
use shoal_shared::Position;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// A change in what the tracker sees, starting at `frame`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cue {
    pub frame: u64,
    #[serde(default)]
    pub targets: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// Cues ordered by frame. Each holds until the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetScript {
    cues: Vec<Cue>,
}

impl TargetScript {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|cue| cue.frame);
        Self { cues }
    }

    /// The same targets for the whole run
    pub fn fixed(targets: Vec<Position>) -> Self {
        Self::new(vec![Cue {
            frame: 0,
            targets,
            viewport: None,
        }])
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cues: Vec<Cue> = serde_json::from_str(json).context("Invalid target script")?;
        Ok(Self::new(cues))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

/// Plays a `TargetScript` back on a simulated clock, one frame per sample
#[derive(Debug)]
pub struct ScriptedTargets {
    script: TargetScript,
    next_cue: usize,
    current: Vec<Vector2D>,
    tracked: TrackedTargets,
    frame_ms: u64,
    frame: u64,
    pending_viewport: Option<Viewport>,
}

impl ScriptedTargets {
    pub fn new(script: TargetScript, idle_timeout: Duration, frame_ms: u64) -> Self {
        Self {
            script,
            next_cue: 0,
            current: Vec::new(),
            tracked: TrackedTargets::new(idle_timeout),
            frame_ms,
            frame: 0,
            pending_viewport: None,
        }
    }

    /// Viewport change cued since the last call, if any
    pub fn take_viewport(&mut self) -> Option<Viewport> {
        self.pending_viewport.take()
    }

    fn apply_due_cues(&mut self) {
        let cues = self.script.cues();
        while let Some(cue) = cues.get(self.next_cue) {
            if cue.frame > self.frame {
                break;
            }
            self.current = cue.targets.iter().copied().map(Vector2D::from).collect();
            if cue.viewport.is_some() {
                self.pending_viewport = cue.viewport;
            }
            log::debug!("frame {}: cue with {} targets", self.frame, cue.targets.len());
            self.next_cue += 1;
        }
    }
}

impl TargetProvider for ScriptedTargets {
    fn sample(&mut self) -> TargetFrame {
        self.apply_due_cues();

        let now = Duration::from_millis(self.frame.saturating_mul(self.frame_ms));
        self.tracked.observe(now, self.current.iter().copied());
        self.frame += 1;

        self.tracked.sample()
    }
}
