//! Headless driver for the flock engine: plays back scripted tracker targets
//! on a simulated clock and emits per-frame snapshots as JSON lines.

pub mod runner;
pub mod script;

pub use runner::{load_config, run, RunOptions, RunSummary};
pub use script::{Cue, ScriptedTargets, TargetScript, Viewport};
