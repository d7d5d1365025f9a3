use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use shoal_cli::{load_config, run, RunOptions, ScriptedTargets, TargetScript};
use shoal_core::{Flock, FlockConfig};
use shoal_shared::Position;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flock simulation driven by tracked targets", long_about = None)]
struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Number of boids (defaults to one per 800 square pixels, clamped to 300..=700)
    #[arg(short, long)]
    agents: Option<usize>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seed for reproducible initial placement
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated time per frame in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Time without targets before the flock goes idle, in milliseconds
    #[arg(long, default_value_t = 3000)]
    idle_timeout_ms: u64,

    /// JSON file with flock settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON target script: [{"frame": 0, "targets": [{"x": .., "y": ..}]}, ...]
    #[arg(short, long, conflicts_with = "target")]
    script: Option<PathBuf>,

    /// Fixed target as x,y (repeat for more targets)
    #[arg(short, long, value_parser = parse_target)]
    target: Vec<Position>,

    /// Write a snapshot every N frames
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// Output file for JSON line snapshots (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_target(value: &str) -> Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", value))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x: {}", e))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y: {}", e))?;
    Ok(Position::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FlockConfig::default(),
    };

    let agents = args
        .agents
        .unwrap_or_else(|| FlockConfig::agent_count_for_viewport(args.width, args.height));

    log::info!("Shoal starting...");
    log::info!("Viewport: {}x{}", args.width, args.height);
    log::info!("Boids: {}", agents);

    let mut flock = match args.seed {
        Some(seed) => Flock::with_seed(args.width, args.height, agents, config, seed),
        None => Flock::new(args.width, args.height, agents, config),
    }
    .context("Failed to initialize flock")?;

    let script = match &args.script {
        Some(path) => TargetScript::load(path)?,
        None => TargetScript::fixed(args.target.clone()),
    };
    log::debug!("Target script: {} cues", script.cues().len());

    let mut targets = ScriptedTargets::new(
        script,
        Duration::from_millis(args.idle_timeout_ms),
        args.frame_ms,
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let options = RunOptions {
        frames: args.frames,
        every: args.every,
    };

    let started = Instant::now();
    let summary = run(&mut flock, &mut targets, &options, &mut out).context("Simulation error")?;

    let elapsed = started.elapsed();
    if summary.frames > 0 {
        log::info!(
            "Average frame time: {:.2}ms",
            elapsed.as_secs_f64() * 1000.0 / summary.frames as f64
        );
    }

    Ok(())
}
