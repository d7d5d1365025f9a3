use std::time::Duration;

use shoal_core::{Flock, FlockConfig, TargetFrame, TrackedTargets, Vector2D};
use shoal_shared::{FrameSnapshot, PalmLandmark};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log_str(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        console_log_str(&format_args!($($t)*).to_string());
        #[cfg(not(target_arch = "wasm32"))]
        log::info!($($t)*);
    }};
}

fn millis(now_ms: f64) -> Duration {
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or_default()
}

/// The flock as seen from a browser render loop. JavaScript feeds tracker
/// output and a clock, steps once per animation frame and reads back flat
/// buffers to draw from.
#[wasm_bindgen]
pub struct ShoalSimulation {
    flock: Flock,
    tracked: TrackedTargets,
    last_frame: TargetFrame,
}

#[wasm_bindgen]
impl ShoalSimulation {
    /// `boid_count` defaults to the viewport-sized population. A `seed`
    /// makes the initial placement reproducible.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        boid_count: Option<usize>,
        seed: Option<u64>,
    ) -> Result<ShoalSimulation, JsError> {
        let count =
            boid_count.unwrap_or_else(|| FlockConfig::agent_count_for_viewport(width, height));
        console_log!("Initializing shoal with {} boids", count);

        let config = FlockConfig::default();
        let flock = match seed {
            Some(seed) => Flock::with_seed(width, height, count, config, seed)?,
            None => Flock::new(width, height, count, config)?,
        };

        Ok(ShoalSimulation {
            flock,
            tracked: TrackedTargets::default(),
            last_frame: TargetFrame::default(),
        })
    }

    /// Targets in screen pixels as a flat `[x0, y0, x1, y1, ...]` list.
    /// An empty list means no hands were seen at `now_ms`.
    pub fn observe_targets(&mut self, now_ms: f64, coords: &[f32]) {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Vector2D::new(pair[0], pair[1]));
        self.tracked.observe(millis(now_ms), points);
    }

    /// Palm centres normalised to the camera image, flat `[x0, y0, ...]`.
    /// They are mirrored and scaled onto the current viewport.
    pub fn observe_palms(&mut self, now_ms: f64, landmarks: &[f32]) {
        let (width, height) = (self.flock.width(), self.flock.height());
        let points = landmarks.chunks_exact(2).map(|pair| {
            let palm = PalmLandmark {
                x: pair[0],
                y: pair[1],
            };
            Vector2D::from(palm.to_screen(width, height))
        });
        self.tracked.observe(millis(now_ms), points);
    }

    /// Advance the clock without a new tracker result
    pub fn tick(&mut self, now_ms: f64) {
        self.tracked.tick(millis(now_ms));
    }

    pub fn step(&mut self) {
        self.last_frame = self.flock.step_with(&mut self.tracked);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
        self.flock.resize(width, height)?;
        console_log!("Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn boid_count(&self) -> usize {
        self.flock.len()
    }

    pub fn frame(&self) -> f64 {
        self.flock.frame() as f64
    }

    pub fn is_idle(&self) -> bool {
        self.last_frame.idle
    }

    /// Flat `[x0, y0, x1, y1, ...]` boid positions
    pub fn positions(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| [boid.position.x, boid.position.y])
            .collect()
    }

    /// Flat `[vx0, vy0, ...]` boid velocities
    pub fn velocities(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| [boid.velocity.x, boid.velocity.y])
            .collect()
    }

    pub fn headings(&self) -> Vec<f32> {
        self.flock.boids().iter().map(|boid| boid.heading()).collect()
    }

    /// Targets from the last step, flat, empty while idle
    pub fn targets(&self) -> Vec<f32> {
        if self.last_frame.idle {
            return Vec::new();
        }
        self.last_frame
            .targets
            .iter()
            .flat_map(|target| [target.x, target.y])
            .collect()
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(FrameSnapshot::capture(&self.flock, &self.last_frame).to_json()?)
    }

    pub fn set_separation_weight(&mut self, weight: f32) -> Result<(), JsError> {
        self.update_config(|config| config.separation_weight = weight)
    }

    pub fn set_alignment_weight(&mut self, weight: f32) -> Result<(), JsError> {
        self.update_config(|config| config.alignment_weight = weight)
    }

    pub fn set_cohesion_weight(&mut self, weight: f32) -> Result<(), JsError> {
        self.update_config(|config| config.cohesion_weight = weight)
    }

    pub fn set_max_speed(&mut self, speed: f32) -> Result<(), JsError> {
        self.update_config(|config| {
            config.max_speed = speed;
            config.min_initial_speed = config.min_initial_speed.min(speed);
            config.max_initial_speed = config.max_initial_speed.min(speed);
        })?;
        self.flock.retune();
        Ok(())
    }

    pub fn set_max_force(&mut self, force: f32) -> Result<(), JsError> {
        self.update_config(|config| config.max_force = force)?;
        self.flock.retune();
        Ok(())
    }
}

impl ShoalSimulation {
    fn update_config(&mut self, edit: impl FnOnce(&mut FlockConfig)) -> Result<(), JsError> {
        let mut config = *self.flock.config();
        edit(&mut config);
        self.flock.set_config(config)?;
        Ok(())
    }
}
