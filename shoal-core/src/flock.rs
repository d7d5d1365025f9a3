use alloc::vec::Vec;

use crate::behavior::Steering;
use crate::config::validate_viewport;
use crate::target::{TargetFrame, TargetProvider};
use crate::{Boid, ConfigError, FlockConfig, Vector2D};

#[cfg(feature = "std")]
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The flock and the viewport it lives in. Owns every boid; nothing outside
/// mutates them.
#[derive(Debug, Clone)]
pub struct Flock {
    boids: Vec<Boid>,
    config: FlockConfig,
    width: f32,
    height: f32,
    frame: u64,
}

impl Flock {
    /// A flock of `count` randomly placed boids
    #[cfg(feature = "std")]
    pub fn new(width: f32, height: f32, count: usize, config: FlockConfig) -> Result<Self, ConfigError> {
        Self::with_rng(width, height, count, config, &mut rand::thread_rng())
    }

    /// Same as `new`, but reproducible for a given seed
    #[cfg(feature = "std")]
    pub fn with_seed(
        width: f32,
        height: f32,
        count: usize,
        config: FlockConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(width, height, count, config, &mut StdRng::seed_from_u64(seed))
    }

    #[cfg(feature = "std")]
    pub fn with_rng<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        count: usize,
        config: FlockConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyFlock);
        }
        config.validate()?;
        validate_viewport(width, height)?;

        let boids = (0..count)
            .map(|_| Boid::random(width, height, &config, rng))
            .collect();
        Self::from_boids(width, height, boids, config)
    }

    /// A flock from explicit boids. An empty flock is allowed and simply does
    /// nothing each frame.
    pub fn from_boids(
        width: f32,
        height: f32,
        boids: Vec<Boid>,
        config: FlockConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_viewport(width, height)?;

        log::debug!(
            "flock created: {} boids in {}x{} viewport",
            boids.len(),
            width,
            height
        );

        Ok(Self {
            boids,
            config,
            width,
            height,
            frame: 0,
        })
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of completed frames
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replace the shared parameters. Boids keep their own speed and force
    /// caps until `retune` is called.
    pub fn set_config(&mut self, config: FlockConfig) -> Result<(), ConfigError> {
        config.validate()?;
        log::debug!("flock config updated: {:?}", config);
        self.config = config;
        Ok(())
    }

    /// Push the configured caps and radius onto every boid
    pub fn retune(&mut self) {
        for boid in self.boids.iter_mut() {
            boid.max_speed = self.config.max_speed;
            boid.max_force = self.config.max_force;
            boid.radius = self.config.radius;
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        if let Err(err) = validate_viewport(width, height) {
            log::warn!("ignoring resize: {}", err);
            return Err(err);
        }
        log::debug!("viewport resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Sample the provider once and run a frame with what it returned
    pub fn step_with<P: TargetProvider + ?Sized>(&mut self, provider: &mut P) -> TargetFrame {
        let frame = provider.sample();
        self.step(&frame);
        frame
    }

    /// Run one frame.
    ///
    /// Every boid is wrapped and every force is computed against the same
    /// frozen positions before any boid integrates.
    pub fn step(&mut self, targets: &TargetFrame) {
        let (width, height, buffer) = (self.width, self.height, self.config.edge_buffer);
        for boid in self.boids.iter_mut() {
            boid.wrap_edges(width, height, buffer);
        }

        let steering = self.steering(&targets.targets, targets.idle);

        for (boid, steer) in self.boids.iter_mut().zip(steering.iter()) {
            steer.apply(boid, &self.config);
            boid.update();
        }

        self.frame += 1;
        log::trace!(
            "frame {}: {} boids, attracting: {}",
            self.frame,
            self.boids.len(),
            targets.is_attracting()
        );
    }

    #[cfg(not(feature = "parallel"))]
    fn steering(&self, targets: &[Vector2D], idle: bool) -> Vec<Steering> {
        self.boids
            .iter()
            .map(|boid| Steering::compute(boid, &self.boids, targets, idle, &self.config))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn steering(&self, targets: &[Vector2D], idle: bool) -> Vec<Steering> {
        use rayon::prelude::*;

        self.boids
            .par_iter()
            .map(|boid| Steering::compute(boid, &self.boids, targets, idle, &self.config))
            .collect()
    }
}
