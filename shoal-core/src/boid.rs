use crate::{FlockConfig, Vector2D};

#[cfg(feature = "std")]
use rand::Rng;

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Forces accumulated for the current frame, cleared by `update`
    pub acceleration: Vector2D,
    pub max_speed: f32,
    pub max_force: f32,
    pub radius: f32,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D, config: &FlockConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            max_speed: config.max_speed,
            max_force: config.max_force,
            radius: config.radius,
        }
    }

    /// A boid somewhere inside the viewport, heading in a random direction
    /// at a speed drawn from the configured initial range
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        config: &FlockConfig,
        rng: &mut R,
    ) -> Self {
        let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let heading = rng.gen_range(0.0..core::f32::consts::TAU);
        let speed = rng.gen_range(config.min_initial_speed..=config.max_initial_speed);
        Self::new(position, Vector2D::from_angle(heading) * speed, config)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Integrate one frame. Position moves with the velocity from the previous
    /// frame before the accumulated forces are folded into velocity.
    pub fn update(&mut self) {
        self.position += self.velocity;
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.acceleration = Vector2D::zero();
    }

    /// Steering force towards `target`, capped at `max_force`
    pub fn seek(&self, target: Vector2D) -> Vector2D {
        let desired = (target - self.position).set_mag(self.max_speed);
        (desired - self.velocity).limit(self.max_force)
    }

    /// Toroidal wrap: leaving past `buffer` on one side re-enters on the other
    pub fn wrap_edges(&mut self, width: f32, height: f32, buffer: f32) {
        if self.position.x > width + buffer {
            self.position.x = -buffer;
        } else if self.position.x < -buffer {
            self.position.x = width + buffer;
        }

        if self.position.y > height + buffer {
            self.position.y = -buffer;
        } else if self.position.y < -buffer {
            self.position.y = height + buffer;
        }
    }

    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }
}
