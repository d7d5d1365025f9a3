//! The steering rules. Each function reads the neighbourhood and returns a
//! force without touching any boid, so a whole frame's forces can be computed
//! before anything moves.
//!
//! A neighbour counts when its distance `d` satisfies `0 < d < radius`. The
//! lower bound drops the boid itself (and anything sitting exactly on it).

use crate::{Boid, FlockConfig, Vector2D};

/// Push away from neighbours inside `separation_distance`, each weighted by
/// the inverse of its distance
pub fn separation<'a, I>(boid: &Boid, others: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.separation_distance {
            let diff = (boid.position - other.position).normalize() / distance;
            steering += diff;
            count += 1;
        }
    }

    if count > 0 {
        steering = steering / count as f32;
    }

    if steering.magnitude() > 0.0 {
        steering = steering.set_mag(boid.max_speed) - boid.velocity;
        steering = steering.limit(boid.max_force);
    }

    steering
}

/// Steer towards the average heading of neighbours inside `alignment_distance`
pub fn alignment<'a, I>(boid: &Boid, others: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.alignment_distance {
            sum += other.velocity;
            count += 1;
        }
    }

    if count > 0 {
        let desired = (sum / count as f32).set_mag(boid.max_speed);
        (desired - boid.velocity).limit(boid.max_force)
    } else {
        Vector2D::zero()
    }
}

/// Seek the centre of mass of neighbours inside `cohesion_distance`
pub fn cohesion<'a, I>(boid: &Boid, others: I, config: &FlockConfig) -> Vector2D
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.cohesion_distance {
            sum += other.position;
            count += 1;
        }
    }

    if count > 0 {
        boid.seek(sum / count as f32)
    } else {
        Vector2D::zero()
    }
}

/// Distance used to rank targets. Non-finite distances rank last.
fn target_distance(position: Vector2D, target: &Vector2D) -> f32 {
    let distance = position.distance(target);
    if distance.is_finite() {
        distance
    } else {
        f32::INFINITY
    }
}

/// The target closest to `position`. Ties go to the earliest target in the
/// list.
pub fn nearest_target(position: Vector2D, targets: &[Vector2D]) -> Option<Vector2D> {
    let (first, rest) = targets.split_first()?;
    let mut closest = *first;
    let mut closest_distance = target_distance(position, first);

    for target in rest {
        let distance = target_distance(position, target);
        if distance < closest_distance {
            closest_distance = distance;
            closest = *target;
        }
    }

    Some(closest)
}

/// Seek the nearest target, scaled by `attraction_scale`. Zero when idle or
/// when there is nothing to seek.
pub fn attraction(boid: &Boid, targets: &[Vector2D], idle: bool, config: &FlockConfig) -> Vector2D {
    if idle {
        return Vector2D::zero();
    }

    match nearest_target(boid.position, targets) {
        Some(target) => boid.seek(target) * config.attraction_scale,
        None => Vector2D::zero(),
    }
}

/// The four unweighted steering contributions for one boid in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub attraction: Vector2D,
}

impl Steering {
    pub fn compute(
        boid: &Boid,
        flock: &[Boid],
        targets: &[Vector2D],
        idle: bool,
        config: &FlockConfig,
    ) -> Self {
        Self {
            separation: separation(boid, flock, config),
            alignment: alignment(boid, flock, config),
            cohesion: cohesion(boid, flock, config),
            attraction: attraction(boid, targets, idle, config),
        }
    }

    /// Apply each weighted contribution in a fixed order so the float sums
    /// come out the same on every run
    pub fn apply(&self, boid: &mut Boid, config: &FlockConfig) {
        boid.apply_force(self.separation * config.separation_weight);
        boid.apply_force(self.alignment * config.alignment_weight);
        boid.apply_force(self.cohesion * config.cohesion_weight);
        boid.apply_force(self.attraction * config.attraction_weight);
    }
}
