#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking engine: boids steered by separation, alignment and cohesion, and
//! drawn towards the nearest of any number of external targets.

extern crate alloc;

pub mod behavior;
mod boid;
mod config;
mod error;
mod flock;
pub mod target;
mod vector;

pub use boid::Boid;
pub use config::{FlockConfig, AREA_PER_BOID, MAX_VIEWPORT_BOIDS, MIN_VIEWPORT_BOIDS};
pub use error::ConfigError;
pub use flock::Flock;
pub use target::{IdleTracker, StaticTargets, TargetFrame, TargetProvider, TrackedTargets};
pub use vector::Vector2D;
