use thiserror::Error;

/// Rejected simulation parameters. Raised at construction or reconfiguration,
/// never from inside a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("initial speed range {min}..={max} is empty or exceeds the speed cap")]
    InvalidSpeedRange { min: f32, max: f32 },

    #[error("viewport must have positive finite size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("a flock needs at least one boid at startup")]
    EmptyFlock,
}
