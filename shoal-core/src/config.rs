use crate::ConfigError;

/// Screen area each boid gets when the population is sized from the viewport
pub const AREA_PER_BOID: f32 = 800.0;
pub const MIN_VIEWPORT_BOIDS: usize = 300;
pub const MAX_VIEWPORT_BOIDS: usize = 700;

/// Configuration for the flock simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub max_speed: f32,
    pub max_force: f32,
    /// Drawing size hint, unused by the physics
    pub radius: f32,
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Multiplier baked into the attraction steer before it is weighted
    pub attraction_scale: f32,
    pub attraction_weight: f32,
    /// Distance past the viewport edge before a boid wraps around
    pub edge_buffer: f32,
    pub min_initial_speed: f32,
    pub max_initial_speed: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            max_force: 0.2,
            radius: 4.0,
            separation_distance: 25.0,
            alignment_distance: 50.0,
            cohesion_distance: 50.0,
            separation_weight: 2.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            attraction_scale: 1.5,
            attraction_weight: 1.0,
            edge_buffer: 20.0,
            min_initial_speed: 4.0,
            max_initial_speed: 6.0,
        }
    }
}

impl FlockConfig {
    /// Check every parameter is finite and non-negative, and that the initial
    /// speed range fits under the speed cap
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("radius", self.radius),
            ("separation_distance", self.separation_distance),
            ("alignment_distance", self.alignment_distance),
            ("cohesion_distance", self.cohesion_distance),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("attraction_scale", self.attraction_scale),
            ("attraction_weight", self.attraction_weight),
            ("edge_buffer", self.edge_buffer),
            ("min_initial_speed", self.min_initial_speed),
            ("max_initial_speed", self.max_initial_speed),
        ];

        for (name, value) in params {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        if self.min_initial_speed > self.max_initial_speed
            || self.max_initial_speed > self.max_speed
        {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.min_initial_speed,
                max: self.max_initial_speed,
            });
        }

        Ok(())
    }

    /// Population for a viewport: one boid per `AREA_PER_BOID` square pixels,
    /// clamped to `MIN_VIEWPORT_BOIDS..=MAX_VIEWPORT_BOIDS`
    pub fn agent_count_for_viewport(width: f32, height: f32) -> usize {
        let area = (width * height).max(0.0);
        let count = (area / AREA_PER_BOID) as usize;
        count.clamp(MIN_VIEWPORT_BOIDS, MAX_VIEWPORT_BOIDS)
    }
}

pub(crate) fn validate_viewport(width: f32, height: f32) -> Result<(), ConfigError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FlockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.separation_weight, 2.0);
        assert_eq!(config.attraction_scale, 1.5);
    }

    #[test]
    fn test_negative_max_speed_rejected() {
        let config = FlockConfig {
            max_speed: -1.0,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "max_speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_nan_force_rejected() {
        let config = FlockConfig {
            max_force: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "max_force", .. })
        ));
    }

    #[test]
    fn test_initial_speed_range_checked() {
        let inverted = FlockConfig {
            min_initial_speed: 5.0,
            max_initial_speed: 4.0,
            ..FlockConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));

        let too_fast = FlockConfig {
            max_initial_speed: 10.0,
            ..FlockConfig::default()
        };
        assert!(too_fast.validate().is_err());
    }

    #[test]
    fn test_agent_count_for_viewport() {
        assert_eq!(FlockConfig::agent_count_for_viewport(100.0, 100.0), 300);
        assert_eq!(FlockConfig::agent_count_for_viewport(800.0, 400.0), 400);
        assert_eq!(FlockConfig::agent_count_for_viewport(1920.0, 1080.0), 700);
    }

    #[test]
    fn test_viewport_validation() {
        assert!(validate_viewport(800.0, 600.0).is_ok());
        assert!(validate_viewport(0.0, 600.0).is_err());
        assert!(validate_viewport(800.0, f32::INFINITY).is_err());
    }
}
