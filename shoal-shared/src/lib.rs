#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use shoal_core::{Boid, ConfigError, Flock, FlockConfig, TargetFrame, Vector2D};

/// Represents a 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        Vector2D::from(*self).distance(&Vector2D::from(*other))
    }
}

impl From<Vector2D> for Position {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for Vector2D {
    fn from(p: Position) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// Palm centre as reported by a hand tracker, normalised to `0..1` in camera
/// space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PalmLandmark {
    pub x: f32,
    pub y: f32,
}

impl PalmLandmark {
    /// Map onto the screen. The camera image is mirrored horizontally so that
    /// moving a hand to the right moves the target to the right.
    pub fn to_screen(&self, width: f32, height: f32) -> Position {
        Position::new((1.0 - self.x) * width, self.y * height)
    }
}

/// Voice group a target drives, by its index in the tracker's list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    Bass,
    Soprano,
}

impl TargetRole {
    pub fn for_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Bass),
            1 => Some(Self::Soprano),
            _ => None,
        }
    }
}

/// Targets and idle flag as delivered by a tracker for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetSnapshot {
    #[serde(default)]
    pub targets: Vec<Position>,
    #[serde(default)]
    pub idle: bool,
}

impl From<&TargetSnapshot> for TargetFrame {
    fn from(snapshot: &TargetSnapshot) -> Self {
        TargetFrame::new(
            snapshot.targets.iter().copied().map(Vector2D::from).collect(),
            snapshot.idle,
        )
    }
}

impl From<&TargetFrame> for TargetSnapshot {
    fn from(frame: &TargetFrame) -> Self {
        Self {
            targets: frame.targets.iter().copied().map(Position::from).collect(),
            idle: frame.idle,
        }
    }
}

/// A target as a renderer would label it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetMarker {
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TargetRole>,
}

/// Read-only view of one boid after integration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub position: Position,
    pub velocity: Position,
    pub heading: f32,
    pub radius: f32,
}

impl From<&Boid> for AgentSnapshot {
    fn from(boid: &Boid) -> Self {
        Self {
            position: boid.position.into(),
            velocity: boid.velocity.into(),
            heading: boid.heading(),
            radius: boid.radius,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub idle: bool,
    pub targets: Vec<TargetMarker>,
    pub agents: Vec<AgentSnapshot>,
}

impl FrameSnapshot {
    /// Snapshot the flock after `targets` was stepped. Targets are kept even
    /// when idle; renderers hide them on the `idle` flag.
    pub fn capture(flock: &Flock, targets: &TargetFrame) -> Self {
        Self {
            frame: flock.frame(),
            idle: targets.idle,
            targets: targets
                .targets
                .iter()
                .enumerate()
                .map(|(index, target)| TargetMarker {
                    position: (*target).into(),
                    role: TargetRole::for_index(index),
                })
                .collect(),
            agents: flock.boids().iter().map(AgentSnapshot::from).collect(),
        }
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Flock tuning as stored in config files. Missing fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub radius: f32,
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub attraction_scale: f32,
    pub attraction_weight: f32,
    pub edge_buffer: f32,
    pub min_initial_speed: f32,
    pub max_initial_speed: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        FlockConfig::default().into()
    }
}

impl From<FlockConfig> for FlockSettings {
    fn from(config: FlockConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            max_force: config.max_force,
            radius: config.radius,
            separation_distance: config.separation_distance,
            alignment_distance: config.alignment_distance,
            cohesion_distance: config.cohesion_distance,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            cohesion_weight: config.cohesion_weight,
            attraction_scale: config.attraction_scale,
            attraction_weight: config.attraction_weight,
            edge_buffer: config.edge_buffer,
            min_initial_speed: config.min_initial_speed,
            max_initial_speed: config.max_initial_speed,
        }
    }
}

impl TryFrom<FlockSettings> for FlockConfig {
    type Error = ConfigError;

    fn try_from(settings: FlockSettings) -> Result<Self, Self::Error> {
        let config = FlockConfig {
            max_speed: settings.max_speed,
            max_force: settings.max_force,
            radius: settings.radius,
            separation_distance: settings.separation_distance,
            alignment_distance: settings.alignment_distance,
            cohesion_distance: settings.cohesion_distance,
            separation_weight: settings.separation_weight,
            alignment_weight: settings.alignment_weight,
            cohesion_weight: settings.cohesion_weight,
            attraction_scale: settings.attraction_scale,
            attraction_weight: settings.attraction_weight,
            edge_buffer: settings.edge_buffer,
            min_initial_speed: settings.min_initial_speed,
            max_initial_speed: settings.max_initial_speed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_palm_landmark_is_mirrored() {
        let palm = PalmLandmark { x: 0.25, y: 0.5 };
        assert_eq!(palm.to_screen(800.0, 600.0), Position::new(600.0, 300.0));
    }

    #[test]
    fn test_target_roles() {
        assert_eq!(TargetRole::for_index(0), Some(TargetRole::Bass));
        assert_eq!(TargetRole::for_index(1), Some(TargetRole::Soprano));
        assert_eq!(TargetRole::for_index(2), None);
    }

    #[test]
    fn test_target_snapshot_into_frame() {
        let snapshot = TargetSnapshot {
            targets: vec![Position::new(1.0, 2.0)],
            idle: true,
        };
        let frame = TargetFrame::from(&snapshot);
        assert_eq!(frame.targets, vec![Vector2D::new(1.0, 2.0)]);
        assert!(frame.idle);
        assert_eq!(TargetSnapshot::from(&frame), snapshot);
    }

    #[test]
    fn test_target_snapshot_defaults_when_fields_missing() {
        let snapshot: TargetSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.targets.is_empty());
        assert!(!snapshot.idle);
    }

    #[test]
    fn test_frame_snapshot_capture() {
        let config = FlockConfig::default();
        let boids = vec![Boid::new(
            Vector2D::new(10.0, 10.0),
            Vector2D::new(0.0, 2.0),
            &config,
        )];
        let mut flock = Flock::from_boids(100.0, 100.0, boids, config).unwrap();
        let targets = TargetFrame::active(vec![
            Vector2D::new(50.0, 50.0),
            Vector2D::new(90.0, 90.0),
            Vector2D::new(5.0, 5.0),
        ]);
        flock.step(&targets);

        let snapshot = FrameSnapshot::capture(&flock, &targets);
        assert_eq!(snapshot.frame, 1);
        assert!(!snapshot.idle);
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.agents[0].position, Position::new(10.0, 12.0));
        assert_eq!(snapshot.agents[0].radius, 4.0);
        assert_eq!(snapshot.targets[0].role, Some(TargetRole::Bass));
        assert_eq!(snapshot.targets[1].role, Some(TargetRole::Soprano));
        assert_eq!(snapshot.targets[2].role, None);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"role\":\"bass\""));
        let parsed: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings: FlockSettings = serde_json::from_str(r#"{"max_speed": 8.0}"#).unwrap();
        let config = FlockConfig::try_from(settings).unwrap();
        assert_eq!(config.max_speed, 8.0);
        assert_eq!(config.separation_weight, 2.0);
    }

    #[test]
    fn test_settings_rejects_negative_force() {
        let settings = FlockSettings {
            max_force: -1.0,
            ..FlockSettings::default()
        };
        assert!(FlockConfig::try_from(settings).is_err());
    }
}
