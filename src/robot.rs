use crate::error::{Error, Result};
use crate::math::unit_vector;
use crate::perception::{sense, PerceptionSnapshot, Pose};
use crate::world::World;
use crate::RobotId;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default number of bearings sampled per sweep.
pub const DEFAULT_ANGLE_MEASURES: usize = 300;

/// The default sensor range, in distance units.
pub const DEFAULT_MEASURE_MAX_DISTANCE: f64 = 1000.0;

/// The default translational velocity, in distance units per second.
pub const DEFAULT_VELOCITY: f64 = 10.0;

/// The default rotational velocity, in rad/s.
pub const DEFAULT_ROTATION_VELOCITY: f64 = 1.5;

/// The attributes of a simulated robot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotAttributes {
    /// The number of evenly spaced bearings sampled per sweep.
    pub angle_measures: usize,
    /// Hits at or beyond this distance are not reported.
    pub measure_max_distance: f64,
    /// The translational velocity used by moves that don't specify one.
    pub velocity: f64,
    /// The rotational velocity used by turns that don't specify one.
    pub rotation_velocity: f64,
    /// Sensor noise; not applied yet.
    pub noise: NoiseParams,
}

/// Sensor noise parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseParams {
    /// Standard deviation of the measured range.
    pub range_stddev: f64,
    /// Standard deviation of the measured bearing, in radians.
    pub bearing_stddev: f64,
}

impl Default for RobotAttributes {
    fn default() -> Self {
        Self {
            angle_measures: DEFAULT_ANGLE_MEASURES,
            measure_max_distance: DEFAULT_MEASURE_MAX_DISTANCE,
            velocity: DEFAULT_VELOCITY,
            rotation_velocity: DEFAULT_ROTATION_VELOCITY,
            noise: NoiseParams::default(),
        }
    }
}

impl RobotAttributes {
    /// Checks that the sensor can actually be swept.
    pub fn validate(&self) -> Result<()> {
        if self.angle_measures == 0 {
            return Err(Error::InvalidConfiguration(
                "angle_measures must be at least 1".into(),
            ));
        }
        if !(self.measure_max_distance > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "measure_max_distance must be positive, got {}",
                self.measure_max_distance
            )));
        }
        Ok(())
    }
}

/// A simulated robot carrying a rotating range sensor.
#[derive(Clone, Debug)]
pub struct Robot {
    /// The robot's ID.
    pub(crate) id: RobotId,
    /// The current pose.
    pose: Pose,
    /// The translational velocity in distance units per second.
    velocity: f64,
    /// The rotational velocity in rad/s.
    rotation_velocity: f64,
    /// The sensor and motion attributes.
    attributes: RobotAttributes,
    /// The simulated time elapsed since the robot was created, in s.
    lifetime: f64,
    /// Every sweep taken so far, oldest first.
    history: Vec<PerceptionSnapshot>,
}

impl Robot {
    /// Creates a new robot.
    pub fn new(pose: Pose, attributes: &RobotAttributes) -> Result<Self> {
        attributes.validate()?;
        Ok(Self {
            id: RobotId::default(),
            pose,
            velocity: attributes.velocity,
            rotation_velocity: attributes.rotation_velocity,
            attributes: *attributes,
            lifetime: 0.0,
            history: vec![],
        })
    }

    /// Gets the robot's ID.
    pub fn id(&self) -> RobotId {
        self.id
    }

    /// The current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The robot's attributes.
    pub fn attributes(&self) -> &RobotAttributes {
        &self.attributes
    }

    /// The translational velocity in distance units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The rotational velocity in rad/s.
    pub fn rotation_velocity(&self) -> f64 {
        self.rotation_velocity
    }

    /// The simulated time elapsed since the robot was created, in s.
    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    /// Every sweep taken so far, oldest first.
    pub fn perception_history(&self) -> &[PerceptionSnapshot] {
        &self.history
    }

    /// The most recent sweep, if any.
    pub fn last_perception(&self) -> Option<&PerceptionSnapshot> {
        self.history.last()
    }

    /// Sets the translational velocity.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Sets the rotational velocity.
    pub fn set_rotation_velocity(&mut self, rotation_velocity: f64) {
        self.rotation_velocity = rotation_velocity;
    }

    /// Drives forward along the current heading for `duration` seconds.
    pub fn move_for(&mut self, duration: f64) {
        let dist = self.velocity * duration;
        self.pose.position += dist * unit_vector(self.pose.orientation);
        self.lifetime += duration;
    }

    /// Turns on the spot for `duration` seconds.
    pub fn turn_for(&mut self, duration: f64) {
        self.pose.orientation += self.rotation_velocity * duration;
        self.lifetime += duration;
    }

    /// Idles for `duration` seconds.
    pub fn wait(&mut self, duration: f64) {
        self.lifetime += duration;
    }

    /// Sweeps the sensor and appends the result to the perception history.
    pub fn sense(&mut self, world: &World) -> &PerceptionSnapshot {
        let snapshot = sense(world, self.pose, &self.attributes, self.lifetime);
        self.history.push(snapshot);
        &self.history[self.history.len() - 1]
    }
}
