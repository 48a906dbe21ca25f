use crate::error::{Error, Result};
use crate::robot::Robot;
use crate::world::World;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A command applied to a robot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Drive forward along the current heading.
    Move(Motion),
    /// Turn on the spot.
    Turn(Motion),
    /// Idle for the given number of seconds.
    Wait(f64),
    /// Sweep the range sensor.
    Sense,
}

/// How long a move or turn lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Motion {
    /// Run for a fixed number of seconds.
    Duration {
        duration: f64,
        velocity: Option<f64>,
    },
    /// Run until a distance (moves) or angle (turns) has been covered.
    Objective {
        amount: f64,
        velocity: Option<f64>,
    },
}

impl Motion {
    /// The velocity override, if any.
    fn velocity(&self) -> Option<f64> {
        match *self {
            Self::Duration { velocity, .. } | Self::Objective { velocity, .. } => velocity,
        }
    }

    /// Converts the motion into a duration given the velocity in effect.
    fn duration(&self, velocity: f64) -> Result<f64> {
        let duration = match *self {
            Self::Duration { duration, .. } => duration,
            Self::Objective { amount, .. } => {
                if velocity == 0.0 {
                    return Err(Error::InvalidAction(format!(
                        "cannot cover {} at zero velocity",
                        amount
                    )));
                }
                amount / velocity
            }
        };
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(Error::InvalidAction(format!(
                "duration must be non-negative, got {}",
                duration
            )));
        }
        Ok(duration)
    }
}

impl Action {
    /// Drives for a fixed duration at the robot's current velocity.
    pub const fn move_for(duration: f64) -> Self {
        Self::Move(Motion::Duration {
            duration,
            velocity: None,
        })
    }

    /// Drives `distance` units, optionally changing the robot's velocity first.
    pub const fn move_by(velocity: Option<f64>, distance: f64) -> Self {
        Self::Move(Motion::Objective {
            amount: distance,
            velocity,
        })
    }

    /// Turns for a fixed duration at the robot's current rotational velocity.
    pub const fn turn_for(duration: f64) -> Self {
        Self::Turn(Motion::Duration {
            duration,
            velocity: None,
        })
    }

    /// Turns by `angle` radians, optionally changing the robot's rotational velocity first.
    ///
    /// The angle and the rotational velocity must have the same sign.
    pub const fn turn_by(rotation_velocity: Option<f64>, angle: f64) -> Self {
        Self::Turn(Motion::Objective {
            amount: angle,
            velocity: rotation_velocity,
        })
    }

    /// Applies the action and returns the simulated time it took, in s.
    ///
    /// Only [`Action::Sense`] touches the perception pipeline; it takes no time.
    pub fn apply(&self, robot: &mut Robot, world: &World) -> Result<f64> {
        match *self {
            Self::Move(motion) => {
                let velocity = motion.velocity().unwrap_or(robot.velocity());
                let duration = motion.duration(velocity)?;
                robot.set_velocity(velocity);
                robot.move_for(duration);
                Ok(duration)
            }
            Self::Turn(motion) => {
                let velocity = motion.velocity().unwrap_or(robot.rotation_velocity());
                let duration = motion.duration(velocity)?;
                robot.set_rotation_velocity(velocity);
                robot.turn_for(duration);
                Ok(duration)
            }
            Self::Wait(duration) => {
                if !(duration.is_finite() && duration >= 0.0) {
                    return Err(Error::InvalidAction(format!(
                        "duration must be non-negative, got {}",
                        duration
                    )));
                }
                robot.wait(duration);
                Ok(duration)
            }
            Self::Sense => {
                robot.sense(world);
                Ok(0.0)
            }
        }
    }
}
