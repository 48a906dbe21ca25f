use crate::action::Action;
use crate::cluster::{clusterize, Cluster, ClusterParams};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::error::{Error, Result};
use crate::perception::Pose;
use crate::robot::{Robot, RobotAttributes};
use crate::world::World;
use crate::{RobotId, RobotSet};

/// A simulation of range-sensing robots in a static world.
///
/// Actions run one at a time, in the order given; each completes,
/// including any sensing it triggers, before the next starts.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// The world the robots move in.
    world: World,
    /// The robots being simulated.
    robots: RobotSet,
    /// The number of actions applied so far.
    frame: usize,
    /// Debugging information from the previously applied actions.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation in the given world.
    pub fn new(world: World) -> Self {
        Self {
            world,
            robots: RobotSet::with_key(),
            frame: 0,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        }
    }

    /// Adds a robot to the simulation.
    pub fn add_robot(&mut self, pose: Pose, attributes: &RobotAttributes) -> Result<RobotId> {
        let mut robot = Robot::new(pose, attributes)?;
        Ok(self.robots.insert_with_key(|id| {
            robot.id = id;
            robot
        }))
    }

    /// Removes a robot from the simulation.
    pub fn remove_robot(&mut self, id: RobotId) -> Option<Robot> {
        self.robots.remove(id)
    }

    /// Applies a sequence of actions to a robot, in order.
    ///
    /// Returns the total simulated time taken, in s. Stops at the first
    /// action that fails; the actions before it stay applied.
    pub fn apply_actions(&mut self, robot_id: RobotId, actions: &[Action]) -> Result<f64> {
        #[cfg(feature = "debug")]
        take_debug_frame();

        let robot = self
            .robots
            .get_mut(robot_id)
            .ok_or_else(|| Error::InvalidAction(format!("no robot with ID {:?}", robot_id)))?;

        let mut elapsed = 0.0;
        for action in actions {
            log::trace!("Robot {:?} applying {:?}", robot_id, action);
            elapsed += action.apply(robot, &self.world)?;
            self.frame += 1;
        }

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        Ok(elapsed)
    }

    /// Clusters the robot's most recent sweep.
    ///
    /// Returns `None` if the robot doesn't exist or hasn't sensed yet.
    pub fn clusterize(&mut self, robot_id: RobotId, params: &ClusterParams) -> Option<Vec<Cluster>> {
        #[cfg(feature = "debug")]
        take_debug_frame();

        let snapshot = self.robots.get(robot_id)?.last_perception()?;
        let clusters = clusterize(snapshot, params);

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        Some(clusters)
    }

    /// Gets the number of actions applied so far.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets a reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns an iterator over all the robots in the simulation.
    pub fn iter_robots(&self) -> impl Iterator<Item = &Robot> {
        self.robots.values()
    }

    /// Gets a reference to the robot with the given ID.
    pub fn get_robot(&self, robot_id: RobotId) -> Option<&Robot> {
        self.robots.get(robot_id)
    }

    /// Gets the shapes recorded by the last call to [Simulation::apply_actions] or
    /// [Simulation::clusterize], as a JSON array.
    ///
    /// Anything recorded outside those calls, such as by the free [clusterize]
    /// function, is discarded.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}
