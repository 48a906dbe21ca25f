pub use cgmath;
pub use action::{Action, Motion};
pub use cluster::{
    clusterize, CentroidFitter, ClosestPointFitter, Cluster, ClusterParams, CylinderBeacon,
    ShapeFitter,
};
pub use error::{Error, Result};
pub use item::WorldItem;
pub use perception::{sense, PerceptionSnapshot, Pose};
pub use robot::{NoiseParams, Robot, RobotAttributes};
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use world::{RayHit, SegmentMode, World};

mod action;
mod cluster;
#[cfg(feature = "debug")]
mod debug;
mod error;
mod item;
pub mod math;
mod perception;
mod robot;
mod simulation;
mod util;
mod world;

new_key_type! {
    /// Unique ID of a [WorldItem].
    pub struct ItemId;
    /// Unique ID of a [Robot].
    pub struct RobotId;
}

type ItemSet = SlotMap<ItemId, WorldItem>;
type RobotSet = SlotMap<RobotId, Robot>;
