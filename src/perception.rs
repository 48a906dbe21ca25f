//! Range sensor sweeps.

use crate::error::Error;
use crate::math::{rotate, Point2d};
use crate::robot::RobotAttributes;
use crate::world::World;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// The position and heading of a robot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// The robot's position in world coordinates.
    pub position: Point2d,
    /// The robot's heading in radians, counter-clockwise from the x-axis.
    pub orientation: f64,
}

impl Pose {
    /// Creates a new pose.
    pub const fn new(position: Point2d, orientation: f64) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Converts a point from the robot's frame to world coordinates.
    pub fn to_world(&self, local: Point2d) -> Point2d {
        rotate(local, self.orientation) + self.position.to_vec()
    }

    /// Converts a point from world coordinates to the robot's frame.
    pub fn to_local(&self, world: Point2d) -> Point2d {
        rotate(Point2d::from_vec(world - self.position), -self.orientation)
    }
}

/// The result of one complete sensor sweep.
///
/// Slot `i` holds the hit seen at bearing `i · 2π / n`, so neighbouring slots
/// are neighbouring bearings and the last slot neighbours the first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerceptionSnapshot {
    /// The simulation time at which the sweep was taken.
    timestamp: f64,
    /// The robot's pose during the sweep.
    pose: Pose,
    /// One slot per bearing; `None` when nothing was seen within range.
    hits: Vec<Option<Point2d>>,
    /// The slots left empty because the ray grazed a circle.
    degenerate: Vec<usize>,
}

impl PerceptionSnapshot {
    /// Creates a snapshot from an ordered list of hits.
    pub fn new(timestamp: f64, pose: Pose, hits: Vec<Option<Point2d>>) -> Self {
        Self {
            timestamp,
            pose,
            hits,
            degenerate: vec![],
        }
    }

    /// The simulation time at which the sweep was taken.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// The robot's pose during the sweep.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The hit slots, ordered by increasing bearing.
    pub fn hits(&self) -> &[Option<Point2d>] {
        &self.hits
    }

    /// The hit points, skipping empty slots, ordered by increasing bearing.
    pub fn points(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.hits.iter().flatten().copied()
    }

    /// The number of slots (sampled bearings).
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the snapshot has no slots.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The number of non-empty slots.
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|hit| hit.is_some()).count()
    }

    /// The bearing sampled by the given slot.
    pub fn bearing(&self, idx: usize) -> f64 {
        idx as f64 * TAU / self.hits.len() as f64
    }

    /// The slots left empty because the ray grazed a circle.
    pub fn degenerate(&self) -> &[usize] {
        &self.degenerate
    }
}

/// Sweeps the range sensor around a full turn from `pose`.
///
/// Casts `attributes.angle_measures` rays at evenly spaced world-frame
/// bearings starting from zero. A slot is filled when a hit lies strictly
/// closer than `attributes.measure_max_distance`. Rays grazing a circle are
/// logged, recorded in [`PerceptionSnapshot::degenerate`] and left empty;
/// they never abort the sweep.
pub fn sense(
    world: &World,
    pose: Pose,
    attributes: &RobotAttributes,
    timestamp: f64,
) -> PerceptionSnapshot {
    let count = attributes.angle_measures;
    let step = TAU / count as f64;
    let mut hits = Vec::with_capacity(count);
    let mut degenerate = vec![];

    for idx in 0..count {
        let bearing = idx as f64 * step;
        let hit = match world.cast_ray(pose.position, bearing) {
            Ok(hit) => hit,
            Err(err @ Error::DegenerateGeometry { .. }) => {
                log::warn!("Sensing gap at slot {}: {}", idx, err);
                degenerate.push(idx);
                None
            }
            Err(err) => {
                log::warn!("Ray at slot {} failed: {}", idx, err);
                None
            }
        };
        hits.push(
            hit.filter(|hit| hit.distance < attributes.measure_max_distance)
                .map(|hit| hit.point),
        );
    }

    let snapshot = PerceptionSnapshot {
        timestamp,
        pose,
        hits,
        degenerate,
    };
    log::debug!(
        "Sensed {}/{} hits at t={:.3} from ({:.2}, {:.2})",
        snapshot.hit_count(),
        snapshot.len(),
        timestamp,
        pose.position.x,
        pose.position.y
    );
    snapshot
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::WorldItem;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn attributes(angle_measures: usize, measure_max_distance: f64) -> RobotAttributes {
        RobotAttributes {
            angle_measures,
            measure_max_distance,
            ..Default::default()
        }
    }

    fn room() -> World {
        World::with_items(
            100.0,
            100.0,
            [
                WorldItem::segment(Point2d::new(0.0, 0.0), Point2d::new(0.0, 100.0)),
                WorldItem::segment(Point2d::new(0.0, 100.0), Point2d::new(100.0, 100.0)),
                WorldItem::segment(Point2d::new(100.0, 100.0), Point2d::new(100.0, 0.0)),
                WorldItem::segment(Point2d::new(100.0, 0.0), Point2d::new(0.0, 0.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn four_bearings() {
        let pose = Pose::new(Point2d::new(20.0, 30.0), 0.0);
        let snapshot = sense(&room(), pose, &attributes(4, 1000.0), 1.5);

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.hit_count(), 4);
        assert_eq!(snapshot.timestamp(), 1.5);
        assert_eq!(snapshot.pose(), pose);
        let expected = [(100.0, 30.0), (20.0, 100.0), (0.0, 30.0), (20.0, 0.0)];
        for (hit, (x, y)) in snapshot.hits().iter().zip(expected) {
            let hit = hit.unwrap();
            assert_approx_eq!(hit.x, x);
            assert_approx_eq!(hit.y, y);
        }
        assert_approx_eq!(snapshot.bearing(1), 0.5 * PI);
    }

    #[test]
    fn single_bearing() {
        let pose = Pose::new(Point2d::new(20.0, 30.0), 0.0);
        let snapshot = sense(&room(), pose, &attributes(1, 1000.0), 0.0);
        assert_eq!(snapshot.len(), 1);
        assert_approx_eq!(snapshot.hits()[0].unwrap().x, 100.0);
    }

    #[test]
    fn out_of_range() {
        let pose = Pose::new(Point2d::new(20.0, 30.0), 0.0);
        let snapshot = sense(&room(), pose, &attributes(4, 50.0), 0.0);
        assert_eq!(snapshot.hits()[0], None);
        assert!(snapshot.hits()[1].is_none());
        assert!(snapshot.hits()[2].is_some());
        assert!(snapshot.hits()[3].is_some());
        assert_eq!(snapshot.points().count(), 2);
    }

    #[test]
    fn range_limit_is_exclusive() {
        let pose = Pose::new(Point2d::new(50.0, 50.0), 0.0);
        let snapshot = sense(&room(), pose, &attributes(4, 50.0), 0.0);
        assert_eq!(snapshot.hit_count(), 0);
    }

    #[test]
    fn tangent_bearing_is_a_gap() {
        let world = World::with_items(
            100.0,
            100.0,
            [WorldItem::circle(Point2d::new(50.0, 10.0), 10.0)],
        )
        .unwrap();
        let pose = Pose::new(Point2d::new(0.0, 0.0), 0.0);
        let snapshot = sense(&world, pose, &attributes(4, 1000.0), 0.0);
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.degenerate(), &[0, 2]);
        assert_eq!(snapshot.hit_count(), 0);
    }

    #[test]
    fn pose_frames() {
        let pose = Pose::new(Point2d::new(10.0, 5.0), 0.5 * PI);
        let world = pose.to_world(Point2d::new(2.0, 0.0));
        assert_approx_eq!(world.x, 10.0);
        assert_approx_eq!(world.y, 7.0);
        let local = pose.to_local(world);
        assert_approx_eq!(local.x, 2.0);
        assert_approx_eq!(local.y, 0.0);
    }
}
