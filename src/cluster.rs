//! Groups the hits of a sensor sweep into candidate obstacles.

use crate::math::Point2d;
use crate::perception::PerceptionSnapshot;
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cell::Cell;

pub use fit::{CentroidFitter, ClosestPointFitter, CylinderBeacon, ShapeFitter};

mod fit;

/// Consecutive hits further apart than this start a new cluster.
pub const MINIMUM_DISTANCE_BETWEEN_CLUSTERS: f64 = 10.0;

/// Neighbouring clusters whose ends are closer than this are merged.
pub const MAXIMUM_DISTANCE_BETWEEN_MEANS: f64 = 20.0;

/// Clusters with fewer points than this are discarded as noise.
pub const MINIMUM_POINTS_IN_CLUSTER: usize = 3;

/// The thresholds used by [clusterize].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterParams {
    /// Consecutive hits further apart than this start a new cluster.
    pub minimum_distance_between_clusters: f64,
    /// Neighbouring clusters whose ends are closer than this are merged.
    pub maximum_distance_between_means: f64,
    /// Clusters with fewer points than this are discarded as noise.
    pub minimum_points_in_cluster: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            minimum_distance_between_clusters: MINIMUM_DISTANCE_BETWEEN_CLUSTERS,
            maximum_distance_between_means: MAXIMUM_DISTANCE_BETWEEN_MEANS,
            minimum_points_in_cluster: MINIMUM_POINTS_IN_CLUSTER,
        }
    }
}

/// A run of angularly contiguous hits believed to belong to one obstacle.
///
/// Points are kept in bearing order, so the first and last points are the
/// ends of the arc seen by the sensor.
#[derive(Clone, Debug, Default)]
pub struct Cluster {
    /// The member points, in bearing order.
    points: Vec<Point2d>,
    /// The cached mean of `points`, cleared whenever membership changes.
    mean: Cell<Option<Point2d>>,
    /// The position of the robot that saw the points.
    origin: Option<Point2d>,
}

impl Cluster {
    /// Creates an empty cluster.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a cluster from points given in bearing order.
    pub fn from_points(points: Vec<Point2d>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// The member points, in bearing order.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// The number of member points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cluster has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point of the arc.
    pub fn first(&self) -> Option<Point2d> {
        self.points.first().copied()
    }

    /// The last point of the arc.
    pub fn last(&self) -> Option<Point2d> {
        self.points.last().copied()
    }

    /// Appends a point at the end of the arc.
    pub fn push(&mut self, point: Point2d) {
        self.points.push(point);
        self.mean.set(None);
    }

    /// Appends the points of a cluster that follows this one.
    pub fn append(&mut self, mut other: Cluster) {
        self.points.append(&mut other.points);
        self.mean.set(None);
    }

    /// Inserts the points of a cluster that precedes this one.
    pub fn prepend(&mut self, mut other: Cluster) {
        other.points.append(&mut self.points);
        self.points = other.points;
        self.mean.set(None);
    }

    /// The arithmetic mean of the member points, or `None` for an empty cluster.
    pub fn centroid(&self) -> Option<Point2d> {
        if self.points.is_empty() {
            return None;
        }
        if let Some(mean) = self.mean.get() {
            return Some(mean);
        }
        let mean = Point2d::centroid(&self.points);
        self.mean.set(Some(mean));
        Some(mean)
    }

    /// The smallest distance from any member to `point`.
    pub fn distance_to(&self, point: Point2d) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.distance(point))
            .min_by(f64::total_cmp)
    }

    /// The member closest to `point`.
    pub fn closest_to(&self, point: Point2d) -> Option<Point2d> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.distance2(point).total_cmp(&b.distance2(point)))
    }

    /// The member closest to the robot that took the sweep, if the cluster came from one.
    pub fn closest_to_robot(&self) -> Option<Point2d> {
        self.origin.and_then(|origin| self.closest_to(origin))
    }

    /// The position of the robot that took the sweep.
    pub fn origin(&self) -> Option<Point2d> {
        self.origin
    }

    /// The axis-aligned bounding box of the members, as x and y intervals.
    pub fn extent(&self) -> Option<[Interval<f64>; 2]> {
        let (first, rest) = self.points.split_first()?;
        let init = [Interval::point(first.x), Interval::point(first.y)];
        Some(rest.iter().fold(init, |[x, y], p| [x.include(p.x), y.include(p.y)]))
    }

    /// The gap between the ends of two arcs: the smaller of first-to-last and last-to-first.
    ///
    /// Infinite if either cluster is empty.
    pub fn gap_to(&self, other: &Cluster) -> f64 {
        match (self.first(), self.last(), other.first(), other.last()) {
            (Some(first), Some(last), Some(other_first), Some(other_last)) => {
                f64::min(first.distance(other_last), last.distance(other_first))
            }
            _ => f64::INFINITY,
        }
    }
}

/// Groups the hits of a sweep into clusters.
///
/// Hits are split wherever consecutive points are more than
/// `minimum_distance_between_clusters` apart; the arcs touching either side
/// of the 0/2π seam are joined; neighbouring arcs whose ends are closer than
/// `maximum_distance_between_means` are merged; and arcs with fewer than
/// `minimum_points_in_cluster` points are dropped as noise.
///
/// An empty sweep yields no clusters.
pub fn clusterize(snapshot: &PerceptionSnapshot, params: &ClusterParams) -> Vec<Cluster> {
    let points = snapshot.points().collect::<Vec<_>>();
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return vec![],
    };

    let mut clusters = segment(&points, params.minimum_distance_between_clusters);

    if clusters.len() > 1 && first.distance(last) <= params.minimum_distance_between_clusters {
        close_seam(&mut clusters);
    }

    merge_neighbours(&mut clusters, params);

    rejoin_ends(&mut clusters, params.maximum_distance_between_means);

    clusters.retain(|cluster| cluster.len() >= params.minimum_points_in_cluster);

    let origin = snapshot.pose().position;
    for cluster in &mut clusters {
        cluster.origin = Some(origin);
        #[cfg(feature = "debug")]
        {
            if let Some(centroid) = cluster.centroid() {
                let radius = cluster
                    .points
                    .iter()
                    .map(|p| p.distance(centroid))
                    .fold(0.0, f64::max);
                crate::debug::debug_cluster(centroid, radius, cluster.len());
            }
        }
    }

    log::debug!(
        "Clustered {} hits into {} clusters at t={:.3}",
        points.len(),
        clusters.len(),
        snapshot.timestamp()
    );
    clusters
}

/// Splits the points wherever consecutive points are more than `max_gap` apart.
fn segment(points: &[Point2d], max_gap: f64) -> Vec<Cluster> {
    let mut clusters = vec![];
    let mut current = Cluster::new();
    if let Some(first) = points.first() {
        current.push(*first);
    }
    for (prev, point) in points.iter().copied().tuple_windows() {
        if prev.distance(point) > max_gap {
            clusters.push(std::mem::take(&mut current));
        }
        current.push(point);
    }
    if !current.is_empty() {
        clusters.push(current);
    }
    clusters
}

/// Joins the last cluster onto the front of the first, across the 0/2π seam.
fn close_seam(clusters: &mut Vec<Cluster>) {
    if clusters.len() < 2 {
        return;
    }
    if let Some(last) = clusters.pop() {
        log::trace!("Joining {} points across the seam", last.len());
        clusters[0].prepend(last);
    }
}

/// Merges the first and last clusters when their facing ends are closer than `max_gap`.
///
/// Usually the last arc runs into the start of the first across the seam, so it
/// goes in front. When noise between them was dropped, the first arc's end may
/// face the last arc's start instead, and the last arc follows it.
fn rejoin_ends(clusters: &mut Vec<Cluster>, max_gap: f64) {
    if clusters.len() < 2 {
        return;
    }
    let (first, last) = (&clusters[0], &clusters[clusters.len() - 1]);
    let ends = (first.first(), first.last(), last.first(), last.last());
    let (Some(first_start), Some(first_end), Some(last_start), Some(last_end)) = ends else {
        return;
    };
    let across_seam = first_start.distance(last_end);
    let in_order = first_end.distance(last_start);
    if across_seam.min(in_order) >= max_gap {
        return;
    }
    if in_order < across_seam {
        if let Some(last) = clusters.pop() {
            log::trace!("Joining {} points after the first cluster", last.len());
            clusters[0].append(last);
        }
    } else {
        close_seam(clusters);
    }
}

/// Merges neighbouring clusters and drops small ones once they can no longer grow.
fn merge_neighbours(clusters: &mut Vec<Cluster>, params: &ClusterParams) {
    let mut idx = 0;
    while idx + 1 < clusters.len() {
        if clusters[idx].gap_to(&clusters[idx + 1]) < params.maximum_distance_between_means {
            let next = clusters.remove(idx + 1);
            log::trace!("Merging cluster {} into {}", idx + 1, idx);
            clusters[idx].append(next);
        } else if clusters[idx].len() < params.minimum_points_in_cluster {
            let noise = clusters.remove(idx);
            log::trace!("Dropping {} points of noise", noise.len());
        } else {
            idx += 1;
        }
    }
}
