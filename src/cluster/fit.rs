use super::Cluster;
use crate::math::Point2d;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cylindrical beacon located from a cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylinderBeacon {
    /// The estimated centre of the beacon.
    pub centre: Point2d,
    /// The radius of the beacon.
    pub radius: f64,
    /// The position of the source cluster in the list passed to [ShapeFitter::fit_all].
    pub index: usize,
}

/// Estimates the shape behind a cluster of hits.
pub trait ShapeFitter {
    /// Fits a beacon to a single cluster, if the cluster looks like one.
    fn fit(&self, cluster: &Cluster) -> Option<CylinderBeacon>;

    /// Fits a beacon to every cluster that looks like one.
    fn fit_all(&self, clusters: &[Cluster]) -> Vec<CylinderBeacon> {
        clusters
            .iter()
            .enumerate()
            .filter_map(|(index, cluster)| {
                self.fit(cluster)
                    .map(|beacon| CylinderBeacon { index, ..beacon })
            })
            .collect()
    }
}

/// Places a beacon of fixed radius at the cluster's centroid.
///
/// The centroid of a visible arc lies on the robot's side of the true centre,
/// so this is a coarse estimate suited to obstacles of unknown shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentroidFitter {
    /// The radius given to every fitted beacon.
    pub radius: f64,
}

impl ShapeFitter for CentroidFitter {
    fn fit(&self, cluster: &Cluster) -> Option<CylinderBeacon> {
        Some(CylinderBeacon {
            centre: cluster.centroid()?,
            radius: self.radius,
            index: 0,
        })
    }
}

/// Places a beacon of fixed radius behind the cluster point closest to the robot,
/// pushed one radius further along the line of sight.
///
/// Needs clusters produced by [clusterize](super::clusterize), which know where the robot was.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestPointFitter {
    /// The radius of the beacons being looked for, which is also how far
    /// behind the closest point the centre is placed.
    pub radius: f64,
}

impl ShapeFitter for ClosestPointFitter {
    fn fit(&self, cluster: &Cluster) -> Option<CylinderBeacon> {
        let origin = cluster.origin()?;
        let closest = cluster.closest_to_robot()?;
        let sight = closest - origin;
        if sight.magnitude2() == 0.0 {
            return None;
        }
        Some(CylinderBeacon {
            centre: closest + sight.normalize_to(self.radius),
            radius: self.radius,
            index: 0,
        })
    }
}
