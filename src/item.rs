use crate::error::{Error, Result};
use crate::math::{cross, ImplicitLine, Point2d, Ray};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Relative tolerance used to detect a ray grazing a circle.
const TANGENT_RTOL: f64 = 1e-5;

/// Absolute tolerance used to detect a ray grazing a circle.
const TANGENT_ATOL: f64 = 1e-8;

/// How far past a segment's end points a hit still counts as on the segment, in distance units.
const SEGMENT_END_TOLERANCE: f64 = 1e-9;

/// The intersections of a ray's line with a world item, at most two.
pub type Collisions = SmallVec<[Point2d; 2]>;

/// An obstacle in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WorldItem {
    /// A straight wall between two points.
    Segment { p1: Point2d, p2: Point2d },
    /// A round obstacle, such as a beacon or a post.
    Circle { centre: Point2d, radius: f64 },
}

impl WorldItem {
    /// Creates a wall between two points.
    pub const fn segment(p1: Point2d, p2: Point2d) -> Self {
        Self::Segment { p1, p2 }
    }

    /// Creates a round obstacle.
    pub const fn circle(centre: Point2d, radius: f64) -> Self {
        Self::Circle { centre, radius }
    }

    /// Checks that the item describes a well-formed shape.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Segment { p1, p2 } => {
                if ![p1.x, p1.y, p2.x, p2.y].iter().all(|v| v.is_finite()) {
                    return Err(Error::InvalidConfiguration(format!(
                        "segment has non-finite end points {:?} and {:?}",
                        p1, p2
                    )));
                }
                if p1.distance2(p2) == 0.0 {
                    return Err(Error::InvalidConfiguration(format!(
                        "segment has coincident end points at {:?}",
                        p1
                    )));
                }
            }
            Self::Circle { centre, radius } => {
                if !centre.x.is_finite() || !centre.y.is_finite() {
                    return Err(Error::InvalidConfiguration(format!(
                        "circle has non-finite centre {:?}",
                        centre
                    )));
                }
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(Error::InvalidConfiguration(format!(
                        "circle radius must be positive, got {}",
                        radius
                    )));
                }
            }
        }
        Ok(())
    }

    /// Intersects the infinite line carrying `ray` with this item.
    ///
    /// The returned points are in world coordinates and are not filtered by
    /// direction: some may lie behind the ray's origin. Segments are treated
    /// as infinite lines, see [`WorldItem::extends_to`].
    pub fn collide(&self, ray: &Ray) -> Result<Collisions> {
        match *self {
            Self::Segment { p1, p2 } => Ok(collide_line(p1, p2, ray)),
            Self::Circle { centre, radius } => collide_circle(centre, radius, ray),
        }
    }

    /// Whether a point of this item's outline, as returned by [`collide`](Self::collide),
    /// lies within the item's actual extent.
    ///
    /// Always true for circles. For segments this rejects points beyond the end points.
    pub fn extends_to(&self, point: Point2d) -> bool {
        match *self {
            Self::Segment { p1, p2 } => {
                let seg = p2 - p1;
                let len = seg.magnitude();
                let t = (point - p1).dot(seg) / len;
                t >= -SEGMENT_END_TOLERANCE && t <= len + SEGMENT_END_TOLERANCE
            }
            Self::Circle { .. } => true,
        }
    }
}

/// Intersects the ray's line with the infinite line through `p1` and `p2`.
fn collide_line(p1: Point2d, p2: Point2d, ray: &Ray) -> Collisions {
    ImplicitLine::through(p1, p2)
        .intersect(&ray.line())
        .into_iter()
        .collect()
}

/// Intersects the ray's line with a circle.
fn collide_circle(centre: Point2d, radius: f64, ray: &Ray) -> Result<Collisions> {
    let dist = ray.line().distance_to(centre);
    if (dist - radius).abs() <= TANGENT_ATOL + TANGENT_RTOL * radius.abs() {
        return Err(Error::DegenerateGeometry {
            bearing: ray.bearing,
            x: centre.x,
            y: centre.y,
        });
    }
    if dist > radius {
        return Ok(smallvec![]);
    }

    // Work in circle-centred coordinates
    let c1 = ray.origin - centre;
    let c2 = ray.next_point() - centre;
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let dr2 = dx * dx + dy * dy;
    let det = cross(c1, c2);
    let discriminant = radius * radius * dr2 - det * det;
    if discriminant < 0.0 {
        return Ok(smallvec![]);
    }

    let root = discriminant.sqrt();
    let sign = if dy < 0.0 { -1.0 } else { 1.0 };
    Ok([-1.0, 1.0]
        .into_iter()
        .map(|mp: f64| {
            let x = (det * dy + mp * sign * dx * root) / dr2;
            let y = (-det * dx + mp * dy.abs() * root) / dr2;
            Point2d::new(x + centre.x, y + centre.y)
        })
        .collect())
}
