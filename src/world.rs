use crate::error::{Error, Result};
use crate::item::WorldItem;
use crate::math::{Point2d, Ray};
use crate::util::Interval;
use crate::{ItemId, ItemSet};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How walls are intersected by sensor rays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentMode {
    /// Walls behave as infinite lines; a ray may report a hit past a wall's end points.
    #[default]
    Infinite,
    /// Hits beyond a wall's end points are discarded.
    Clipped,
}

/// The nearest obstacle struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The hit point in world coordinates.
    pub point: Point2d,
    /// The distance from the ray's origin to the hit point.
    pub distance: f64,
    /// The item that was struck.
    pub item: ItemId,
}

/// A 2D world made of walls and round obstacles.
#[derive(Clone, Debug)]
pub struct World {
    /// The obstacles, in insertion order.
    items: ItemSet,
    /// The horizontal extent of the world, used for rendering only.
    bounds_x: Interval<f64>,
    /// The vertical extent of the world, used for rendering only.
    bounds_y: Interval<f64>,
    /// How walls are intersected.
    segment_mode: SegmentMode,
}

impl World {
    /// Creates an empty world spanning `[0, width] × [0, height]`.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "world bounds must be positive, got {} × {}",
                width, height
            )));
        }
        Ok(Self {
            items: ItemSet::with_key(),
            bounds_x: Interval::new(0.0, width),
            bounds_y: Interval::new(0.0, height),
            segment_mode: SegmentMode::default(),
        })
    }

    /// Creates a world from a list of items.
    pub fn with_items(
        width: f64,
        height: f64,
        items: impl IntoIterator<Item = WorldItem>,
    ) -> Result<Self> {
        let mut world = Self::new(width, height)?;
        for item in items {
            world.add_item(item)?;
        }
        Ok(world)
    }

    /// Adds an obstacle to the world.
    pub fn add_item(&mut self, item: WorldItem) -> Result<ItemId> {
        item.validate()?;
        Ok(self.items.insert(item))
    }

    /// Sets how walls are intersected by sensor rays.
    pub fn set_segment_mode(&mut self, mode: SegmentMode) {
        self.segment_mode = mode;
    }

    /// Gets how walls are intersected by sensor rays.
    pub fn segment_mode(&self) -> SegmentMode {
        self.segment_mode
    }

    /// The width of the world.
    pub fn width(&self) -> f64 {
        self.bounds_x.length()
    }

    /// The height of the world.
    pub fn height(&self) -> f64 {
        self.bounds_y.length()
    }

    /// Whether a point lies within the world's rectangular bounds.
    pub fn contains(&self, point: Point2d) -> bool {
        self.bounds_x.contains(point.x) && self.bounds_y.contains(point.y)
    }

    /// Returns an iterator over the items in the world, in insertion order.
    pub fn iter_items(&self) -> impl Iterator<Item = (ItemId, &WorldItem)> {
        self.items.iter()
    }

    /// Gets a reference to the item with the given ID.
    pub fn get_item(&self, id: ItemId) -> Option<&WorldItem> {
        self.items.get(id)
    }

    /// Casts a ray and finds the nearest obstacle ahead of its origin.
    ///
    /// Returns `Ok(None)` when nothing lies ahead of the ray. Fails with
    /// [`Error::DegenerateGeometry`] if the ray grazes a circle.
    pub fn cast_ray(&self, origin: Point2d, bearing: f64) -> Result<Option<RayHit>> {
        let ray = Ray::new(origin, bearing);

        let mut candidates = vec![];
        for (id, item) in &self.items {
            for point in item.collide(&ray)? {
                if self.segment_mode == SegmentMode::Clipped && !item.extends_to(point) {
                    continue;
                }
                candidates.push((id, point));
            }
        }

        let hit = candidates
            .into_iter()
            .filter(|(_, point)| ray.is_in_same_sense(*point))
            .map(|(item, point)| RayHit {
                point,
                distance: origin.distance(point),
                item,
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        #[cfg(feature = "debug")]
        {
            if let Some(hit) = &hit {
                crate::debug::debug_ray(origin, hit.point, hit.item);
            }
        }

        Ok(hit)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn square_room() -> World {
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
    fn invalid_bounds() {
        assert!(World::new(0.0, 100.0).is_err());
        assert!(World::new(100.0, -1.0).is_err());
        assert!(World::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn invalid_item() {
        let mut world = World::new(10.0, 10.0).unwrap();
        let p = Point2d::new(1.0, 1.0);
        assert!(matches!(
            world.add_item(WorldItem::segment(p, p)),
            Err(Error::InvalidConfiguration(_))
        ));
        assert_eq!(world.iter_items().count(), 0);
    }

    #[test]
    fn forward_hit_only() {
        // Two walls on the same line of sight, one behind the robot
        let world = World::with_items(
            100.0,
            100.0,
            [
                WorldItem::segment(Point2d::new(10.0, 0.0), Point2d::new(10.0, 100.0)),
                WorldItem::segment(Point2d::new(80.0, 0.0), Point2d::new(80.0, 100.0)),
            ],
        )
        .unwrap();
        let origin = Point2d::new(50.0, 50.0);

        let hit = world.cast_ray(origin, 0.0).unwrap().unwrap();
        assert_approx_eq!(hit.point.x, 80.0);
        assert_approx_eq!(hit.distance, 30.0);

        let hit = world.cast_ray(origin, PI).unwrap().unwrap();
        assert_approx_eq!(hit.point.x, 10.0);
        assert_approx_eq!(hit.distance, 40.0);
    }

    #[test]
    fn nearest_hit() {
        let mut world = square_room();
        let post = world
            .add_item(WorldItem::circle(Point2d::new(50.0, 50.0), 10.0))
            .unwrap();

        let hit = world.cast_ray(Point2d::new(12.0, 50.0), 0.0).unwrap().unwrap();
        assert_eq!(hit.item, post);
        assert_approx_eq!(hit.point.x, 40.0);
        assert_approx_eq!(hit.point.y, 50.0);
        assert_approx_eq!(hit.distance, 28.0);
    }

    #[test]
    fn nothing_ahead() {
        let world = World::with_items(
            100.0,
            100.0,
            [WorldItem::segment(Point2d::new(10.0, 0.0), Point2d::new(10.0, 100.0))],
        )
        .unwrap();
        assert_eq!(world.cast_ray(Point2d::new(50.0, 50.0), 0.0).unwrap(), None);
        assert_eq!(world.cast_ray(Point2d::new(50.0, 50.0), 0.5 * PI).unwrap(), None);
    }

    #[test]
    fn circle_hit_from_inside() {
        let world = World::with_items(
            100.0,
            100.0,
            [WorldItem::circle(Point2d::new(50.0, 50.0), 10.0)],
        )
        .unwrap();
        let hit = world.cast_ray(Point2d::new(50.0, 50.0), 0.5 * PI).unwrap().unwrap();
        assert_approx_eq!(hit.point.x, 50.0);
        assert_approx_eq!(hit.point.y, 60.0);
    }

    #[test]
    fn clipped_segments() {
        let mut world = World::with_items(
            100.0,
            100.0,
            [
                WorldItem::segment(Point2d::new(20.0, 0.0), Point2d::new(20.0, 10.0)),
                WorldItem::segment(Point2d::new(60.0, 0.0), Point2d::new(60.0, 100.0)),
            ],
        )
        .unwrap();
        let origin = Point2d::new(0.0, 50.0);

        let hit = world.cast_ray(origin, 0.0).unwrap().unwrap();
        assert_approx_eq!(hit.point.x, 20.0);

        world.set_segment_mode(SegmentMode::Clipped);
        let hit = world.cast_ray(origin, 0.0).unwrap().unwrap();
        assert_approx_eq!(hit.point.x, 60.0);
    }

    #[test]
    fn bounds() {
        let world = square_room();
        assert_eq!(world.width(), 100.0);
        assert_eq!(world.height(), 100.0);
        assert!(world.contains(Point2d::new(12.0, 12.0)));
        assert!(!world.contains(Point2d::new(-1.0, 12.0)));
    }
}
