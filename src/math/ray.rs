use super::{from_polar, unit_vector, ImplicitLine, Point2d, Vector2d};
use cgmath::prelude::*;

/// A sensor beam: the half-line leaving `origin` along `bearing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The point the ray is cast from.
    pub origin: Point2d,
    /// The world-frame angle of the ray in radians.
    pub bearing: f64,
}

impl Ray {
    /// Creates a new ray.
    pub const fn new(origin: Point2d, bearing: f64) -> Self {
        Self { origin, bearing }
    }

    /// A unit vector pointing along the ray.
    pub fn direction(&self) -> Vector2d {
        unit_vector(self.bearing)
    }

    /// The point one unit along the ray from its origin.
    pub fn next_point(&self) -> Point2d {
        self.origin + self.direction()
    }

    /// The point `t` units along the ray from its origin.
    pub fn point_at(&self, t: f64) -> Point2d {
        self.origin + from_polar(self.bearing, t).to_vec()
    }

    /// The infinite line the ray lies on.
    pub fn line(&self) -> ImplicitLine {
        ImplicitLine::through(self.origin, self.next_point())
    }

    /// Whether `point` lies strictly ahead of the ray's origin.
    ///
    /// Points level with the origin (zero dot product) are rejected.
    pub fn is_in_same_sense(&self, point: Point2d) -> bool {
        self.direction().dot(point - self.origin) > 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn same_sense() {
        let ray = Ray::new(Point2d::new(2.0, 3.0), 0.0);
        assert!(!ray.is_in_same_sense(Point2d::new(1.0, 3.0)));
        assert!(ray.is_in_same_sense(Point2d::new(3.0, 3.0)));
        assert!(!ray.is_in_same_sense(Point2d::new(2.0, 10.0)));
    }

    #[test]
    fn line_contains_ray_points() {
        let ray = Ray::new(Point2d::new(12.0, 12.0), PI / 3.0);
        let line = ray.line();
        for t in [-5.0, 0.0, 1.0, 42.0] {
            assert!(line.contains(ray.point_at(t), 1e-9));
        }
    }

    #[test]
    fn next_point_is_one_unit_away() {
        let ray = Ray::new(Point2d::new(-1.0, 4.0), 2.5);
        assert_approx_eq!(ray.next_point().distance(ray.origin), 1.0);
    }
}
