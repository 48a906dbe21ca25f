use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Computes the Euclidean distance between two points.
pub fn distance(p: Point2d, q: Point2d) -> f64 {
    p.distance(q)
}

/// Rotates a point about the origin by `angle` radians, counter-clockwise.
///
/// To rotate about another pivot, translate the point first.
pub fn rotate(p: Point2d, angle: f64) -> Point2d {
    let (sin, cos) = angle.sin_cos();
    Point2d::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
}

/// Creates a point from polar coordinates about the origin.
pub fn from_polar(angle: f64, distance: f64) -> Point2d {
    let (sin, cos) = angle.sin_cos();
    Point2d::new(distance * cos, distance * sin)
}

/// A unit vector pointing along `angle`.
pub fn unit_vector(angle: f64) -> Vector2d {
    let (sin, cos) = angle.sin_cos();
    Vector2d::new(cos, sin)
}

/// The 2D cross product (the z component of the 3D cross product).
pub fn cross(u: Vector2d, v: Vector2d) -> f64 {
    u.x * v.y - u.y * v.x
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn rotate_half_turn() {
        let p = rotate(Point2d::new(2.0, 3.0), PI);
        assert_approx_eq!(p.x, -2.0);
        assert_approx_eq!(p.y, -3.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate(Point2d::new(1.0, 0.0), 0.5 * PI);
        assert_approx_eq!(p.x, 0.0);
        assert_approx_eq!(p.y, 1.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let p = Point2d::new(1.0, 2.0);
        let q = Point2d::new(4.0, 6.0);
        assert_approx_eq!(distance(p, q), 5.0);
        assert_approx_eq!(distance(q, p), 5.0);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn polar_point() {
        let p = from_polar(1.25 * PI, 4.0);
        assert_approx_eq!(p.distance(Point2d::new(0.0, 0.0)), 4.0);
        assert_approx_eq!(p.x, p.y);
        assert!(p.x < 0.0);
    }

    #[test]
    fn cross_sign() {
        let u = Vector2d::new(2.0, 0.0);
        let v = Vector2d::new(1.0, 3.0);
        assert_eq!(cross(u, v), 6.0);
        assert_eq!(cross(v, u), -6.0);
        assert_eq!(cross(u, u), 0.0);
    }
}
