use super::Point2d;

/// Determinants smaller than this are treated as parallel lines.
const PARALLEL_EPSILON: f64 = 1e-8;

/// An infinite line in implicit form, the set of points where `a·x + b·y + c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplicitLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ImplicitLine {
    /// Creates a line from its coefficients.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Creates the line passing through two points.
    ///
    /// The line is degenerate (all coefficients zero) when `p1 == p2`;
    /// callers must not pass coincident points.
    pub fn through(p1: Point2d, p2: Point2d) -> Self {
        let a = p2.y - p1.y;
        let b = p1.x - p2.x;
        let c = p2.x * p1.y - p1.x * p2.y;
        Self { a, b, c }
    }

    /// Finds the unique intersection with another line.
    ///
    /// Returns `None` when the lines are parallel or coincident.
    pub fn intersect(&self, other: &Self) -> Option<Point2d> {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() <= PARALLEL_EPSILON {
            return None;
        }
        Some(Point2d::new(
            (self.b * other.c - other.b * self.c) / det,
            (other.a * self.c - self.a * other.c) / det,
        ))
    }

    /// The perpendicular distance from a point to the line.
    pub fn distance_to(&self, p: Point2d) -> f64 {
        (self.a * p.x + self.b * p.y + self.c).abs() / self.a.hypot(self.b)
    }

    /// Whether the point lies on the line, within `tolerance` distance units.
    pub fn contains(&self, p: Point2d, tolerance: f64) -> bool {
        self.distance_to(p) <= tolerance
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn through_contains_both_points() {
        let p1 = Point2d::new(10.0, 20.0);
        let p2 = Point2d::new(20.0, 10.0);
        let line = ImplicitLine::through(p1, p2);
        assert!(line.contains(p1, 1e-9));
        assert!(line.contains(p2, 1e-9));
        assert!(!line.contains(Point2d::new(0.0, 0.0), 1.0));
    }

    #[test]
    fn intersect_crossing_lines() {
        let a = ImplicitLine::through(Point2d::new(0.0, 0.0), Point2d::new(10.0, 10.0));
        let b = ImplicitLine::through(Point2d::new(0.0, 10.0), Point2d::new(10.0, 0.0));
        let p = a.intersect(&b).unwrap();
        assert_approx_eq!(p.x, 5.0);
        assert_approx_eq!(p.y, 5.0);
    }

    #[test]
    fn intersect_is_symmetric() {
        let a = ImplicitLine::through(Point2d::new(1.0, 2.0), Point2d::new(4.0, -3.0));
        let b = ImplicitLine::through(Point2d::new(-2.0, 0.5), Point2d::new(3.0, 7.0));
        let p = a.intersect(&b).unwrap();
        let q = b.intersect(&a).unwrap();
        assert_approx_eq!(p.x, q.x);
        assert_approx_eq!(p.y, q.y);
        assert!(a.contains(p, 1e-9));
        assert!(b.contains(p, 1e-9));
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let a = ImplicitLine::through(Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0));
        let b = ImplicitLine::through(Point2d::new(0.0, 5.0), Point2d::new(10.0, 5.0));
        assert_eq!(a.intersect(&b), None);
        assert_eq!(a.intersect(&a), None);
    }

    #[test]
    fn distance_to_point() {
        let line = ImplicitLine::through(Point2d::new(0.0, 0.0), Point2d::new(0.0, 100.0));
        assert_approx_eq!(line.distance_to(Point2d::new(12.0, 50.0)), 12.0);
        assert_approx_eq!(line.distance_to(Point2d::new(-3.0, -7.0)), 3.0);
    }
}
