//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Creates the degenerate interval containing only `value`.
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Returns the smallest interval containing both this interval and `value`.
    pub fn include(&self, value: T) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;

    #[test]
    fn include_grows_interval() {
        let i = Interval::point(5.0).include(2.0).include(9.0).include(6.0);
        assert_eq!(i, Interval::new(2.0, 9.0));
        assert_eq!(i.length(), 7.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let i = Interval::new(0.0, 100.0);
        assert!(i.contains(0.0));
        assert!(i.contains(100.0));
        assert!(!i.contains(100.1));
    }
}
