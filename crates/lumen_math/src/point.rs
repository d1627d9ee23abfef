use std::fmt;

use glam::DVec3;

use crate::{is_zero, MathError, MathResult, Vector};

/// An immutable position in 3D space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point(pub(crate) DVec3);

impl Point {
    /// The origin (0, 0, 0).
    pub const ZERO: Point = Point(DVec3::ZERO);

    /// Create a point from its coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Raw coordinates, for numeric code that may legitimately produce zeros.
    #[inline]
    pub fn xyz(&self) -> DVec3 {
        self.0
    }

    /// Vector from `other` to `self`.
    ///
    /// Fails when both points coincide, since that would be a zero vector.
    pub fn subtract(&self, other: Point) -> MathResult<Vector> {
        if *self == other {
            return Err(MathError::ZeroVector);
        }
        Vector::try_from(self.0 - other.0)
    }

    /// Translate this point by a vector.
    #[inline]
    pub fn add(&self, vector: Vector) -> Point {
        Point(self.0 + vector.0)
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.0.distance(other.0)
    }
}

impl From<DVec3> for Point {
    fn from(xyz: DVec3) -> Self {
        Self(xyz)
    }
}

/// Coordinates compare equal when their differences are near zero.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.0.x - other.0.x) && is_zero(self.0.y - other.0.y) && is_zero(self.0.z - other.0.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract() {
        let a = Point::new(2.0, 4.0, 6.0);
        let b = Point::new(3.0, 5.0, 7.0);
        let v = b.subtract(a).unwrap();
        assert_eq!(v, Vector::new(1.0, 1.0, 1.0).unwrap());
    }

    #[test]
    fn test_subtract_identical_points_fails() {
        let a = Point::new(1.0, 2.0, 3.0);
        assert_eq!(a.subtract(a), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_add() {
        let p = Point::new(2.0, 4.0, 6.0);
        let v = Vector::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(p.add(v), Point::new(3.0, 6.0, 9.0));
        assert_eq!(p.add(-v), Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_distance() {
        let p = Point::new(2.0, 4.0, 6.0);
        assert_eq!(p.distance(p), 0.0);
        assert!((Point::ZERO.distance(Point::new(2.0, 0.0, 0.0)) - 2.0).abs() < 1e-12);
        assert!((p.distance_squared(Point::new(3.0, 5.0, 7.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tolerant_equality() {
        assert_eq!(Point::new(1.0, 1.0, 1.0), Point::new(1.0 + 1e-14, 1.0, 1.0 - 1e-14));
        assert_ne!(Point::new(1.0, 1.0, 1.0), Point::new(1.001, 1.0, 1.0));
    }
}
