use std::fmt;

use crate::{is_zero, Point, Vector};

/// Offset applied along the surface normal when spawning secondary rays.
pub const DELTA: f64 = 0.1;

/// A half-line with an origin and a unit direction.
///
/// The direction is normalized on construction, so `direction().length()`
/// is always 1 regardless of the vector passed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray whose origin is pushed off the surface.
    ///
    /// The origin moves by [`DELTA`] along `normal`, towards the side the
    /// ray travels to, so the ray cannot re-hit the surface it leaves.
    pub fn offset(point: Point, direction: Vector, normal: Vector) -> Self {
        let n = normal.normalize().xyz();
        let shift = if direction.dot(normal) > 0.0 { DELTA } else { -DELTA };
        Self::new(Point::from(point.xyz() + n * shift), direction)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Point at parameter `t`: origin + t * direction.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            return self.origin;
        }
        Point::from(self.origin.xyz() + self.direction.xyz() * t)
    }

    /// The point of `points` closest to the ray origin, if any.
    pub fn closest_point(&self, points: &[Point]) -> Option<Point> {
        points
            .iter()
            .copied()
            .min_by(|a, b| {
                a.distance_squared(self.origin)
                    .total_cmp(&b.distance_squared(self.origin))
            })
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "origin: {}, direction: {}", self.origin, self.direction)
    }
}
