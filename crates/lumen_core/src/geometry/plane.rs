//! Infinite plane.

use lumen_math::{align_zero, is_zero, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// An infinite plane through a reference point with a unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    point: Point,
    normal: Vector,
}

impl Plane {
    /// Create a plane from a point on it and a normal (normalized here).
    pub fn new(point: Point, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(p2 - p1) x (p3 - p1)`, normalized.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> GeometryResult<Self> {
        if p1 == p2 || p1 == p3 || p2 == p3 {
            return Err(GeometryError::CoincidentPoints);
        }

        let v1 = p2.subtract(p1).map_err(|_| GeometryError::CoincidentPoints)?;
        let v2 = p3.subtract(p1).map_err(|_| GeometryError::CoincidentPoints)?;
        let normal = v1.cross(v2).map_err(|_| {
            log::debug!("Rejected plane through collinear points {p1}, {p2}, {p3}");
            GeometryError::CollinearPoints
        })?;

        Ok(Self::new(p1, normal))
    }

    /// Reference point on the plane.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Unit normal, the same everywhere on the plane.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Ray parameter of the hit, if the ray crosses the plane ahead of its origin.
    pub(crate) fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        let n = self.normal.xyz();
        let denominator = n.dot(ray.direction().xyz());
        if is_zero(denominator) {
            return None;
        }

        let t = align_zero(n.dot(self.point.xyz() - ray.origin().xyz()) / denominator);
        Interval::POSITIVE.surrounds(t).then_some(t)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        self.hit_distance(ray).map(|t| vec![ray.point_at(t)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane() -> Plane {
        Plane::from_points(
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_normal_from_points() {
        let plane = plane();
        assert_eq!(plane.normal(), Vector::AXIS_Z);
        assert!((plane.normal().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constructor_normalizes() {
        let plane = Plane::new(Point::ZERO, Vector::new(0.0, 0.0, 5.0).unwrap());
        assert_eq!(plane.normal(), Vector::AXIS_Z);
    }

    #[test]
    fn test_coincident_points_rejected() {
        let p = Point::new(1.0, 2.0, 3.0);
        let err = Plane::from_points(p, p, Point::ZERO).unwrap_err();
        assert_eq!(err, GeometryError::CoincidentPoints);
    }

    #[test]
    fn test_collinear_points_rejected() {
        let err = Plane::from_points(
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::CollinearPoints);
    }

    #[test]
    fn test_oblique_hit() {
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::new(0.0, 3.0, 3.0).unwrap());
        let hits = plane().intersect(&ray).unwrap();
        assert_eq!(hits, vec![Point::new(0.0, 2.0, 1.0)]);
    }

    #[test]
    fn test_ray_moving_away_misses() {
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::MINUS_Z);
        assert!(plane().intersect(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let outside = Ray::new(Point::new(0.0, 0.0, 2.0), Vector::AXIS_X);
        let inside = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::AXIS_X);
        assert!(plane().intersect(&outside).is_none());
        assert!(plane().intersect(&inside).is_none());
    }

    #[test]
    fn test_origin_on_plane_misses() {
        let ray = Ray::new(Point::new(3.0, 3.0, 1.0), Vector::new(0.0, 1.0, 1.0).unwrap());
        assert!(plane().intersect(&ray).is_none());
    }
}
