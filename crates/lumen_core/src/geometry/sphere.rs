//! Sphere primitive.

use lumen_math::{align_zero, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// A sphere given by its center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward normal `(p - center) / |p - center|`.
    pub fn normal(&self, point: Point) -> GeometryResult<Vector> {
        point
            .subtract(self.center)
            .map(|v| v.normalize())
            .map_err(|_| GeometryError::DegenerateNormal(point))
    }

    /// Hits ahead of the ray origin, nearest first.
    ///
    /// A ray starting at the center has exactly one hit at `t = radius`.
    /// Tangent rays miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        let origin = ray.origin();
        if origin == self.center {
            return Some(vec![ray.point_at(self.radius)]);
        }

        let u = self.center.xyz() - origin.xyz();
        let tm = align_zero(u.dot(ray.direction().xyz()));
        let d_squared = align_zero(u.length_squared() - tm * tm);
        let r_squared = self.radius * self.radius;
        if align_zero(d_squared - r_squared) >= 0.0 {
            return None;
        }

        let th = (r_squared - d_squared).sqrt();
        let points: Vec<Point> = [align_zero(tm - th), align_zero(tm + th)]
            .into_iter()
            .filter(|t| Interval::POSITIVE.surrounds(*t))
            .map(|t| ray.point_at(t))
            .collect();

        (!points.is_empty()).then_some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point::new(1.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn test_normal() {
        let sphere = unit_sphere();
        let normal = sphere.normal(Point::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(normal, Vector::AXIS_X);
    }

    #[test]
    fn test_normal_at_center_is_degenerate() {
        let sphere = unit_sphere();
        assert!(sphere.normal(sphere.center()).is_err());
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::new(1.0, 1.0, 0.0).unwrap());
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn test_two_hits_nearest_first() {
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::new(3.0, 1.0, 0.0).unwrap());
        let hits = unit_sphere().intersect(&ray).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], Point::new(0.0651530771650466, 0.355051025721682, 0.0));
        assert_eq!(hits[1], Point::new(1.53484692283495, 0.844948974278318, 0.0));
    }

    #[test]
    fn test_origin_inside() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, 1.0), 1.0);
        let ray = Ray::new(Point::new(0.0, 0.0, 1.5), Vector::AXIS_Y);
        let hits = sphere.intersect(&ray).unwrap();
        assert_eq!(hits, vec![Point::new(0.0, 0.75f64.sqrt(), 1.5)]);
    }

    #[test]
    fn test_origin_at_center() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, 1.0), 1.0);
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::AXIS_X);
        let hits = sphere.intersect(&ray).unwrap();
        assert_eq!(hits, vec![Point::new(1.0, 0.0, 1.0)]);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let ray = Ray::new(Point::new(3.0, 0.0, 0.0), Vector::AXIS_X);
        assert!(unit_sphere().intersect(&ray).is_none());
    }

    #[test]
    fn test_tangent_ray_misses() {
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::AXIS_X);
        assert!(unit_sphere().intersect(&ray).is_none());
    }
}
