//! Infinite tube and finite cylinder around an axis ray.

use lumen_math::{align_zero, is_zero, Interval, Point, Ray, Vector};

use crate::error::{GeometryError, GeometryResult};

/// An infinite circular tube around an axis ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Self {
        Self { axis, radius }
    }

    #[inline]
    pub fn axis(&self) -> Ray {
        self.axis
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance along the axis from its origin to the projection of `point`.
    fn axial_position(&self, point: Point) -> f64 {
        let axis_dir = self.axis.direction().xyz();
        align_zero(axis_dir.dot(point.xyz() - self.axis.origin().xyz()))
    }

    /// Both roots of the ray/tube quadratic, smaller first.
    ///
    /// `None` when the ray runs parallel to the axis or the discriminant is
    /// not positive. Roots may be negative.
    fn roots(&self, ray: &Ray) -> Option<(f64, f64)> {
        let va = self.axis.direction().xyz();
        let v = ray.direction().xyz();

        let v_perp = v - va * v.dot(va);
        let a = v_perp.length_squared();
        if is_zero(a) {
            return None;
        }

        let delta = ray.origin().xyz() - self.axis.origin().xyz();
        let delta_perp = delta - va * delta.dot(va);

        let b = 2.0 * v_perp.dot(delta_perp);
        let c = delta_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t1 = align_zero((-b - root) / (2.0 * a));
        let t2 = align_zero((-b + root) / (2.0 * a));
        Some((t1, t2))
    }

    /// Outward normal: from the nearest axis point towards `point`.
    pub fn normal(&self, point: Point) -> GeometryResult<Vector> {
        let t = self.axial_position(point);
        let center = self.axis.point_at(t);
        point
            .subtract(center)
            .map(|v| v.normalize())
            .map_err(|_| GeometryError::DegenerateNormal(point))
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        let (t1, t2) = self.roots(ray)?;
        let points: Vec<Point> = [t1, t2]
            .into_iter()
            .filter(|t| Interval::POSITIVE.surrounds(*t))
            .map(|t| ray.point_at(t))
            .collect();

        (!points.is_empty()).then_some(points)
    }
}

/// A tube cut to `[0, height]` along its axis.
///
/// Only the curved side is intersectable. The end caps contribute normals
/// for points lying on them but are not hit by rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Self {
        Self {
            tube: Tube::new(axis, radius),
            height,
        }
    }

    #[inline]
    pub fn axis(&self) -> Ray {
        self.tube.axis
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.tube.radius
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    fn within_height(&self, axial: f64) -> bool {
        Interval::new(0.0, self.height).contains(axial) || is_zero(axial - self.height)
    }

    /// `-axis` on the base, `+axis` on the top, the tube normal elsewhere.
    pub fn normal(&self, point: Point) -> GeometryResult<Vector> {
        let axial = self.tube.axial_position(point);
        let axis_dir = self.tube.axis.direction();

        if is_zero(axial) {
            Ok(-axis_dir)
        } else if is_zero(axial - self.height) {
            Ok(axis_dir)
        } else {
            self.tube.normal(point)
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        let (t1, t2) = self.tube.roots(ray)?;
        let points: Vec<Point> = [t1, t2]
            .into_iter()
            .filter(|t| Interval::POSITIVE.surrounds(*t))
            .map(|t| ray.point_at(t))
            .filter(|p| self.within_height(self.tube.axial_position(*p)))
            .collect();

        (!points.is_empty()).then_some(points)
    }
}
