//! Axis-aligned box built from six polygon faces.

use lumen_math::{Point, Ray, Vector};

use super::polygon::Polygon;
use crate::error::GeometryResult;

/// Distance under which a point counts as lying on a face.
const FACE_EPSILON: f64 = 1e-10;

/// An axis-aligned box spanning two opposite corners.
#[derive(Clone, Debug, PartialEq)]
pub struct Cuboid {
    min: Point,
    max: Point,
    faces: Vec<Polygon>,
}

impl Cuboid {
    /// Create a box from any two opposite corners.
    ///
    /// Fails if the box is flat along some axis, since its faces would
    /// degenerate.
    pub fn new(a: Point, b: Point) -> GeometryResult<Self> {
        let min = Point::from(a.xyz().min(b.xyz()));
        let max = Point::from(a.xyz().max(b.xyz()));
        let (lo, hi) = (min.xyz(), max.xyz());

        let v1 = Point::new(lo.x, lo.y, lo.z);
        let v2 = Point::new(hi.x, lo.y, lo.z);
        let v3 = Point::new(hi.x, hi.y, lo.z);
        let v4 = Point::new(lo.x, hi.y, lo.z);
        let v5 = Point::new(lo.x, lo.y, hi.z);
        let v6 = Point::new(hi.x, lo.y, hi.z);
        let v7 = Point::new(hi.x, hi.y, hi.z);
        let v8 = Point::new(lo.x, hi.y, hi.z);

        let faces = vec![
            Polygon::new(vec![v1, v2, v3, v4])?, // z min
            Polygon::new(vec![v5, v8, v7, v6])?, // z max
            Polygon::new(vec![v1, v5, v6, v2])?, // y min
            Polygon::new(vec![v4, v3, v7, v8])?, // y max
            Polygon::new(vec![v1, v4, v8, v5])?, // x min
            Polygon::new(vec![v2, v6, v7, v3])?, // x max
        ];

        Ok(Self { min, max, faces })
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// Axis-aligned outward normal of the face `point` lies on.
    ///
    /// Faces are tested in the order z-min, z-max, y-min, y-max, x-min,
    /// x-max; edges and corners take the first match. Points off the
    /// surface get the normal of the nearest face.
    pub fn normal(&self, point: Point) -> Vector {
        let (p, lo, hi) = (point.xyz(), self.min.xyz(), self.max.xyz());
        let candidates = [
            ((p.z - lo.z).abs(), Vector::MINUS_Z),
            ((p.z - hi.z).abs(), Vector::AXIS_Z),
            ((p.y - lo.y).abs(), Vector::MINUS_Y),
            ((p.y - hi.y).abs(), Vector::AXIS_Y),
            ((p.x - lo.x).abs(), Vector::MINUS_X),
            ((p.x - hi.x).abs(), Vector::AXIS_X),
        ];

        if let Some((_, normal)) = candidates.iter().find(|(d, _)| *d < FACE_EPSILON) {
            return *normal;
        }

        candidates
            .iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(Vector::AXIS_Z, |(_, normal)| *normal)
    }

    /// Union of the face hits, nearest first.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        let origin = ray.origin();
        let mut points: Vec<Point> = self
            .faces
            .iter()
            .filter_map(|face| face.intersect(ray))
            .flatten()
            .collect();
        points.sort_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        });

        (!points.is_empty()).then_some(points)
    }
}
