//! Convex planar polygons and triangles.

use lumen_math::{is_zero, same_sign, Point, Ray, Vector};

use super::plane::Plane;
use crate::error::{GeometryError, GeometryResult};

/// A convex polygon whose vertices are ordered along its boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
}

impl Polygon {
    /// Build a polygon, validating planarity, ordering and convexity.
    ///
    /// The supporting plane comes from the first three vertices.
    pub fn new(vertices: Vec<Point>) -> GeometryResult<Self> {
        let size = vertices.len();
        if size < 3 {
            return Err(GeometryError::TooFewVertices(size));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size > 3 {
            check_convex(&vertices, plane.normal()).map_err(|err| {
                log::debug!("Rejected {size}-vertex polygon: {err}");
                err
            })?;
        }

        Ok(Self { vertices, plane })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Unit normal of the supporting plane.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.plane.normal()
    }

    /// Hit on the polygon interior, if any.
    ///
    /// The ray must pass strictly inside every edge: each side together with
    /// the ray origin spans a plane, and the ray direction has to fall on the
    /// same side of all of them. Grazing an edge or vertex is a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        let origin = ray.origin();
        let direction = ray.direction();

        let legs = self
            .vertices
            .iter()
            .map(|vertex| vertex.subtract(origin).ok())
            .collect::<Option<Vec<Vector>>>()?;

        let mut first = None;
        for (i, leg) in legs.iter().enumerate() {
            let next = legs[(i + 1) % legs.len()];
            let edge_normal = leg.cross(next).ok()?.normalize();
            let dot = direction.dot(edge_normal);
            if is_zero(dot) {
                return None;
            }
            if !same_sign(*first.get_or_insert(dot), dot) {
                return None;
            }
        }

        self.plane.intersect(ray)
    }
}

/// Verify that all vertices share the plane and turn the same way.
fn check_convex(vertices: &[Point], normal: Vector) -> GeometryResult<()> {
    let size = vertices.len();
    let edge = |from: usize, to: usize| {
        vertices[to]
            .subtract(vertices[from])
            .map_err(|_| GeometryError::CoincidentPoints)
    };
    let turn = |e1: Vector, e2: Vector| {
        e1.cross(e2)
            .map(|c| c.dot(normal) > 0.0)
            .map_err(|_| GeometryError::CollinearPoints)
    };

    let mut edge1 = edge(size - 2, size - 1)?;
    let mut edge2 = edge(size - 1, 0)?;
    let positive = turn(edge1, edge2)?;

    for i in 1..size {
        let offset = vertices[i].xyz() - vertices[0].xyz();
        if !is_zero(offset.dot(normal.xyz())) {
            return Err(GeometryError::NonPlanarVertices);
        }

        edge1 = edge2;
        edge2 = edge(i - 1, i)?;
        if positive != turn(edge1, edge2)? {
            return Err(GeometryError::NonConvexPolygon);
        }
    }

    Ok(())
}

/// A three-vertex polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> GeometryResult<Self> {
        Polygon::new(vec![a, b, c]).map(Self)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        self.0.vertices()
    }

    #[inline]
    pub fn normal(&self) -> Vector {
        self.0.normal()
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        self.0.intersect(ray)
    }
}
