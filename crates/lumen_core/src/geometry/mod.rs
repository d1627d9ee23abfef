//! Intersectable geometry.
//!
//! Every primitive reports the points where a ray crosses its surface
//! ([`Intersectable::find_intersections`]) and, wrapped in a [`Geometry`],
//! the material and emission needed to shade those points.
//!
//! Intersection queries return `None` when the ray misses. A returned list
//! is never empty.

mod cuboid;
mod geometries;
mod plane;
mod polygon;
mod sphere;
mod tube;

use std::ptr;

use lumen_math::{Color, Point, Ray, Vector};

use crate::error::GeometryResult;
use crate::material::Material;

pub use cuboid::Cuboid;
pub use geometries::Geometries;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::{Cylinder, Tube};

/// A ray hit on a specific geometry.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    /// The geometry that was hit
    pub geometry: &'a Geometry,
    /// Point of intersection
    pub point: Point,
}

impl<'a> Intersection<'a> {
    pub fn new(geometry: &'a Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Material of the hit geometry.
    #[inline]
    pub fn material(&self) -> &'a Material {
        &self.geometry.material
    }

    /// Surface normal of the hit geometry at the hit point.
    pub fn normal(&self) -> GeometryResult<Vector> {
        self.geometry.normal(self.point)
    }
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.geometry, other.geometry) && self.point == other.point
    }
}

/// Trait for anything a ray can be tested against.
pub trait Intersectable: Send + Sync {
    /// All hits of `ray` on this object, in no particular order.
    fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>>;

    /// Hit points only, without geometry attribution.
    fn find_intersections(&self, ray: &Ray) -> Option<Vec<Point>> {
        self.calculate_intersections(ray)
            .map(|hits| hits.into_iter().map(|hit| hit.point).collect())
    }

    /// The hit nearest to the ray origin.
    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let origin = ray.origin();
        self.calculate_intersections(ray)?.into_iter().min_by(|a, b| {
            a.point
                .distance_squared(origin)
                .total_cmp(&b.point.distance_squared(origin))
        })
    }
}

/// The primitive shapes a [`Geometry`] can take.
#[derive(Clone, Debug)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Tube(Tube),
    Cylinder(Cylinder),
    Polygon(Polygon),
    Triangle(Triangle),
    Cuboid(Cuboid),
}

impl Shape {
    /// Points where `ray` crosses the surface, `None` on a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec<Point>> {
        match self {
            Shape::Plane(s) => s.intersect(ray),
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Tube(s) => s.intersect(ray),
            Shape::Cylinder(s) => s.intersect(ray),
            Shape::Polygon(s) => s.intersect(ray),
            Shape::Triangle(s) => s.intersect(ray),
            Shape::Cuboid(s) => s.intersect(ray),
        }
    }

    /// Outward unit normal at a surface point.
    pub fn normal(&self, point: Point) -> GeometryResult<Vector> {
        match self {
            Shape::Plane(s) => Ok(s.normal()),
            Shape::Sphere(s) => s.normal(point),
            Shape::Tube(s) => s.normal(point),
            Shape::Cylinder(s) => s.normal(point),
            Shape::Polygon(s) => Ok(s.normal()),
            Shape::Triangle(s) => Ok(s.normal()),
            Shape::Cuboid(s) => Ok(s.normal(point)),
        }
    }
}

macro_rules! impl_shape_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_shape_from!(Plane, Sphere, Tube, Cylinder, Polygon, Triangle, Cuboid);

/// A shape with the surface properties used for shading.
#[derive(Clone, Debug)]
pub struct Geometry {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Geometry {
    /// Wrap a shape with the default material and no emission.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            emission: Color::BLACK,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Outward unit normal at a surface point.
    pub fn normal(&self, point: Point) -> GeometryResult<Vector> {
        self.shape.normal(point)
    }
}

impl Intersectable for Geometry {
    fn calculate_intersections(&self, ray: &Ray) -> Option<Vec<Intersection<'_>>> {
        let points = self.shape.intersect(ray)?;
        Some(
            points
                .into_iter()
                .map(|point| Intersection::new(self, point))
                .collect(),
        )
    }
}
