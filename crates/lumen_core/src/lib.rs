//! Lumen Core - scene description for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: planes, spheres, tubes, cylinders, polygons, triangles
//!   and boxes behind the [`Intersectable`] trait
//! - **Materials**: Phong coefficients plus reflection and transparency
//! - **Lights**: ambient, directional, point and spot lights
//! - **Scene**: the container handed to the renderer
//!
//! # Example
//!
//! ```
//! use lumen_core::{Geometry, Material, PointLight, Scene, Sphere};
//! use lumen_math::{Color, Point};
//!
//! let mut scene = Scene::new("demo").with_background(Color::new(10.0, 10.0, 30.0));
//! scene.add_geometry(
//!     Geometry::new(Sphere::new(Point::new(0.0, 0.0, -50.0), 20.0))
//!         .with_emission(Color::new(20.0, 0.0, 0.0))
//!         .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
//! );
//! scene.add_light(PointLight::new(Color::WHITE, Point::new(50.0, 50.0, 50.0)));
//! assert_eq!(scene.geometry_count(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult, LightError};
pub use geometry::{
    Cuboid, Cylinder, Geometries, Geometry, Intersectable, Intersection, Plane, Polygon, Shape,
    Sphere, Triangle, Tube,
};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use scene::Scene;
