//! Scene description consumed by the ray tracer.

use lumen_math::Color;

use crate::geometry::{Geometries, Intersectable};
use crate::light::{AmbientLight, LightSource};

/// Everything a ray tracer needs to shade a ray.
///
/// Scenes are built once and then shared read-only across render workers.
#[derive(Debug, Default)]
pub struct Scene {
    /// Scene name, used in logs
    pub name: String,

    /// Color returned for rays that escape the scene
    pub background: Color,

    /// Constant fill light
    pub ambient_light: AmbientLight,

    /// All intersectable objects
    pub geometries: Geometries,

    /// Point-sampled light sources
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no lights.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_lights(mut self, lights: Vec<Box<dyn LightSource>>) -> Self {
        self.lights = lights;
        self
    }

    /// Add a single intersectable.
    pub fn add_geometry(&mut self, geometry: impl Intersectable + 'static) {
        self.geometries.add(geometry);
    }

    /// Add a single light source.
    pub fn add_light(&mut self, light: impl LightSource + 'static) {
        self.lights.push(Box::new(light));
    }

    /// Number of top-level intersectables.
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// Number of light sources.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
