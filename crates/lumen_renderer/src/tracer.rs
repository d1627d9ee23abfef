//! Whitted-style recursive ray tracing.
//!
//! A traced ray is shaded at its closest hit by:
//! - ambient light and surface emission
//! - Phong diffuse and specular terms for every light, dimmed by the
//!   transparency of whatever lies between the point and the light
//! - recursively traced mirror and straight-through transparency rays
//!
//! Recursion stops at `max_level` or once the accumulated attenuation
//! drops below `min_k`.

use std::sync::Arc;

use lumen_core::{Intersectable, Intersection, LightSource, Material, Scene};
use lumen_math::{align_zero, same_sign, Color, Double3, Point, Ray, Vector};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Turns a primary ray into a color.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Result<Color, RenderError>;
}

/// Available ray tracer implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RayTracerKind {
    #[default]
    Simple,
}

impl RayTracerKind {
    /// Instantiate a tracer of this kind over `scene`.
    pub fn create(self, scene: Arc<Scene>, limits: TraceLimits) -> Box<dyn RayTracer> {
        match self {
            RayTracerKind::Simple => Box::new(SimpleRayTracer::new(scene).with_limits(limits)),
        }
    }
}

/// Recursion bounds for secondary rays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceLimits {
    /// Maximum recursion depth, counting the primary hit
    pub max_level: u32,
    /// Attenuation below which a contribution is dropped
    pub min_k: f64,
}

impl TraceLimits {
    pub const MAX_LEVEL: u32 = 10;
    pub const MIN_K: f64 = 0.001;
}

impl Default for TraceLimits {
    fn default() -> Self {
        Self {
            max_level: Self::MAX_LEVEL,
            min_k: Self::MIN_K,
        }
    }
}

/// Immutable shading state for one hit.
struct ShadingContext<'a> {
    hit: Intersection<'a>,
    /// Direction of the incoming ray
    direction: Vector,
    /// Geometry normal at the hit
    normal: Vector,
    /// `direction · normal`, never zero
    vn: f64,
}

impl<'a> ShadingContext<'a> {
    /// `None` when the ray grazes the surface.
    fn new(hit: Intersection<'a>, direction: Vector) -> Result<Option<Self>, RenderError> {
        let normal = hit.normal()?;
        let vn = align_zero(direction.dot(normal));
        Ok((vn != 0.0).then_some(Self {
            hit,
            direction,
            normal,
            vn,
        }))
    }

    #[inline]
    fn point(&self) -> Point {
        self.hit.point
    }

    #[inline]
    fn material(&self) -> &'a Material {
        self.hit.material()
    }
}

/// Per-light shading state.
struct LightContext<'l> {
    light: &'l dyn LightSource,
    /// Direction from the light to the point
    l: Vector,
    /// `normal · l`
    nl: f64,
}

/// The reference Whitted tracer.
pub struct SimpleRayTracer {
    scene: Arc<Scene>,
    limits: TraceLimits,
}

impl SimpleRayTracer {
    pub fn new(scene: Arc<Scene>) -> Self {
        Self {
            scene,
            limits: TraceLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: TraceLimits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn limits(&self) -> TraceLimits {
        self.limits
    }

    fn color_at(
        &self,
        hit: Intersection<'_>,
        direction: Vector,
        level: u32,
        k: Double3,
    ) -> Result<Color, RenderError> {
        if level == 0 || k.lower_than(self.limits.min_k) {
            return Ok(Color::BLACK);
        }
        let Some(ctx) = ShadingContext::new(hit, direction)? else {
            return Ok(Color::BLACK);
        };

        let base = self
            .scene
            .ambient_light
            .intensity()
            .scale_by(ctx.material().ka)
            + hit.geometry.emission();

        Ok(base + self.local_effects(&ctx)? + self.global_effects(&ctx, level, k)?)
    }

    fn local_effects(&self, ctx: &ShadingContext<'_>) -> Result<Color, RenderError> {
        let mut color = Color::BLACK;
        let point = ctx.point();

        for light in &self.scene.lights {
            let l = light.incidence(point)?;
            let nl = align_zero(ctx.normal.dot(l));
            // light and viewer on opposite sides of the surface
            if !same_sign(nl, ctx.vn) {
                continue;
            }

            let light_ctx = LightContext {
                light: light.as_ref(),
                l,
                nl,
            };
            let ktr = self.transparency(ctx, &light_ctx)?;
            if ktr.lower_than(self.limits.min_k) {
                continue;
            }

            let intensity = light.intensity_at(point)? * ktr;
            color += intensity * (diffusive(ctx, &light_ctx) + specular(ctx, &light_ctx));
        }

        Ok(color)
    }

    /// Product of `kt` over everything between the point and the light.
    fn transparency(
        &self,
        ctx: &ShadingContext<'_>,
        light_ctx: &LightContext<'_>,
    ) -> Result<Double3, RenderError> {
        let point = ctx.point();
        let shadow_ray = Ray::offset(point, -light_ctx.l, ctx.normal);
        let light_distance = light_ctx.light.distance(point)?;

        let Some(blockers) = self.scene.geometries.calculate_intersections(&shadow_ray) else {
            return Ok(Double3::ONE);
        };

        let mut ktr = Double3::ONE;
        for blocker in blockers
            .iter()
            .filter(|b| b.point.distance(point) <= light_distance)
        {
            ktr = ktr.product(blocker.material().kt);
            if ktr.lower_than(self.limits.min_k) {
                return Ok(Double3::ZERO);
            }
        }
        Ok(ktr)
    }

    fn global_effects(
        &self,
        ctx: &ShadingContext<'_>,
        level: u32,
        k: Double3,
    ) -> Result<Color, RenderError> {
        let material = ctx.material();
        let point = ctx.point();

        let reflected = Ray::offset(point, ctx.direction.reflect(ctx.normal), ctx.normal);
        let refracted = Ray::offset(point, ctx.direction, ctx.normal);

        Ok(self.global_effect(&reflected, level, k, material.kr)?
            + self.global_effect(&refracted, level, k, material.kt)?)
    }

    fn global_effect(
        &self,
        ray: &Ray,
        level: u32,
        k: Double3,
        kx: Double3,
    ) -> Result<Color, RenderError> {
        let kkx = k.product(kx);
        if kkx.lower_than(self.limits.min_k) {
            return Ok(Color::BLACK);
        }

        match self.scene.geometries.closest_intersection(ray) {
            None => Ok(self.scene.background * kx),
            Some(hit) => Ok(self.color_at(hit, ray.direction(), level - 1, kkx)? * kx),
        }
    }
}

impl RayTracer for SimpleRayTracer {
    fn trace_ray(&self, ray: &Ray) -> Result<Color, RenderError> {
        match self.scene.geometries.closest_intersection(ray) {
            None => Ok(self.scene.background),
            Some(hit) => self.color_at(hit, ray.direction(), self.limits.max_level, Double3::ONE),
        }
    }
}

/// Lambertian term `kd * |n·l|`.
fn diffusive(ctx: &ShadingContext<'_>, light_ctx: &LightContext<'_>) -> Double3 {
    ctx.material().kd.scale(light_ctx.nl.abs())
}

/// Phong term `ks * max(0, -v·r)^shininess`, `r` the light direction
/// mirrored about the normal.
fn specular(ctx: &ShadingContext<'_>, light_ctx: &LightContext<'_>) -> Double3 {
    let n = ctx.normal.xyz();
    let r = light_ctx.l.xyz() - n * (2.0 * light_ctx.nl);
    let minus_vr = -align_zero(ctx.direction.xyz().dot(r));
    if minus_vr <= 0.0 {
        return Double3::ZERO;
    }
    let material = ctx.material();
    material.ks.scale(minus_vr.powi(material.shininess))
}
