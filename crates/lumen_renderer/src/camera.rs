//! Camera configuration, primary ray generation and the render loop.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use lumen_core::Scene;
use lumen_math::{align_zero, is_zero, Color, Point, Ray, Vector};
use rayon::prelude::*;

use crate::error::{CameraError, RenderError};
use crate::output::{ImageBuffer, ImageSink};
use crate::progress::PixelManager;
use crate::settings::{auto_threads, Parallelism, RenderSettings};
use crate::tracer::{RayTracer, RayTracerKind, TraceLimits};

/// Per-channel tolerance for adaptive supersampling corner comparison.
const SIMILARITY_TOLERANCE: f64 = 1.0;

/// Pixel scheduling with automatic sizing already applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Schedule {
    Sequential,
    DataParallel,
    Workers(usize),
}

impl TryFrom<Parallelism> for Schedule {
    type Error = CameraError;

    fn try_from(parallelism: Parallelism) -> Result<Self, CameraError> {
        match parallelism {
            Parallelism::Sequential => Ok(Schedule::Sequential),
            Parallelism::DataParallel => Ok(Schedule::DataParallel),
            Parallelism::Threads(0) => Err(CameraError::InvalidThreadCount),
            Parallelism::Threads(threads) => Ok(Schedule::Workers(threads)),
            Parallelism::Auto => Ok(Schedule::Workers(auto_threads())),
        }
    }
}

/// How the camera is aimed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Orientation {
    /// Looking down +Z with +Y up
    Default,
    /// Explicit forward and up vectors, must be orthogonal
    Axes { to: Vector, up: Vector },
    /// Look-at target with an optional up hint
    Target { target: Point, up: Option<Vector> },
}

/// Builder for [`Camera`].
///
/// Setters only record values; everything is validated in [`build`].
///
/// [`build`]: CameraConfig::build
#[derive(Clone)]
pub struct CameraConfig {
    location: Point,
    orientation: Orientation,
    distance: Option<f64>,
    view_plane: Option<(f64, f64)>,
    resolution: (u32, u32),
    scene: Option<Arc<Scene>>,
    tracer_kind: RayTracerKind,
    limits: TraceLimits,
    settings: RenderSettings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: Point::ZERO,
            orientation: Orientation::Default,
            distance: None,
            view_plane: None,
            resolution: (1, 1),
            scene: None,
            tracer_kind: RayTracerKind::default(),
            limits: TraceLimits::default(),
            settings: RenderSettings::default(),
        }
    }
}

impl CameraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position (default origin).
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    /// Aim with explicit forward and up vectors.
    pub fn with_direction(mut self, to: Vector, up: Vector) -> Self {
        self.orientation = Orientation::Axes { to, up };
        self
    }

    /// Aim at a target point with +Y as the up hint.
    pub fn with_target(mut self, target: Point) -> Self {
        self.orientation = Orientation::Target { target, up: None };
        self
    }

    /// Aim at a target point with an up hint.
    pub fn with_target_up(mut self, target: Point, up: Vector) -> Self {
        self.orientation = Orientation::Target {
            target,
            up: Some(up),
        };
        self
    }

    /// Set distance from the camera to the view plane.
    pub fn with_vp_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Set view plane width and height.
    pub fn with_vp_size(mut self, width: f64, height: f64) -> Self {
        self.view_plane = Some((width, height));
        self
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = (width, height);
        self
    }

    /// Render `scene` with the given tracer implementation.
    pub fn with_ray_tracer(mut self, scene: Arc<Scene>, kind: RayTracerKind) -> Self {
        self.scene = Some(scene);
        self.tracer_kind = kind;
        self
    }

    /// Set recursion bounds for the tracer.
    pub fn with_trace_limits(mut self, limits: TraceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace all sampling and scheduling settings at once.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable grid anti-aliasing with `samples` rays per pixel.
    pub fn with_anti_aliasing(mut self, enabled: bool, samples: u32) -> Self {
        self.settings.anti_aliasing = enabled;
        self.settings.samples_per_pixel = samples;
        self
    }

    /// Set adaptive supersampling depth (0 disables).
    pub fn with_adaptive_depth(mut self, depth: u32) -> Self {
        self.settings.adaptive_depth = depth;
        self
    }

    /// Set the scheduling strategy.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.settings.parallelism = parallelism;
        self
    }

    /// Log progress every `percent` percent (0 disables).
    pub fn with_print_interval(mut self, percent: f64) -> Self {
        self.settings.print_interval = percent;
        self
    }

    /// Validate and build the camera.
    pub fn build(self) -> Result<Camera, CameraError> {
        Camera::new(self)
    }
}

/// A validated, immutable pinhole camera.
pub struct Camera {
    location: Point,
    to: Vector,
    up: Vector,
    right: Vector,
    center: Point,
    width: f64,
    height: f64,
    distance: f64,
    nx: u32,
    ny: u32,
    tracer: Option<Box<dyn RayTracer>>,
    settings: RenderSettings,
    schedule: Schedule,
}

impl Camera {
    /// Build a camera from its configuration.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let (width, height) = config.view_plane.ok_or(CameraError::MissingViewPlane)?;
        if align_zero(width) <= 0.0 || align_zero(height) <= 0.0 {
            return Err(CameraError::InvalidViewPlane { width, height });
        }

        let distance = config.distance.ok_or(CameraError::MissingDistance)?;
        if align_zero(distance) <= 0.0 {
            return Err(CameraError::InvalidDistance(distance));
        }

        let (nx, ny) = config.resolution;
        if nx == 0 || ny == 0 {
            return Err(CameraError::InvalidResolution {
                width: nx,
                height: ny,
            });
        }

        let location = config.location;
        let (to, up) = resolve_orientation(location, config.orientation)?;
        let right = to.cross(up).map_err(|_| CameraError::ParallelUp)?.normalize();
        let center = Point::from(location.xyz() + to.xyz() * distance);

        let settings = config.settings;
        validate_sampling(&settings)?;
        let schedule = Schedule::try_from(settings.parallelism)?;
        let tracer = config
            .scene
            .map(|scene| config.tracer_kind.create(scene, config.limits));

        log::debug!(
            "Camera at {location} looking {to}, up {up}, right {right}, {nx}x{ny} pixels, {schedule:?}"
        );

        Ok(Self {
            location,
            to,
            up,
            right,
            center,
            width,
            height,
            distance,
            nx,
            ny,
            tracer,
            settings,
            schedule,
        })
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    #[inline]
    pub fn to(&self) -> Vector {
        self.to
    }

    #[inline]
    pub fn up(&self) -> Vector {
        self.up
    }

    #[inline]
    pub fn right(&self) -> Vector {
        self.right
    }

    /// Center of the view plane.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Image resolution in pixels.
    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    #[inline]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Ray through pixel column `j`, row `i` of an `nx` x `ny` grid.
    ///
    /// Indices may be fractional to address sub-pixel positions; integral
    /// values hit pixel centers.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: f64, i: f64) -> Ray {
        let pixel_width = self.width / nx as f64;
        let pixel_height = self.height / ny as f64;

        let x = (j - (nx as f64 - 1.0) / 2.0) * pixel_width;
        let y = (i - (ny as f64 - 1.0) / 2.0) * pixel_height;

        let target = self.center.xyz() + self.right.xyz() * x - self.up.xyz() * y;
        let direction = Vector::try_from(target - self.location.xyz()).unwrap_or(self.to);
        Ray::new(self.location, direction)
    }

    /// Render every pixel, then hand them to `sink` and flush it.
    pub fn render_image(&self, sink: &mut dyn ImageSink) -> Result<(), RenderError> {
        let tracer = self.tracer.as_deref().ok_or(RenderError::MissingRayTracer)?;
        let pixels = PixelManager::new(self.nx, self.ny, self.settings.print_interval);

        log::info!(
            "Rendering {}x{} with {:?}",
            self.nx,
            self.ny,
            self.schedule
        );
        let start = Instant::now();

        let colors = match self.schedule {
            Schedule::Sequential => (0..pixels.total())
                .map(|index| self.cast_ray(tracer, &pixels, index))
                .collect::<Result<Vec<_>, _>>()?,
            Schedule::DataParallel => (0..pixels.total())
                .into_par_iter()
                .map(|index| self.cast_ray(tracer, &pixels, index))
                .collect::<Result<Vec<_>, _>>()?,
            Schedule::Workers(threads) => self.render_threads(tracer, &pixels, threads)?,
        };

        for (index, color) in colors.into_iter().enumerate() {
            let (x, y) = pixels.position(index);
            sink.write_pixel(x, y, color);
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
        sink.write()
    }

    /// Render into a fresh in-memory buffer.
    pub fn render_to_buffer(&self) -> Result<ImageBuffer, RenderError> {
        let mut buffer = ImageBuffer::new(self.nx, self.ny);
        self.render_image(&mut buffer)?;
        Ok(buffer)
    }

    /// Paint grid lines every `interval` pixels onto `sink`.
    pub fn print_grid(&self, sink: &mut dyn ImageSink, interval: u32, color: Color) {
        if interval == 0 {
            log::warn!("Grid interval must be positive, skipping grid");
            return;
        }
        for i in 0..self.ny {
            for j in 0..self.nx {
                if i % interval == 0 || j % interval == 0 {
                    sink.write_pixel(j, i, color);
                }
            }
        }
    }

    /// Explicit worker pool pulling pixel indices from `pixels`.
    ///
    /// Every worker is joined before any error is returned.
    fn render_threads(
        &self,
        tracer: &dyn RayTracer,
        pixels: &PixelManager,
        threads: usize,
    ) -> Result<Vec<Color>, RenderError> {
        let results: Vec<thread::Result<Result<Vec<(usize, Color)>, RenderError>>> =
            thread::scope(|s| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        s.spawn(move || {
                            let mut rendered = Vec::new();
                            while let Some(index) = pixels.next_index() {
                                rendered.push((index, self.cast_ray(tracer, pixels, index)?));
                            }
                            Ok::<_, RenderError>(rendered)
                        })
                    })
                    .collect();
                handles.into_iter().map(|handle| handle.join()).collect()
            });

        let mut colors = vec![Color::BLACK; pixels.total()];
        for result in results {
            let rendered = result.map_err(|_| RenderError::WorkerPanicked)??;
            for (index, color) in rendered {
                colors[index] = color;
            }
        }
        Ok(colors)
    }

    fn cast_ray(
        &self,
        tracer: &dyn RayTracer,
        pixels: &PixelManager,
        index: usize,
    ) -> Result<Color, RenderError> {
        let (j, i) = pixels.position(index);
        let color = self.pixel_color(tracer, j as f64, i as f64)?;
        pixels.pixel_done();
        Ok(color)
    }

    fn pixel_color(&self, tracer: &dyn RayTracer, j: f64, i: f64) -> Result<Color, RenderError> {
        if self.settings.adaptive_depth > 0 {
            let footprint = Footprint {
                min_x: -0.5,
                max_x: 0.5,
                min_y: -0.5,
                max_y: 0.5,
            };
            self.adaptive_sample(tracer, j, i, 0, footprint)
        } else if self.settings.anti_aliasing {
            self.grid_sample(tracer, j, i)
        } else {
            tracer.trace_ray(&self.construct_ray(self.nx, self.ny, j, i))
        }
    }

    fn trace_at(&self, tracer: &dyn RayTracer, j: f64, i: f64) -> Result<Color, RenderError> {
        tracer.trace_ray(&self.construct_ray(self.nx, self.ny, j, i))
    }

    /// Average of a regular `g x g` sub-pixel grid centered on the pixel.
    fn grid_sample(&self, tracer: &dyn RayTracer, j: f64, i: f64) -> Result<Color, RenderError> {
        let grid = grid_size(self.settings.samples_per_pixel);
        let cell = |n: u32| (n as f64 + 0.5) / grid as f64 - 0.5;

        let mut color = Color::BLACK;
        for xi in 0..grid {
            for yi in 0..grid {
                color += self.trace_at(tracer, j + cell(xi), i + cell(yi))?;
            }
        }
        Ok(color.reduce((grid * grid) as f64))
    }

    /// Recursive corner sampling, subdividing where corners disagree.
    fn adaptive_sample(
        &self,
        tracer: &dyn RayTracer,
        j: f64,
        i: f64,
        depth: u32,
        area: Footprint,
    ) -> Result<Color, RenderError> {
        let top_left = self.trace_at(tracer, j + area.min_x, i + area.min_y)?;
        if depth >= self.settings.adaptive_depth {
            return Ok(top_left);
        }

        let corners = [
            top_left,
            self.trace_at(tracer, j + area.max_x, i + area.min_y)?,
            self.trace_at(tracer, j + area.min_x, i + area.max_y)?,
            self.trace_at(tracer, j + area.max_x, i + area.max_y)?,
        ];
        if corners_similar(&corners) {
            Ok(top_left)
        } else {
            self.subdivide(tracer, j, i, depth, area)
        }
    }

    fn subdivide(
        &self,
        tracer: &dyn RayTracer,
        j: f64,
        i: f64,
        depth: u32,
        area: Footprint,
    ) -> Result<Color, RenderError> {
        let mut sum = Color::BLACK;
        for quadrant in area.quadrants() {
            sum += self.adaptive_sample(tracer, j, i, depth + 1, quadrant)?;
        }
        Ok(sum.reduce(4.0))
    }
}

/// Sub-pixel region in pixel-index offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Footprint {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Footprint {
    fn quadrants(&self) -> [Footprint; 4] {
        let mid_x = (self.min_x + self.max_x) / 2.0;
        let mid_y = (self.min_y + self.max_y) / 2.0;
        [
            Footprint { max_x: mid_x, max_y: mid_y, ..*self },
            Footprint { min_x: mid_x, max_y: mid_y, ..*self },
            Footprint { max_x: mid_x, min_y: mid_y, ..*self },
            Footprint { min_x: mid_x, min_y: mid_y, ..*self },
        ]
    }
}

/// True when every pair of corner colors is within the similarity tolerance.
fn corners_similar(corners: &[Color]) -> bool {
    corners.iter().enumerate().all(|(n, a)| {
        corners[n + 1..]
            .iter()
            .all(|b| a.is_similar(b, SIMILARITY_TOLERANCE))
    })
}

/// Forward and up unit vectors for an orientation.
fn resolve_orientation(
    location: Point,
    orientation: Orientation,
) -> Result<(Vector, Vector), CameraError> {
    match orientation {
        Orientation::Default => Ok((Vector::AXIS_Z, Vector::AXIS_Y)),
        Orientation::Axes { to, up } => {
            if !is_zero(to.dot(up)) {
                return Err(CameraError::NonOrthogonalAxes);
            }
            Ok((to.normalize(), up.normalize()))
        }
        Orientation::Target { target, up } => {
            let to = target
                .subtract(location)
                .map_err(|_| CameraError::AtTarget(target))?
                .normalize();
            let up = up.unwrap_or(Vector::AXIS_Y).normalize();
            if is_zero(to.dot(up)) {
                return Ok((to, up));
            }
            let corrected = to
                .cross(up)
                .and_then(|side| side.cross(to))
                .map_err(|_| CameraError::ParallelUp)?;
            Ok((to, corrected.normalize()))
        }
    }
}

/// Grid anti-aliasing needs a positive perfect-square sample count.
fn validate_sampling(settings: &RenderSettings) -> Result<(), CameraError> {
    if settings.anti_aliasing {
        let samples = settings.samples_per_pixel;
        let grid = grid_size(samples);
        if samples == 0 || grid * grid != samples {
            return Err(CameraError::InvalidSampleCount(samples));
        }
    }
    Ok(())
}

/// Side of the sub-pixel grid, `floor(sqrt(samples))`.
fn grid_size(samples: u32) -> u32 {
    (samples as f64).sqrt() as u32
}

#[cfg(test)]
mod tests {
    use lumen_core::{
        Geometry, Intersectable, Material, Plane, PointLight, Sphere, Triangle,
    };

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn integration_config() -> CameraConfig {
        CameraConfig::new()
            .with_target_up(Point::new(0.0, 0.0, -1.0), Vector::MINUS_Y)
            .with_vp_size(3.0, 3.0)
            .with_vp_distance(1.0)
            .with_resolution(3, 3)
    }

    fn camera1() -> Camera {
        integration_config().with_location(Point::ZERO).build().unwrap()
    }

    fn camera2() -> Camera {
        integration_config()
            .with_location(Point::new(0.0, 0.0, 0.5))
            .build()
            .unwrap()
    }

    fn count_intersections(camera: &Camera, geometry: &dyn Intersectable) -> usize {
        let mut count = 0;
        for i in 0..3 {
            for j in 0..3 {
                let ray = camera.construct_ray(3, 3, j as f64, i as f64);
                count += geometry.find_intersections(&ray).map_or(0, |hits| hits.len());
            }
        }
        count
    }

    fn sphere(center: Point, radius: f64) -> Geometry {
        Geometry::new(Sphere::new(center, radius))
    }

    fn plane(normal: Vector) -> Geometry {
        Geometry::new(Plane::new(Point::new(0.0, 0.0, -5.0), normal))
    }

    fn triangle(a: Point, b: Point, c: Point) -> Geometry {
        Geometry::new(Triangle::new(a, b, c).unwrap())
    }

    #[test]
    fn test_camera_sphere_integration() {
        let (c1, c2) = (camera1(), camera2());
        assert_eq!(count_intersections(&c1, &sphere(Point::new(0.0, 0.0, -3.0), 1.0)), 2);
        assert_eq!(count_intersections(&c2, &sphere(Point::new(0.0, 0.0, -2.5), 2.5)), 18);
        assert_eq!(count_intersections(&c2, &sphere(Point::new(0.0, 0.0, -2.0), 2.0)), 10);
        assert_eq!(count_intersections(&c2, &sphere(Point::new(0.0, 0.0, -1.0), 4.0)), 9);
        assert_eq!(count_intersections(&c1, &sphere(Point::new(0.0, 0.0, 1.0), 0.5)), 0);
    }

    #[test]
    fn test_camera_plane_integration() {
        let c1 = camera1();
        let v = |x, y, z| Vector::new(x, y, z).unwrap();
        assert_eq!(count_intersections(&c1, &plane(v(0.0, 0.0, 1.0))), 9);
        assert_eq!(count_intersections(&c1, &plane(v(0.0, 1.0, 2.0))), 9);
        assert_eq!(count_intersections(&c1, &plane(v(0.0, 1.0, 1.0))), 6);
    }

    #[test]
    fn test_camera_triangle_integration() {
        let c1 = camera1();
        let small = triangle(
            Point::new(1.0, 1.0, -2.0),
            Point::new(-1.0, 1.0, -2.0),
            Point::new(0.0, -1.0, -2.0),
        );
        let tall = triangle(
            Point::new(1.0, 1.0, -2.0),
            Point::new(-1.0, 1.0, -2.0),
            Point::new(0.0, -20.0, -2.0),
        );
        assert_eq!(count_intersections(&c1, &small), 1);
        assert_eq!(count_intersections(&c1, &tall), 2);
    }

    #[test]
    fn test_construct_ray_through_pixel_centers() {
        let camera = CameraConfig::new()
            .with_direction(Vector::MINUS_Z, Vector::AXIS_Y)
            .with_vp_size(8.0, 8.0)
            .with_vp_distance(10.0)
            .with_resolution(4, 4)
            .build()
            .unwrap();

        // 4x4 grid, pixel (0,0) center is at (-3, 3) on the view plane
        let ray = camera.construct_ray(4, 4, 0.0, 0.0);
        let expected = Vector::new(-3.0, 3.0, -10.0).unwrap().normalize();
        assert_eq!(ray.origin(), Point::ZERO);
        assert_eq!(ray.direction(), expected);
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);

        // odd grid: the middle pixel looks straight ahead
        let center = camera.construct_ray(3, 3, 1.0, 1.0);
        assert_eq!(center.direction(), Vector::MINUS_Z);
    }

    #[test]
    fn test_default_orientation() {
        let camera = CameraConfig::new()
            .with_vp_size(1.0, 1.0)
            .with_vp_distance(2.0)
            .build()
            .unwrap();
        assert_eq!(camera.to(), Vector::AXIS_Z);
        assert_eq!(camera.up(), Vector::AXIS_Y);
        assert_eq!(camera.right(), Vector::MINUS_X);
        assert_eq!(camera.center(), Point::new(0.0, 0.0, 2.0));
        assert_eq!(camera.resolution(), (1, 1));
    }

    #[test]
    fn test_target_corrects_up() {
        let camera = CameraConfig::new()
            .with_location(Point::new(0.0, 0.0, 10.0))
            .with_target_up(Point::ZERO, Vector::new(0.0, 1.0, 1.0).unwrap())
            .with_vp_size(1.0, 1.0)
            .with_vp_distance(1.0)
            .build()
            .unwrap();
        assert_eq!(camera.to(), Vector::MINUS_Z);
        assert_eq!(camera.up(), Vector::AXIS_Y);
        assert!(is_zero(camera.to().dot(camera.up())));
        assert!(is_zero(camera.right().dot(camera.up())));
    }

    #[test]
    fn test_missing_view_plane() {
        let err = CameraConfig::new().with_vp_distance(1.0).build().err();
        assert_eq!(err, Some(CameraError::MissingViewPlane));
    }

    #[test]
    fn test_missing_distance() {
        let err = CameraConfig::new().with_vp_size(1.0, 1.0).build().err();
        assert_eq!(err, Some(CameraError::MissingDistance));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = CameraConfig::new().with_vp_size(1.0, 1.0).with_vp_distance(1.0);

        let err = base.clone().with_vp_size(0.0, 1.0).build().err();
        assert!(matches!(err, Some(CameraError::InvalidViewPlane { .. })));

        let err = base.clone().with_vp_distance(-1.0).build().err();
        assert_eq!(err, Some(CameraError::InvalidDistance(-1.0)));

        let err = base.clone().with_resolution(0, 5).build().err();
        assert_eq!(
            err,
            Some(CameraError::InvalidResolution {
                width: 0,
                height: 5
            })
        );

        let err = base.clone().with_anti_aliasing(true, 10).build().err();
        assert_eq!(err, Some(CameraError::InvalidSampleCount(10)));

        let err = base.with_parallelism(Parallelism::Threads(0)).build().err();
        assert_eq!(err, Some(CameraError::InvalidThreadCount));
    }

    #[test]
    fn test_orientation_errors() {
        let base = CameraConfig::new().with_vp_size(1.0, 1.0).with_vp_distance(1.0);

        let err = base
            .clone()
            .with_direction(Vector::MINUS_Z, Vector::new(0.0, 1.0, 1.0).unwrap())
            .build()
            .err();
        assert_eq!(err, Some(CameraError::NonOrthogonalAxes));

        let target = Point::new(1.0, 2.0, 3.0);
        let err = base
            .clone()
            .with_location(target)
            .with_target(target)
            .build()
            .err();
        assert_eq!(err, Some(CameraError::AtTarget(target)));

        let err = base
            .with_target_up(Point::new(0.0, 5.0, 0.0), Vector::AXIS_Y)
            .build()
            .err();
        assert_eq!(err, Some(CameraError::ParallelUp));
    }

    #[test]
    fn test_render_without_tracer_fails() {
        let camera = integration_config().build().unwrap();
        let mut buffer = ImageBuffer::new(3, 3);
        assert!(matches!(
            camera.render_image(&mut buffer),
            Err(RenderError::MissingRayTracer)
        ));
    }

    fn lit_scene() -> Arc<Scene> {
        let mut scene = Scene::new("lit").with_background(Color::new(20.0, 20.0, 60.0));
        scene.add_geometry(
            sphere(Point::new(0.0, 0.0, -10.0), 4.0)
                .with_emission(Color::new(40.0, 0.0, 0.0))
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(30)),
        );
        scene.add_geometry(
            Geometry::new(Plane::new(Point::new(0.0, -4.0, 0.0), Vector::AXIS_Y))
                .with_material(Material::new().with_kd(0.4).with_kr(0.3)),
        );
        scene.add_light(PointLight::new(
            Color::new(300.0, 300.0, 300.0),
            Point::new(10.0, 10.0, 0.0),
        ));
        Arc::new(scene)
    }

    fn lit_camera(parallelism: Parallelism) -> Camera {
        CameraConfig::new()
            .with_direction(Vector::MINUS_Z, Vector::AXIS_Y)
            .with_vp_size(10.0, 10.0)
            .with_vp_distance(5.0)
            .with_resolution(24, 18)
            .with_ray_tracer(lit_scene(), RayTracerKind::Simple)
            .with_parallelism(parallelism)
            .build()
            .unwrap()
    }

    #[test]
    fn test_strategies_render_identical_images() {
        init();
        let sequential = lit_camera(Parallelism::Sequential).render_to_buffer().unwrap();
        let data_parallel = lit_camera(Parallelism::DataParallel)
            .render_to_buffer()
            .unwrap();
        let threads = lit_camera(Parallelism::Threads(3)).render_to_buffer().unwrap();

        assert_eq!(sequential, data_parallel);
        assert_eq!(sequential, threads);

        // the sphere is in view and differs from the background
        let center = sequential.get(12, 9);
        assert_ne!(center, Color::new(20.0, 20.0, 60.0));
    }

    #[test]
    fn test_parallelism_maps_to_schedule() {
        assert_eq!(lit_camera(Parallelism::Sequential).schedule, Schedule::Sequential);
        assert_eq!(lit_camera(Parallelism::DataParallel).schedule, Schedule::DataParallel);
        assert_eq!(lit_camera(Parallelism::Threads(3)).schedule, Schedule::Workers(3));

        let auto = lit_camera(Parallelism::Auto);
        assert!(matches!(auto.schedule, Schedule::Workers(n) if n >= 1));
        // settings keep what was configured
        assert_eq!(auto.settings().parallelism, Parallelism::Auto);
        assert_eq!(
            auto.render_to_buffer().unwrap(),
            lit_camera(Parallelism::Sequential).render_to_buffer().unwrap()
        );
    }

    #[test]
    fn test_uniform_scene_is_unchanged_by_sampling() {
        let scene = Arc::new(Scene::new("flat").with_background(Color::new(7.0, 8.0, 9.0)));
        let config = CameraConfig::new()
            .with_vp_size(2.0, 2.0)
            .with_vp_distance(1.0)
            .with_resolution(4, 4)
            .with_ray_tracer(scene, RayTracerKind::Simple);

        let grid = config
            .clone()
            .with_anti_aliasing(true, 9)
            .build()
            .unwrap()
            .render_to_buffer()
            .unwrap();
        let adaptive = config
            .with_adaptive_depth(3)
            .build()
            .unwrap()
            .render_to_buffer()
            .unwrap();

        for buffer in [grid, adaptive] {
            assert!(buffer.pixels.iter().all(|c| *c == Color::new(7.0, 8.0, 9.0)));
        }
    }

    fn silhouette_config() -> CameraConfig {
        let mut scene = Scene::new("silhouette");
        scene.add_geometry(
            Geometry::new(Sphere::new(Point::new(0.0, 0.0, -10.0), 3.0))
                .with_emission(Color::new(200.0, 200.0, 200.0)),
        );
        CameraConfig::new()
            .with_direction(Vector::MINUS_Z, Vector::AXIS_Y)
            .with_vp_size(10.0, 10.0)
            .with_vp_distance(10.0)
            .with_resolution(10, 10)
            .with_ray_tracer(Arc::new(scene), RayTracerKind::Simple)
    }

    fn is_blend(color: Color) -> bool {
        color.r() > 0.0 && color.r() < 200.0
    }

    #[test]
    fn test_grid_sampling_averages_edge_pixels() {
        let single = silhouette_config().build().unwrap().render_to_buffer().unwrap();
        let grid = silhouette_config()
            .with_anti_aliasing(true, 16)
            .build()
            .unwrap()
            .render_to_buffer()
            .unwrap();

        // single rays never blend
        assert!(!single.pixels.iter().any(|c| is_blend(*c)));
        assert!(grid.pixels.iter().any(|c| is_blend(*c)));

        // pixel (1, 5) straddles the rim: its center ray misses, some sub-rays hit
        assert_eq!(single.get(1, 5), Color::BLACK);
        let rim = grid.get(1, 5);
        assert!(is_blend(rim));
        assert_eq!(rim.r() % 12.5, 0.0);

        assert_eq!(grid.get(5, 5), Color::new(200.0, 200.0, 200.0));
        assert_eq!(grid.get(0, 0), Color::BLACK);
    }

    #[test]
    fn test_adaptive_sampling_blends_silhouette() {
        let camera = silhouette_config().with_adaptive_depth(2).build().unwrap();

        let buffer = camera.render_to_buffer().unwrap();
        let white = Color::new(200.0, 200.0, 200.0);
        assert_eq!(buffer.get(5, 5), white);
        assert_eq!(buffer.get(0, 0), Color::BLACK);
        // some pixel on the rim mixes sphere and background
        assert!(buffer
            .pixels
            .iter()
            .any(|c| *c != white && *c != Color::BLACK));
    }

    #[test]
    fn test_corner_similarity_is_pairwise() {
        let base = Color::new(100.0, 100.0, 100.0);
        assert!(corners_similar(&[base, base, base, base]));
        assert!(corners_similar(&[
            base,
            Color::new(100.4, 100.0, 100.0),
            Color::new(99.6, 100.0, 100.0),
            base,
        ]));
        // each corner is close to the first, but the outer two are 1.6 apart
        assert!(!corners_similar(&[
            base,
            Color::new(100.8, 100.0, 100.0),
            Color::new(99.2, 100.0, 100.0),
            base,
        ]));
        assert!(!corners_similar(&[base, base, base, Color::BLACK]));
    }

    #[test]
    fn test_print_grid() {
        let camera = integration_config()
            .with_resolution(5, 4)
            .build()
            .unwrap();
        let mut buffer = ImageBuffer::new(5, 4);
        camera.print_grid(&mut buffer, 2, Color::WHITE);

        assert_eq!(buffer.get(0, 1), Color::WHITE);
        assert_eq!(buffer.get(2, 3), Color::WHITE);
        assert_eq!(buffer.get(3, 2), Color::WHITE);
        assert_eq!(buffer.get(1, 1), Color::BLACK);
        assert_eq!(buffer.get(3, 3), Color::BLACK);
    }
}
