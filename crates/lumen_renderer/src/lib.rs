//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Turns a [`lumen_core::Scene`] into an image: a [`Camera`] generates
//! primary rays, a [`RayTracer`] shades them recursively with ambient,
//! Phong, shadow, reflection and refraction terms, and an [`ImageSink`]
//! receives the finished pixels.
//!
//! Pixels can be rendered sequentially, with rayon data parallelism, or on
//! an explicit pool of worker threads; all strategies produce identical
//! images.

mod camera;
mod error;
mod output;
mod progress;
mod settings;
mod tracer;

pub use camera::{Camera, CameraConfig};
pub use error::{CameraError, RenderError};
pub use output::{ImageBuffer, ImageSink, ImageWriter};
pub use progress::PixelManager;
pub use settings::{Parallelism, RenderSettings};
pub use tracer::{RayTracer, RayTracerKind, SimpleRayTracer, TraceLimits};
