//! Error types for camera configuration and rendering.

use lumen_core::{GeometryError, LightError};
use lumen_math::Point;
use thiserror::Error;

/// Invalid camera configuration, reported by [`crate::CameraConfig::build`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("View plane size is not set")]
    MissingViewPlane,

    #[error("Distance to view plane is not set")]
    MissingDistance,

    #[error("View plane size must be positive, got {width} x {height}")]
    InvalidViewPlane { width: f64, height: f64 },

    #[error("Distance to view plane must be positive, got {0}")]
    InvalidDistance(f64),

    #[error("Resolution must be positive, got {width} x {height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Camera cannot be located at its target {0}")]
    AtTarget(Point),

    #[error("Direction vectors must be orthogonal")]
    NonOrthogonalAxes,

    #[error("Up vector cannot be parallel to the view direction")]
    ParallelUp,

    #[error("Samples per pixel must be a positive perfect square, got {0}")]
    InvalidSampleCount(u32),

    #[error("Thread count must be at least 1")]
    InvalidThreadCount,
}

/// Errors raised while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No ray tracer configured for the camera")]
    MissingRayTracer,

    #[error("A render worker thread panicked")]
    WorkerPanicked,

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Light error: {0}")]
    Light(#[from] LightError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
