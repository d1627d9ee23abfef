//! Error types for scene construction and light queries.

use lumen_math::Point;
use thiserror::Error;

/// Errors raised while constructing or querying geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Geometry cannot be defined by coincident points")]
    CoincidentPoints,

    #[error("Geometry cannot be defined by collinear points")]
    CollinearPoints,

    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("All polygon vertices must lie in the same plane")]
    NonPlanarVertices,

    #[error("Polygon vertices must be ordered and the polygon must be convex")]
    NonConvexPolygon,

    #[error("Surface normal is undefined at {0}")]
    DegenerateNormal(Point),
}

/// Errors raised by light sources.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("Light queried at its own position {0}")]
    AtLightPosition(Point),
}

/// Convenience alias for geometry results.
pub type GeometryResult<T> = Result<T, GeometryError>;
