//! Lumen Math - vector algebra for the Lumen ray tracer.
//!
//! Double precision points, non-zero vectors, rays and color triples built on
//! top of `glam::DVec3`. All degeneracy checks go through [`is_zero`], which
//! inspects the floating-point exponent instead of using a fixed epsilon.

mod color;
mod error;
mod interval;
mod point;
mod ray;
mod util;
mod vector;

pub use color::{Color, Double3};
pub use error::{MathError, MathResult};
pub use interval::Interval;
pub use point::Point;
pub use ray::{Ray, DELTA};
pub use util::{align_zero, is_zero, same_sign};
pub use vector::Vector;

// Re-export glam's double vector for numeric code
pub use glam::DVec3;
