use std::fmt;
use std::ops::Neg;

use glam::DVec3;

use crate::{is_zero, MathError, MathResult};

/// A non-zero direction or displacement in 3D space.
///
/// The zero vector is unrepresentable: every constructor and every operation
/// that could cancel out to zero returns [`MathError::ZeroVector`] instead.
#[derive(Debug, Clone, Copy)]
pub struct Vector(pub(crate) DVec3);

impl Vector {
    pub const AXIS_X: Vector = Vector(DVec3::X);
    pub const AXIS_Y: Vector = Vector(DVec3::Y);
    pub const AXIS_Z: Vector = Vector(DVec3::Z);
    pub const MINUS_X: Vector = Vector(DVec3::NEG_X);
    pub const MINUS_Y: Vector = Vector(DVec3::NEG_Y);
    pub const MINUS_Z: Vector = Vector(DVec3::NEG_Z);

    /// Create a vector from its components.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::try_from(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn xyz(&self) -> DVec3 {
        self.0
    }

    pub fn add(&self, other: Vector) -> MathResult<Vector> {
        Self::try_from(self.0 + other.0)
    }

    pub fn subtract(&self, other: Vector) -> MathResult<Vector> {
        Self::try_from(self.0 - other.0)
    }

    /// Multiply by a scalar. Scaling by (near) zero fails.
    pub fn scale(&self, scalar: f64) -> MathResult<Vector> {
        Self::try_from(self.0 * scalar)
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Fails for parallel vectors.
    pub fn cross(&self, other: Vector) -> MathResult<Vector> {
        Self::try_from(self.0.cross(other.0))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Unit vector with the same direction.
    #[inline]
    pub fn normalize(&self) -> Vector {
        Vector(self.0 / self.0.length())
    }

    /// Mirror this vector about the plane whose normal is `normal`.
    ///
    /// `r = v - 2(v·n)n` with `n` normalized preserves length, so the result
    /// is never zero.
    pub fn reflect(&self, normal: Vector) -> Vector {
        let n = normal.normalize().0;
        Vector(self.0 - 2.0 * self.0.dot(n) * n)
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(xyz: DVec3) -> MathResult<Self> {
        if is_zero(xyz.x) && is_zero(xyz.y) && is_zero(xyz.z) {
            Err(MathError::ZeroVector)
        } else {
            Ok(Self(xyz))
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.0.x - other.0.x) && is_zero(self.0.y - other.0.y) && is_zero(self.0.z - other.0.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "->({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
