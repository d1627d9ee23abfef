//! Phong material coefficients.

use lumen_math::Double3;

/// Surface response coefficients for the Phong model plus the
/// reflection/transparency factors used for recursive rays.
///
/// Every coefficient is a per-channel triple. A scalar converts via
/// `Into<Double3>`, so `with_kd(0.5)` and `with_kd(Double3::new(..))`
/// both work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ka: Double3,

    /// Diffuse reflectance
    pub kd: Double3,

    /// Specular reflectance
    pub ks: Double3,

    /// Transparency (refraction without bending)
    pub kt: Double3,

    /// Mirror reflection
    pub kr: Double3,

    /// Phong specular exponent
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Double3::ONE,
            kd: Double3::ZERO,
            ks: Double3::ZERO,
            kt: Double3::ZERO,
            kr: Double3::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// Create a material with the default coefficients.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ka(mut self, ka: impl Into<Double3>) -> Self {
        self.ka = ka.into();
        self
    }

    pub fn with_kd(mut self, kd: impl Into<Double3>) -> Self {
        self.kd = kd.into();
        self
    }

    pub fn with_ks(mut self, ks: impl Into<Double3>) -> Self {
        self.ks = ks.into();
        self
    }

    pub fn with_kt(mut self, kt: impl Into<Double3>) -> Self {
        self.kt = kt.into();
        self
    }

    pub fn with_kr(mut self, kr: impl Into<Double3>) -> Self {
        self.kr = kr.into();
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }
}
