//! RGB radiance and per-channel coefficient triples.

use std::ops::{Add, AddAssign, Div, Mul};

use glam::DVec3;

use crate::is_zero;

/// A triple of doubles used for material coefficients and attenuation factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Double3(DVec3);

impl Double3 {
    pub const ZERO: Double3 = Double3(DVec3::ZERO);
    pub const ONE: Double3 = Double3(DVec3::ONE);

    pub const fn new(d1: f64, d2: f64, d3: f64) -> Self {
        Self(DVec3::new(d1, d2, d3))
    }

    /// The same value in all three components.
    pub const fn splat(value: f64) -> Self {
        Self(DVec3::splat(value))
    }

    #[inline]
    pub fn d1(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn d2(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn d3(&self) -> f64 {
        self.0.z
    }

    pub fn scale(&self, factor: f64) -> Double3 {
        Double3(self.0 * factor)
    }

    /// Component-wise product.
    pub fn product(&self, other: Double3) -> Double3 {
        Double3(self.0 * other.0)
    }

    /// True when every component is strictly below `k`.
    pub fn lower_than(&self, k: f64) -> bool {
        self.0.x < k && self.0.y < k && self.0.z < k
    }
}

impl From<f64> for Double3 {
    fn from(value: f64) -> Self {
        Double3::splat(value)
    }
}

impl Add for Double3 {
    type Output = Double3;

    fn add(self, rhs: Double3) -> Double3 {
        Double3(self.0 + rhs.0)
    }
}

impl Mul for Double3 {
    type Output = Double3;

    fn mul(self, rhs: Double3) -> Double3 {
        self.product(rhs)
    }
}

impl PartialEq for Double3 {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.0.x - other.0.x) && is_zero(self.0.y - other.0.y) && is_zero(self.0.z - other.0.z)
    }
}

/// RGB radiance on a 0..255 scale.
///
/// Values above 255 are legal (light intensities routinely exceed it); the
/// image sink clamps when converting to 8-bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color(DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);
    pub const WHITE: Color = Color(DVec3::splat(255.0));

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Multiply every channel by `factor`.
    pub fn scale(&self, factor: f64) -> Color {
        Color(self.0 * factor)
    }

    /// Multiply each channel by the matching coefficient.
    pub fn scale_by(&self, k: Double3) -> Color {
        Color(self.0 * k.0)
    }

    /// Divide every channel by `divisor`.
    pub fn reduce(&self, divisor: f64) -> Color {
        Color(self.0 / divisor)
    }

    /// True when every channel differs from `other` by less than `tolerance`.
    pub fn is_similar(&self, other: &Color, tolerance: f64) -> bool {
        (self.0 - other.0).abs().max_element() < tolerance
    }

    /// Channels clamped to 0..=255 and truncated to bytes.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.0.clamp(DVec3::ZERO, DVec3::splat(255.0));
        [c.x as u8, c.y as u8, c.z as u8]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scale(rhs)
    }
}

impl Mul<Double3> for Color {
    type Output = Color;

    fn mul(self, rhs: Double3) -> Color {
        self.scale_by(rhs)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Color {
        self.reduce(rhs)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        is_zero(self.0.x - other.0.x) && is_zero(self.0.y - other.0.y) && is_zero(self.0.z - other.0.z)
    }
}
