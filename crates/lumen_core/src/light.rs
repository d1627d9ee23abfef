//! Light sources.
//!
//! [`AmbientLight`] is a constant fill term. Everything else implements
//! [`LightSource`], which the shader queries per surface point.

use std::fmt::Debug;

use lumen_math::{align_zero, Color, Double3, Point, Vector};

use crate::error::LightError;

/// Uniform ambient illumination, `intensity * ka` at every point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }

    /// Ambient light of `color` pre-scaled by a per-channel factor.
    pub fn scaled(color: Color, k: impl Into<Double3>) -> Self {
        Self {
            intensity: color.scale_by(k.into()),
        }
    }

    #[inline]
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light that illuminates points individually.
pub trait LightSource: Send + Sync + Debug {
    /// Radiance arriving at `point`.
    fn intensity_at(&self, point: Point) -> Result<Color, LightError>;

    /// Unit direction from the light towards `point`.
    fn incidence(&self, point: Point) -> Result<Vector, LightError>;

    /// Distance from the light to `point`; infinite for directional lights.
    fn distance(&self, point: Point) -> Result<f64, LightError>;
}

/// Light arriving from a fixed direction with constant intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point) -> Result<Color, LightError> {
        Ok(self.intensity)
    }

    fn incidence(&self, _point: Point) -> Result<Vector, LightError> {
        Ok(self.direction)
    }

    fn distance(&self, _point: Point) -> Result<f64, LightError> {
        Ok(f64::INFINITY)
    }
}

/// An omnidirectional light with distance attenuation
/// `1 / (kc + kl*d + kq*d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Unattenuated point light (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Result<Color, LightError> {
        let d = self.distance(point)?;
        Ok(self.intensity.reduce(self.kc + self.kl * d + self.kq * d * d))
    }

    fn incidence(&self, point: Point) -> Result<Vector, LightError> {
        point
            .subtract(self.position)
            .map(|v| v.normalize())
            .map_err(|_| LightError::AtLightPosition(point))
    }

    fn distance(&self, point: Point) -> Result<f64, LightError> {
        if point == self.position {
            return Err(LightError::AtLightPosition(point));
        }
        Ok(self.position.distance(point))
    }
}

/// A point light focused along a direction.
///
/// Intensity falls off as `max(0, dir·l)^beam` on top of the point-light
/// attenuation. The beam exponent defaults to 1; larger values narrow the
/// cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            beam: 1.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Set the beam narrowness exponent. Negative values fall back to 1.
    pub fn with_beam_exponent(mut self, beam: f64) -> Self {
        if beam < 0.0 {
            log::warn!("Negative spot beam exponent {beam}, using 1");
            self.beam = 1.0;
        } else {
            self.beam = beam;
        }
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.light.position()
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    #[inline]
    pub fn beam_exponent(&self) -> f64 {
        self.beam
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Result<Color, LightError> {
        let cos = align_zero(self.direction.dot(self.light.incidence(point)?));
        if cos <= 0.0 {
            return Ok(Color::BLACK);
        }
        Ok(self.light.intensity_at(point)? * cos.powf(self.beam))
    }

    fn incidence(&self, point: Point) -> Result<Vector, LightError> {
        self.light.incidence(point)
    }

    fn distance(&self, point: Point) -> Result<f64, LightError> {
        self.light.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_100: Color = Color::new(100.0, 100.0, 100.0);

    #[test]
    fn test_ambient_scaled() {
        let ambient = AmbientLight::scaled(Color::new(200.0, 100.0, 50.0), 0.5);
        assert_eq!(ambient.intensity(), Color::new(100.0, 50.0, 25.0));
        assert_eq!(AmbientLight::default(), AmbientLight::NONE);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(WHITE_100, Vector::new(0.0, 0.0, -2.0).unwrap());
        let p = Point::new(5.0, 5.0, 5.0);
        assert_eq!(light.intensity_at(p).unwrap(), WHITE_100);
        assert_eq!(light.incidence(p).unwrap(), Vector::MINUS_Z);
        assert_eq!(light.distance(p).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(WHITE_100, Point::ZERO)
            .with_kc(1.0)
            .with_kl(0.5)
            .with_kq(0.25);
        let p = Point::new(0.0, 0.0, 2.0);

        // 1 + 0.5*2 + 0.25*4 = 3
        assert_eq!(light.intensity_at(p).unwrap(), WHITE_100.reduce(3.0));
        assert_eq!(light.incidence(p).unwrap(), Vector::AXIS_Z);
        assert_eq!(light.distance(p).unwrap(), 2.0);
    }

    #[test]
    fn test_point_light_default_is_unattenuated() {
        let light = PointLight::new(WHITE_100, Point::ZERO);
        assert_eq!(light.intensity_at(Point::new(7.0, 0.0, 0.0)).unwrap(), WHITE_100);
    }

    #[test]
    fn test_point_light_at_own_position() {
        let position = Point::new(1.0, 2.0, 3.0);
        let light = PointLight::new(WHITE_100, position);
        let expected = LightError::AtLightPosition(position);
        assert_eq!(light.incidence(position).unwrap_err(), expected);
        assert_eq!(light.intensity_at(position).unwrap_err(), expected);
        assert_eq!(light.distance(position).unwrap_err(), expected);
    }

    #[test]
    fn test_spot_light_at_own_position() {
        let position = Point::new(-4.0, 0.0, 2.0);
        let light = SpotLight::new(WHITE_100, position, Vector::MINUS_Y);
        let expected = LightError::AtLightPosition(position);
        assert_eq!(light.intensity_at(position).unwrap_err(), expected);
        assert_eq!(light.distance(position).unwrap_err(), expected);
    }

    #[test]
    fn test_spot_light_facing_point() {
        let light = SpotLight::new(WHITE_100, Point::ZERO, Vector::AXIS_Z);
        let on_axis = Point::new(0.0, 0.0, 5.0);
        assert_eq!(light.intensity_at(on_axis).unwrap(), WHITE_100);

        let oblique = Point::new(5.0, 0.0, 5.0);
        let cos = std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(light.intensity_at(oblique).unwrap(), WHITE_100 * cos);
    }

    #[test]
    fn test_spot_light_facing_away() {
        let light = SpotLight::new(WHITE_100, Point::ZERO, Vector::AXIS_Z);
        let behind = Point::new(0.0, 0.0, -5.0);
        assert_eq!(light.intensity_at(behind).unwrap(), Color::BLACK);

        let beside = Point::new(5.0, 0.0, 0.0);
        assert_eq!(light.intensity_at(beside).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_spot_light_narrow_beam() {
        let light = SpotLight::new(WHITE_100, Point::ZERO, Vector::AXIS_Z).with_beam_exponent(2.0);
        let oblique = Point::new(5.0, 0.0, 5.0);
        assert_eq!(light.intensity_at(oblique).unwrap(), WHITE_100 * 0.5);
    }

    #[test]
    fn test_spot_light_negative_beam_falls_back() {
        let light = SpotLight::new(WHITE_100, Point::ZERO, Vector::AXIS_Z).with_beam_exponent(-3.0);
        assert_eq!(light.beam_exponent(), 1.0);
    }
}
