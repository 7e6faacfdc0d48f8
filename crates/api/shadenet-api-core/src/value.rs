//! Value: the 4-component literal carried by every socket, plus the RGB
//! `Spectrum` used for lobe weights and reflectances.
//! All numeric types use f32.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Four-component socket value (RGB plus an auxiliary channel).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Value(pub [f32; 4]);

impl Value {
    pub const ZERO: Value = Value([0.0; 4]);
    pub const ONE: Value = Value([1.0; 4]);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value([x, y, z, w])
    }

    /// Broadcast a scalar into every component.
    pub const fn splat(v: f32) -> Self {
        Value([v; 4])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    /// First three components as an RGB triple.
    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Value) -> Value {
        let mut out = [0.0f32; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] * other.0[i];
        }
        Value(out)
    }

    /// Component-wise linear interpolation, `t = 0` yields `self`.
    pub fn lerp(&self, other: &Value, t: f32) -> Value {
        let mut out = [0.0f32; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        Value(out)
    }
}

impl From<[f32; 4]> for Value {
    fn from(v: [f32; 4]) -> Self {
        Value(v)
    }
}

/// Linear RGB spectrum.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Spectrum {
    pub const BLACK: Spectrum = Spectrum::new(0.0, 0.0, 0.0);
    pub const WHITE: Spectrum = Spectrum::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Spectrum { r, g, b }
    }

    pub const fn splat(v: f32) -> Self {
        Spectrum::new(v, v, v)
    }

    /// True only when every channel is exactly zero.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

impl From<[f32; 3]> for Spectrum {
    fn from(c: [f32; 3]) -> Self {
        Spectrum::new(c[0], c[1], c[2])
    }
}

impl From<Value> for Spectrum {
    fn from(v: Value) -> Self {
        Spectrum::from(v.rgb())
    }
}

impl Mul for Spectrum {
    type Output = Spectrum;

    fn mul(self, rhs: Spectrum) -> Spectrum {
        Spectrum::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for Spectrum {
    type Output = Spectrum;

    fn mul(self, rhs: f32) -> Spectrum {
        Spectrum::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Add for Spectrum {
    type Output = Spectrum;

    fn add(self, rhs: Spectrum) -> Spectrum {
        Spectrum::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_treat_only_exact_zero_as_black() {
        assert!(Spectrum::BLACK.is_black());
        assert!(!Spectrum::new(0.0, 1e-30, 0.0).is_black());
        assert!(!Spectrum::new(-0.5, 0.0, 0.0).is_black());
    }

    #[test]
    fn it_should_lerp_componentwise() {
        let a = Value::new(0.0, 1.0, 2.0, 3.0);
        let b = Value::new(1.0, 1.0, 0.0, 3.0);
        assert_eq!(a.lerp(&b, 0.5), Value::new(0.5, 1.0, 1.0, 3.0));
        assert_eq!(a.lerp(&b, 0.0), a);
    }

    #[test]
    fn it_should_drop_alpha_when_converting_to_spectrum() {
        let s = Spectrum::from(Value::new(0.8, 0.7, 0.6, 0.1));
        assert_eq!(s, Spectrum::new(0.8, 0.7, 0.6));
    }
}
