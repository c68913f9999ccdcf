//! 2D vector value type for physics calculations.

use core::ops::{Add, Mul, Neg, Sub};

use crate::error::{PhysicsError, Result};

/// Immutable 2D vector. Never holds a NaN component.
///
/// Fallible construction goes through [`Vec2::new`]. Components may be
/// infinite (world bounds use that), but the arithmetic operators expect
/// finite operands: `inf - inf` and `0 * inf` are the only ways to reach NaN
/// from non-NaN inputs. Everything fed into the engine is checked to be
/// finite before a frame runs. Division can produce NaN from finite inputs
/// (`0 / 0`), so it is exposed as the checked [`Vec2::div`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(f64, f64)", into = "(f64, f64)"))]
pub struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
    pub const INFINITY: Vec2 = Vec2 { x: f64::INFINITY, y: f64::INFINITY };
    pub const NEG_INFINITY: Vec2 = Vec2 { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };

    /// Create a new vector, rejecting NaN components.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if x.is_nan() || y.is_nan() {
            return Err(PhysicsError::InvalidVector { x, y });
        }
        Ok(Vec2 { x, y })
    }

    /// Compile-time constructor for constants. `x` and `y` must not be NaN.
    pub const fn constant(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Vector with both components set to `value`.
    pub fn splat(value: f64) -> Result<Self> {
        Self::new(value, value)
    }

    // Callers guarantee finite operands; see the type docs.
    fn raw(x: f64, y: f64) -> Self {
        debug_assert!(!x.is_nan() && !y.is_nan(), "vector arithmetic produced NaN");
        Vec2 { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn scale(self, k: f64) -> Self {
        Self::raw(self.x * k, self.y * k)
    }

    /// Divide both components by `k`, failing if the result is NaN.
    pub fn div(self, k: f64) -> Result<Self> {
        Self::new(self.x / k, self.y / k)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        libm::sqrt(self.length_sq())
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::raw(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::raw(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamp each component into `[lo, hi]`, applying the upper bound first.
    ///
    /// Unlike `f64::clamp` this never panics when `lo > hi`; the lower bound
    /// wins in that case.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.min(hi).max(lo)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::raw(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl TryFrom<(f64, f64)> for Vec2 {
    type Error = PhysicsError;

    fn try_from((x, y): (f64, f64)) -> Result<Self> {
        Vec2::new(x, y)
    }
}

impl From<Vec2> for (f64, f64) {
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y).unwrap()
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            Vec2::new(f64::NAN, 1.0),
            Err(PhysicsError::InvalidVector { .. })
        ));
        assert!(Vec2::new(0.0, f64::NAN).is_err());
        assert!(Vec2::new(f64::INFINITY, 0.0).is_ok());
    }

    #[test]
    fn finiteness() {
        assert!(v(1.0, -2.0).is_finite());
        assert!(!Vec2::INFINITY.is_finite());
        assert!(!v(0.0, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn add_is_commutative() {
        let a = v(1.5, -2.0);
        let b = v(-7.25, 3.0);
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn sub_self_is_zero() {
        let a = v(3.0, -4.0);
        assert_eq!(a - a, Vec2::ZERO);
    }

    #[test]
    fn scale_then_unscale() {
        let a = v(0.3, -12.5);
        for k in [0.1, 3.0, -2.5, 1e6] {
            let back = a.scale(k).scale(1.0 / k);
            assert!((back.x() - a.x()).abs() < 1e-9);
            assert!((back.y() - a.y()).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_over_zero_fails() {
        assert!(Vec2::ZERO.div(0.0).is_err());
        let d = v(4.0, 2.0).div(2.0).unwrap();
        assert_eq!(d, v(2.0, 1.0));
    }

    #[test]
    fn length_and_distance() {
        assert!((v(3.0, 4.0).length() - 5.0).abs() < 1e-12);
        assert!((v(1.0, 1.0).distance(v(4.0, 5.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn componentwise_min_max() {
        let a = v(1.0, 5.0);
        let b = v(3.0, 2.0);
        assert_eq!(a.min(b), v(1.0, 2.0));
        assert_eq!(a.max(b), v(3.0, 5.0));
    }

    #[test]
    fn clamp_with_infinite_bounds() {
        let p = v(-5.0, 1e9);
        assert_eq!(p.clamp(Vec2::NEG_INFINITY, Vec2::INFINITY), p);
        assert_eq!(p.clamp(Vec2::ZERO, v(10.0, 10.0)), v(0.0, 10.0));
    }
}
