// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Horizontal and vertical scale multipliers.
///
/// Most fits scale uniformly; `FillBounds` style fits scale each axis
/// independently, which is why both components are kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor {
    /// Horizontal multiplier.
    pub scale_x: f64,
    /// Vertical multiplier.
    pub scale_y: f64,
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl ScaleFactor {
    /// The identity scale.
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Sentinel for "no scale known yet".
    ///
    /// It is never valid inside a [`Transform`](crate::Transform).
    pub const UNSPECIFIED: Self = Self::new(f64::NAN, f64::NAN);

    /// Creates a scale factor.
    #[must_use]
    pub const fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Creates a scale factor with the same multiplier on both axes.
    #[must_use]
    pub const fn uniform(scale: f64) -> Self {
        Self::new(scale, scale)
    }

    /// Returns `false` if either component is NaN.
    #[must_use]
    pub fn is_specified(self) -> bool {
        !self.scale_x.is_nan() && !self.scale_y.is_nan()
    }

    /// Returns `true` if both components are finite and non-zero.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.scale_x.is_finite()
            && self.scale_y.is_finite()
            && self.scale_x != 0.0
            && self.scale_y != 0.0
    }

    /// Component-wise product.
    #[must_use]
    pub fn times(self, other: Self) -> Self {
        Self::new(self.scale_x * other.scale_x, self.scale_y * other.scale_y)
    }

    /// Component-wise quotient.
    #[must_use]
    pub fn divide_by(self, other: Self) -> Self {
        Self::new(self.scale_x / other.scale_x, self.scale_y / other.scale_y)
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn scale_by(self, factor: f64) -> Self {
        Self::new(self.scale_x * factor, self.scale_y * factor)
    }
}
