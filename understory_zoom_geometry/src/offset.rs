// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{Add, Neg, Sub};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{Rect, Rotation, ScaleFactor, Size};

/// A 2D translation or point, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Sentinel for "no offset known yet".
    ///
    /// It is never valid inside a [`Transform`](crate::Transform).
    pub const UNSPECIFIED: Self = Self::new(f64::NAN, f64::NAN);

    /// Creates an offset.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `false` if either component is NaN.
    #[must_use]
    pub fn is_specified(self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Multiplies each component by the matching scale component.
    #[must_use]
    pub fn scale_by(self, scale: ScaleFactor) -> Self {
        Self::new(self.x * scale.scale_x, self.y * scale.scale_y)
    }

    /// Divides each component by the matching scale component.
    #[must_use]
    pub fn divide_by(self, scale: ScaleFactor) -> Self {
        Self::new(self.x / scale.scale_x, self.y / scale.scale_y)
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn times(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rounds both components to the nearest integer.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Maps a point inside a `space`-sized area into the area rotated clockwise
    /// by `rotation`.
    ///
    /// The rotated area has the size `space.rotate(rotation)` and its top-left
    /// corner stays at the origin.
    #[must_use]
    pub fn rotate_in_space(self, space: Size, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Deg0 => self,
            Rotation::Deg90 => Self::new(space.height - self.y, self.x),
            Rotation::Deg180 => Self::new(space.width - self.x, space.height - self.y),
            Rotation::Deg270 => Self::new(self.y, space.width - self.x),
        }
    }

    /// Exact inverse of [`Offset::rotate_in_space`] for the same `space` and `rotation`.
    #[must_use]
    pub fn reverse_rotate_in_space(self, space: Size, rotation: Rotation) -> Self {
        self.rotate_in_space(space.rotate(rotation), rotation.inverse())
    }

    /// Clamps each axis independently into `rect`.
    ///
    /// Never panics: if `rect` is inverted on an axis, its `left`/`top` edge wins.
    #[must_use]
    pub fn clamp_to_rect(self, rect: Rect) -> Self {
        Self::new(
            clamp_axis(self.x, rect.left, rect.right),
            clamp_axis(self.y, rect.top, rect.bottom),
        )
    }

    /// Clamps each axis independently into `[0, size]`.
    #[must_use]
    pub fn clamp_to_size(self, size: Size) -> Self {
        self.clamp_to_rect(Rect::from_size(size))
    }
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
