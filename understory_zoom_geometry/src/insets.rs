// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::GeometryError;

/// Per-edge distances, used for container whitespace.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// Distance from the left edge.
    pub left: f64,
    /// Distance from the top edge.
    pub top: f64,
    /// Distance from the right edge.
    pub right: f64,
    /// Distance from the bottom edge.
    pub bottom: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates insets from per-edge values.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates insets with the same value on every edge.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates insets, rejecting negative or non-finite edges.
    pub fn try_new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, GeometryError> {
        for (width, height) in [(left, top), (right, bottom)] {
            if !width.is_finite() || !height.is_finite() {
                return Err(GeometryError::NonFiniteSize { width, height });
            }
            if width < 0.0 || height < 0.0 {
                return Err(GeometryError::NegativeSize { width, height });
            }
        }
        Ok(Self::new(left, top, right, bottom))
    }

    /// Re-validates already constructed insets.
    pub fn validate(self) -> Result<Self, GeometryError> {
        Self::try_new(self.left, self.top, self.right, self.bottom)
    }

    /// Per-edge maximum of two insets.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Returns `true` if every edge is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}
