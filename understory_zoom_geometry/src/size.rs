// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{GeometryError, Offset, Rotation, ScaleFactor};

/// Width and height in pixels.
///
/// Used for the container (viewport), the current content (which may be a
/// low-resolution placeholder) and the content's original full-resolution
/// size. A size is *empty* when either dimension is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a size without validation.
    ///
    /// Prefer [`Size::try_new`] for values coming from outside the program.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Creates a size, rejecting negative, NaN and infinite dimensions.
    pub fn try_new(width: f64, height: f64) -> Result<Self, GeometryError> {
        if !width.is_finite() || !height.is_finite() {
            return Err(GeometryError::NonFiniteSize { width, height });
        }
        if width < 0.0 || height < 0.0 {
            return Err(GeometryError::NegativeSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Re-validates an already constructed size.
    pub fn validate(self) -> Result<Self, GeometryError> {
        Self::try_new(self.width, self.height)
    }

    /// Returns `true` when either dimension is not strictly positive.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Width divided by height, or `0.0` for an empty size.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Returns `true` if both sizes have aspect ratios within `delta` of each other.
    ///
    /// Empty sizes never share an aspect ratio with anything.
    #[must_use]
    pub fn is_same_aspect_ratio(self, other: Self, delta: f64) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.aspect_ratio() - other.aspect_ratio()).abs() <= delta
    }

    /// Swaps width and height for 90 and 270 degree rotations.
    #[must_use]
    pub fn rotate(self, rotation: Rotation) -> Self {
        if rotation.swaps_axes() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }

    /// Multiplies each dimension by the matching scale component.
    #[must_use]
    pub fn scale_by(self, scale: ScaleFactor) -> Self {
        Self::new(self.width * scale.scale_x, self.height * scale.scale_y)
    }

    /// Rounds both dimensions to the nearest integer.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.width.round(), self.height.round())
    }

    /// The point at the middle of a rect of this size anchored at the origin.
    #[must_use]
    pub fn center(self) -> Offset {
        Offset::new(self.width / 2.0, self.height / 2.0)
    }
}
