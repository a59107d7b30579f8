// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Offset, Size};

/// A pivot point expressed as fractions of the container size.
///
/// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal fraction of the container width.
    pub pivot_fraction_x: f64,
    /// Vertical fraction of the container height.
    pub pivot_fraction_y: f64,
}

impl TransformOrigin {
    /// The top-left corner.
    pub const TOP_START: Self = Self::new(0.0, 0.0);
    /// The center.
    pub const CENTER: Self = Self::new(0.5, 0.5);

    /// Creates an origin from fractions.
    #[must_use]
    pub const fn new(pivot_fraction_x: f64, pivot_fraction_y: f64) -> Self {
        Self {
            pivot_fraction_x,
            pivot_fraction_y,
        }
    }

    /// Returns the origin that lands on `point` inside `container`.
    ///
    /// An empty container, or a ratio that overflows, yields
    /// [`TransformOrigin::TOP_START`].
    #[must_use]
    pub fn from_point(point: Offset, container: Size) -> Self {
        if container.is_empty() {
            return Self::TOP_START;
        }
        let origin = Self::new(point.x / container.width, point.y / container.height);
        if origin.pivot_fraction_x.is_finite() && origin.pivot_fraction_y.is_finite() {
            origin
        } else {
            Self::TOP_START
        }
    }

    /// Resolves the pivot to a point inside `container`.
    #[must_use]
    pub fn pivot_in(self, container: Size) -> Offset {
        Offset::new(
            self.pivot_fraction_x * container.width,
            self.pivot_fraction_y * container.height,
        )
    }
}
