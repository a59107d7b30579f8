// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::{Offset, Rotation, ScaleFactor, Size};

/// An axis-aligned rectangle given by its edges.
///
/// Rectangles produced by this crate are normalized (`left <= right`,
/// `top <= bottom`). An empty intersection collapses to a zero-area rect
/// rather than inverting. The algebra is [`kurbo::Rect`]'s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// The zero rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a rect from its edges, as given.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rect with its top-left corner at `origin`.
    #[must_use]
    pub fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Creates a rect at the origin covering `size`.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Creates the smallest normalized rect containing both points.
    #[must_use]
    pub fn from_points(a: Offset, b: Offset) -> Self {
        kurbo::Rect::from_points(Point::from(a), Point::from(b)).into()
    }

    fn to_kurbo(self) -> kurbo::Rect {
        self.into()
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.to_kurbo().width()
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.to_kurbo().height()
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn bottom_right(&self) -> Offset {
        Offset::new(self.right, self.bottom)
    }

    /// Midpoint.
    #[must_use]
    pub fn center(&self) -> Offset {
        self.to_kurbo().center().into()
    }

    /// Returns `true` if the rect has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    /// Moves the rect by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Offset) -> Self {
        (self.to_kurbo() + Vec2::from(offset)).into()
    }

    /// Scales every edge about the origin.
    #[must_use]
    pub fn scale_by(&self, scale: ScaleFactor) -> Self {
        Self::new(
            self.left * scale.scale_x,
            self.top * scale.scale_y,
            self.right * scale.scale_x,
            self.bottom * scale.scale_y,
        )
    }

    /// Divides every edge by the matching scale component.
    #[must_use]
    pub fn divide_by(&self, scale: ScaleFactor) -> Self {
        Self::new(
            self.left / scale.scale_x,
            self.top / scale.scale_y,
            self.right / scale.scale_x,
            self.bottom / scale.scale_y,
        )
    }

    /// Overlap of two rects.
    ///
    /// Disjoint rects produce a zero-area rect anchored at the overlap's
    /// top-left corner.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        self.to_kurbo().intersect(other.to_kurbo()).into()
    }

    /// Clamps every edge into `[0, size]`.
    #[must_use]
    pub fn limit_to(&self, size: Size) -> Self {
        let bounds = Self::from_size(size);
        let top_left = self.top_left().clamp_to_rect(bounds);
        let bottom_right = self.bottom_right().clamp_to_rect(bounds);
        Self::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Rounds every edge to the nearest integer.
    #[must_use]
    pub fn round(&self) -> Self {
        self.to_kurbo().round().into()
    }

    /// Rotates the rect inside a `space`-sized area; see [`Offset::rotate_in_space`].
    #[must_use]
    pub fn rotate_in_space(&self, space: Size, rotation: Rotation) -> Self {
        Self::from_points(
            self.top_left().rotate_in_space(space, rotation),
            self.bottom_right().rotate_in_space(space, rotation),
        )
    }

    /// Exact inverse of [`Rect::rotate_in_space`] for the same `space` and `rotation`.
    #[must_use]
    pub fn reverse_rotate_in_space(&self, space: Size, rotation: Rotation) -> Self {
        Self::from_points(
            self.top_left().reverse_rotate_in_space(space, rotation),
            self.bottom_right().reverse_rotate_in_space(space, rotation),
        )
    }
}
