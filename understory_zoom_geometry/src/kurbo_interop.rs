// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between this crate's value types and Kurbo's.

use kurbo::{Point, Vec2};

use crate::{Offset, Rect, Size};

impl From<Size> for kurbo::Size {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<kurbo::Size> for Size {
    fn from(size: kurbo::Size) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<Offset> for Point {
    fn from(offset: Offset) -> Self {
        Self::new(offset.x, offset.y)
    }
}

impl From<Point> for Offset {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Offset> for Vec2 {
    fn from(offset: Offset) -> Self {
        Self::new(offset.x, offset.y)
    }
}

impl From<Vec2> for Offset {
    fn from(vec: Vec2) -> Self {
        Self::new(vec.x, vec.y)
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.left, rect.top, rect.right, rect.bottom)
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(rect: kurbo::Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}
