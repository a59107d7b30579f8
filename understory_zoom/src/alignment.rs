// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use understory_zoom_geometry::{Offset, Size};

/// Reading direction used to resolve `Start`/`End` on the horizontal axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left to right: `Start` is the left edge.
    #[default]
    Ltr,
    /// Right to left: `Start` is the right edge.
    Rtl,
}

/// Horizontal placement of content inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Leading edge (left in LTR, right in RTL).
    Start,
    /// Centered.
    #[default]
    Center,
    /// Trailing edge (right in LTR, left in RTL).
    End,
}

/// Vertical placement of content inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Bottom edge.
    Bottom,
}

/// One of the nine placements of content inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// Horizontal component.
    pub horizontal: HorizontalAlignment,
    /// Vertical component.
    pub vertical: VerticalAlignment,
}

impl Alignment {
    /// Top, leading edge.
    pub const TOP_START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Top);
    /// Top, centered horizontally.
    pub const TOP_CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Top);
    /// Top, trailing edge.
    pub const TOP_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Top);
    /// Centered vertically, leading edge.
    pub const CENTER_START: Self =
        Self::new(HorizontalAlignment::Start, VerticalAlignment::Center);
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Center);
    /// Centered vertically, trailing edge.
    pub const CENTER_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Center);
    /// Bottom, leading edge.
    pub const BOTTOM_START: Self =
        Self::new(HorizontalAlignment::Start, VerticalAlignment::Bottom);
    /// Bottom, centered horizontally.
    pub const BOTTOM_CENTER: Self =
        Self::new(HorizontalAlignment::Center, VerticalAlignment::Bottom);
    /// Bottom, trailing edge.
    pub const BOTTOM_END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Bottom);

    /// All nine alignments, row by row.
    pub const ALL: [Self; 9] = [
        Self::TOP_START,
        Self::TOP_CENTER,
        Self::TOP_END,
        Self::CENTER_START,
        Self::CENTER,
        Self::CENTER_END,
        Self::BOTTOM_START,
        Self::BOTTOM_CENTER,
        Self::BOTTOM_END,
    ];

    /// Creates an alignment from its components.
    #[must_use]
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Returns the top-left position of `size` placed inside `space`.
    ///
    /// Positions are rounded to whole pixels, half away from zero.
    #[must_use]
    pub fn align(self, size: Size, space: Size, direction: LayoutDirection) -> Offset {
        Offset::new(
            self.align_horizontal(size.width, space.width, direction),
            self.align_vertical(size.height, space.height),
        )
    }

    /// Horizontal position of an extent of `size` inside `space`.
    #[must_use]
    pub fn align_horizontal(self, size: f64, space: f64, direction: LayoutDirection) -> f64 {
        let bias = match (self.horizontal, direction) {
            (HorizontalAlignment::Start, LayoutDirection::Ltr)
            | (HorizontalAlignment::End, LayoutDirection::Rtl) => -1.0,
            (HorizontalAlignment::Center, _) => 0.0,
            (HorizontalAlignment::End, LayoutDirection::Ltr)
            | (HorizontalAlignment::Start, LayoutDirection::Rtl) => 1.0,
        };
        align_axis(size, space, bias)
    }

    /// Vertical position of an extent of `size` inside `space`.
    #[must_use]
    pub fn align_vertical(self, size: f64, space: f64) -> f64 {
        let bias = match self.vertical {
            VerticalAlignment::Top => -1.0,
            VerticalAlignment::Center => 0.0,
            VerticalAlignment::Bottom => 1.0,
        };
        align_axis(size, space, bias)
    }

    /// Returns `true` if content is pinned to the physical left edge.
    #[must_use]
    pub fn is_left(self, direction: LayoutDirection) -> bool {
        matches!(
            (self.horizontal, direction),
            (HorizontalAlignment::Start, LayoutDirection::Ltr)
                | (HorizontalAlignment::End, LayoutDirection::Rtl)
        )
    }
}

fn align_axis(size: f64, space: f64, bias: f64) -> f64 {
    let center = (space - size) / 2.0;
    // Adding 0.0 turns a -0.0 result into +0.0.
    (center * (1.0 + bias)).round() + 0.0
}
