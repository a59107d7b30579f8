// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legal user offsets and scroll edges.

use understory_zoom_geometry::{Insets, Offset, Rect, ScaleFactor, Size};

use crate::ZoomError;
use crate::placement::Placement;

/// Rules that bound the user offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetPolicy {
    /// Restrict panning to the part of the content that is visible at the
    /// base transform, instead of the whole content.
    pub limit_offset_within_base_visible_rect: bool,
    /// Extra room past each content edge, as a multiple of the container size.
    pub container_whitespace_multiple: f64,
    /// Extra room past each content edge, in container pixels.
    pub container_whitespace: Insets,
}

impl OffsetPolicy {
    /// Rejects a negative or non-finite whitespace multiple or insets.
    pub fn validate(self) -> Result<Self, ZoomError> {
        let multiple = self.container_whitespace_multiple;
        if !multiple.is_finite() || multiple < 0.0 {
            return Err(ZoomError::InvalidWhitespaceMultiple(multiple));
        }
        self.container_whitespace.validate()?;
        Ok(self)
    }

    /// Effective whitespace per edge: the larger of the multiple and the explicit insets.
    #[must_use]
    pub fn whitespace(&self, container: Size) -> Insets {
        let horizontal = container.width * self.container_whitespace_multiple;
        let vertical = container.height * self.container_whitespace_multiple;
        Insets::new(horizontal, vertical, horizontal, vertical).max(self.container_whitespace)
    }

    /// Legal range of the user offset at uniform `user_scale`.
    ///
    /// On an axis where the zoomed content overflows the container, its edges
    /// may move up to the whitespace inside the container edges. On an axis
    /// where it fits, the offset is pinned to the aligned position, so the
    /// rect collapses to a line or a point.
    #[must_use]
    pub fn user_offset_bounds(&self, placement: &Placement, user_scale: f64) -> Rect {
        if placement.is_empty() {
            return Rect::ZERO;
        }
        let reference = if self.limit_offset_within_base_visible_rect {
            placement.base_inside_display_rect()
        } else {
            placement.base_display_rect()
        };
        let scaled = reference.scale_by(ScaleFactor::uniform(user_scale));
        let container = placement.container_size;
        let whitespace = self.whitespace(container);
        let alignment = placement.alignment;
        let direction = placement.layout_direction;
        let (left, right) = axis_bounds(
            scaled.left,
            scaled.right,
            container.width,
            (whitespace.left, whitespace.right),
            |extent| alignment.align_horizontal(extent, container.width, direction),
        );
        let (top, bottom) = axis_bounds(
            scaled.top,
            scaled.bottom,
            container.height,
            (whitespace.top, whitespace.bottom),
            |extent| alignment.align_vertical(extent, container.height),
        );
        Rect::new(left, top, right, bottom)
    }
}

fn axis_bounds(
    start: f64,
    end: f64,
    space: f64,
    (whitespace_start, whitespace_end): (f64, f64),
    align: impl Fn(f64) -> f64,
) -> (f64, f64) {
    let extent = end - start;
    if extent > space {
        (space - end - whitespace_end, whitespace_start - start)
    } else {
        let pinned = align(extent) - start;
        (pinned, pinned)
    }
}

/// Offsets closer than this to a bound count as being at the bound.
const EDGE_TOLERANCE: f64 = 0.1;

/// Which edges of the content are reached on one axis.
///
/// `Start` is the left or top edge, in physical terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollEdge {
    /// Neither edge is reached.
    #[default]
    None,
    /// The left or top edge is reached.
    Start,
    /// The right or bottom edge is reached.
    End,
    /// Both edges are reached: the axis cannot scroll.
    Both,
}

impl ScrollEdge {
    /// Edge reached by `value` inside `[min, max]`.
    #[must_use]
    pub fn of(value: f64, min: f64, max: f64) -> Self {
        if max - min <= EDGE_TOLERANCE {
            Self::Both
        } else if value >= max - EDGE_TOLERANCE {
            Self::Start
        } else if value <= min + EDGE_TOLERANCE {
            Self::End
        } else {
            Self::None
        }
    }
}

/// A scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
}

/// Direction of a scroll request along an [`Axis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Towards the left or top edge of the content.
    Backward,
    /// Towards the right or bottom edge of the content.
    Forward,
}

/// Scroll edges on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollEdges {
    /// Horizontal edge.
    pub horizontal: ScrollEdge,
    /// Vertical edge.
    pub vertical: ScrollEdge,
}

impl ScrollEdges {
    /// Edges reached by `offset` inside `bounds`.
    #[must_use]
    pub fn new(offset: Offset, bounds: Rect) -> Self {
        Self {
            horizontal: ScrollEdge::of(offset.x, bounds.left, bounds.right),
            vertical: ScrollEdge::of(offset.y, bounds.top, bounds.bottom),
        }
    }

    /// Returns `true` if the content can still move to reveal more in `direction`.
    #[must_use]
    pub fn can_scroll(&self, axis: Axis, direction: ScrollDirection) -> bool {
        let edge = match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        };
        match (edge, direction) {
            (ScrollEdge::Both, _)
            | (ScrollEdge::Start, ScrollDirection::Backward)
            | (ScrollEdge::End, ScrollDirection::Forward) => false,
            _ => true,
        }
    }
}
