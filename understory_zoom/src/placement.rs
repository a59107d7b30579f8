// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base placement of content inside a container.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use understory_zoom_geometry::{
    Offset, Rect, Rotation, ScaleFactor, Size, Transform, TransformOrigin,
};

use crate::{Alignment, FitMode, LayoutDirection};

/// Everything needed to place content in a container before any user zoom.
///
/// The base mapping from content to container coordinates is
/// `alignment_offset + scale_factor * rotate_in_space(point)`; the
/// [`base_transform`](Self::base_transform) expresses the same mapping with
/// graphics-layer semantics.
///
/// When the container or the content is empty, the placement degrades to the
/// identity mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Size of the viewport.
    pub container_size: Size,
    /// Size of the content before rotation.
    pub content_size: Size,
    /// How content is fitted to the container.
    pub fit_mode: FitMode,
    /// Where fitted content sits inside the container.
    pub alignment: Alignment,
    /// Direction used to resolve horizontal alignment.
    pub layout_direction: LayoutDirection,
    /// Quarter-turn rotation applied to the content.
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a placement with the default fit mode, alignment, direction and no rotation.
    #[must_use]
    pub fn new(container_size: Size, content_size: Size) -> Self {
        Self {
            container_size,
            content_size,
            fit_mode: FitMode::default(),
            alignment: Alignment::default(),
            layout_direction: LayoutDirection::default(),
            rotation: Rotation::default(),
        }
    }

    /// Returns a copy with a different fit mode.
    #[must_use]
    pub fn with_fit_mode(self, fit_mode: FitMode) -> Self {
        Self { fit_mode, ..self }
    }

    /// Returns a copy with a different alignment.
    #[must_use]
    pub fn with_alignment(self, alignment: Alignment) -> Self {
        Self { alignment, ..self }
    }

    /// Returns a copy with a different layout direction.
    #[must_use]
    pub fn with_layout_direction(self, layout_direction: LayoutDirection) -> Self {
        Self {
            layout_direction,
            ..self
        }
    }

    /// Returns a copy with a different rotation.
    #[must_use]
    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Returns `true` when either the container or the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container_size.is_empty() || self.content_size.is_empty()
    }

    /// Content size after rotation.
    #[must_use]
    pub fn rotated_content_size(&self) -> Size {
        self.content_size.rotate(self.rotation)
    }

    /// Scale that fits the rotated content according to the fit mode.
    #[must_use]
    pub fn scale_factor(&self) -> ScaleFactor {
        self.fit_mode
            .scale_factor(self.rotated_content_size(), self.container_size)
    }

    /// Uniform scale at which the whole rotated content is visible.
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        FitMode::Fit
            .scale_factor(self.rotated_content_size(), self.container_size)
            .scale_x
    }

    /// Rotated content size at the base scale, rounded to whole pixels.
    #[must_use]
    pub fn scaled_rotated_content_size(&self) -> Size {
        self.rotated_content_size()
            .scale_by(self.scale_factor())
            .round()
    }

    /// Compensates for rotating about the content center instead of about
    /// the rotated content's top-left corner.
    ///
    /// Zero unless the rotation swaps axes.
    #[must_use]
    pub fn rotate_rectify_offset(&self) -> Offset {
        if self.is_empty() {
            return Offset::ZERO;
        }
        let rotated = self.rotated_content_size();
        Offset::new(
            (rotated.width - self.content_size.width) / 2.0,
            (rotated.height - self.content_size.height) / 2.0,
        )
        .scale_by(self.scale_factor())
    }

    /// Top-left corner of the placed content in container coordinates.
    #[must_use]
    pub fn alignment_offset(&self) -> Offset {
        if self.is_empty() {
            return Offset::ZERO;
        }
        self.alignment.align(
            self.scaled_rotated_content_size(),
            self.container_size,
            self.layout_direction,
        )
    }

    /// Pivot for the base rotation: the content center as a fraction of the container.
    #[must_use]
    pub fn rotation_origin(&self) -> TransformOrigin {
        TransformOrigin::from_point(self.content_size.center(), self.container_size)
    }

    /// The base transform, or [`Transform::IDENTITY`] for an empty placement.
    #[must_use]
    pub fn base_transform(&self) -> Transform {
        if self.is_empty() {
            return Transform::IDENTITY;
        }
        Transform::new(
            self.scale_factor(),
            self.alignment_offset() + self.rotate_rectify_offset(),
        )
        .with_rotation(f64::from(self.rotation))
        .with_rotation_origin(self.rotation_origin())
    }

    /// Where the content lands in the container at the base transform.
    #[must_use]
    pub fn base_display_rect(&self) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        Rect::from_origin_size(self.alignment_offset(), self.scaled_rotated_content_size())
    }

    /// [`base_display_rect`](Self::base_display_rect) clamped into the container.
    #[must_use]
    pub fn base_inside_display_rect(&self) -> Rect {
        self.base_display_rect().limit_to(self.container_size)
    }

    /// Content region, in unrotated content coordinates, visible at the base transform.
    #[must_use]
    pub fn base_visible_rect(&self) -> Rect {
        self.visible_rect(&Transform::IDENTITY)
    }

    /// Where the content lands in the container under `user`.
    ///
    /// Only the user scale and offset are applied; a user rotation is a
    /// display effect and does not move the content's bounding box.
    #[must_use]
    pub fn display_rect(&self, user: &Transform) -> Rect {
        self.base_display_rect()
            .scale_by(user.scale())
            .translate(user.offset())
    }

    /// Content region, in unrotated content coordinates, visible under `user`.
    #[must_use]
    pub fn visible_rect(&self, user: &Transform) -> Rect {
        if self.is_empty() {
            return Rect::ZERO;
        }
        let viewport = Rect::from_size(self.container_size);
        Rect::from_points(
            self.container_point_to_content_point(user, viewport.top_left()),
            self.container_point_to_content_point(user, viewport.bottom_right()),
        )
        .intersect(&Rect::from_size(self.content_size))
    }

    /// Maps a content point to container coordinates at the base transform.
    #[must_use]
    pub fn content_point_to_base_point(&self, point: Offset) -> Offset {
        if self.is_empty() {
            return point;
        }
        self.alignment_offset()
            + point
                .rotate_in_space(self.content_size, self.rotation)
                .scale_by(self.scale_factor())
    }

    /// Inverse of [`content_point_to_base_point`](Self::content_point_to_base_point).
    #[must_use]
    pub fn base_point_to_content_point(&self, point: Offset) -> Offset {
        if self.is_empty() {
            return point;
        }
        (point - self.alignment_offset())
            .divide_by(self.scale_factor())
            .reverse_rotate_in_space(self.content_size, self.rotation)
    }

    /// Maps a content point to container coordinates under `user`.
    #[must_use]
    pub fn content_point_to_container_point(&self, user: &Transform, point: Offset) -> Offset {
        self.content_point_to_base_point(point).scale_by(user.scale()) + user.offset()
    }

    /// Exact left inverse of
    /// [`content_point_to_container_point`](Self::content_point_to_container_point).
    ///
    /// The result is not clamped to the content bounds.
    #[must_use]
    pub fn container_point_to_content_point(&self, user: &Transform, point: Offset) -> Offset {
        self.base_point_to_content_point((point - user.offset()).divide_by(user.scale()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(1080.0, 1656.0);
    const CONTENT: Size = Size::new(551.0, 1038.0);

    fn all_placements() -> impl Iterator<Item = Placement> {
        FitMode::ALL.into_iter().flat_map(|fit_mode| {
            Alignment::ALL.into_iter().flat_map(move |alignment| {
                Rotation::ALL.into_iter().flat_map(move |rotation| {
                    [LayoutDirection::Ltr, LayoutDirection::Rtl]
                        .into_iter()
                        .map(move |direction| {
                            Placement::new(CONTAINER, CONTENT)
                                .with_fit_mode(fit_mode)
                                .with_alignment(alignment)
                                .with_rotation(rotation)
                                .with_layout_direction(direction)
                        })
                })
            })
        })
    }

    fn mapped_content_rect(placement: &Placement) -> Rect {
        let base = placement.base_transform();
        let content = Rect::from_size(placement.content_size);
        let corners = [
            content.top_left(),
            Offset::new(content.right, content.top),
            Offset::new(content.left, content.bottom),
            content.bottom_right(),
        ]
        .map(|corner| base.map_point(corner, placement.container_size));
        let mut rect = Rect::from_points(corners[0], corners[3]);
        for corner in corners {
            rect = Rect::new(
                rect.left.min(corner.x),
                rect.top.min(corner.y),
                rect.right.max(corner.x),
                rect.bottom.max(corner.y),
            );
        }
        rect
    }

    #[test]
    fn golden_fit_center() {
        let placement = Placement::new(CONTAINER, CONTENT);
        assert_eq!(
            placement.base_display_rect(),
            Rect::new(101.0, 0.0, 980.0, 1656.0)
        );
        assert_eq!(placement.rotate_rectify_offset(), Offset::ZERO);
        assert_eq!(placement.base_transform().offset(), Offset::new(101.0, 0.0));
    }

    #[test]
    fn base_transform_maps_content_onto_display_rect() {
        for placement in all_placements() {
            let mapped = mapped_content_rect(&placement).round();
            assert_eq!(
                mapped,
                placement.base_display_rect(),
                "{:?} {:?} {:?} {:?}",
                placement.fit_mode,
                placement.alignment,
                placement.rotation,
                placement.layout_direction
            );
        }
    }

    #[test]
    fn base_transform_agrees_with_rotate_in_space_mapping() {
        let point = Offset::new(120.0, 700.0);
        for placement in all_placements() {
            let via_transform = placement
                .base_transform()
                .map_point(point, placement.container_size);
            let direct = placement.content_point_to_base_point(point);
            assert!(
                (via_transform - direct).length() < 1e-6,
                "{placement:?}: {via_transform:?} vs {direct:?}"
            );
        }
    }

    #[test]
    fn rectify_offset_only_for_quarter_turns() {
        let placement = Placement::new(CONTAINER, CONTENT).with_fit_mode(FitMode::None);
        assert_eq!(
            placement.with_rotation(Rotation::Deg180).rotate_rectify_offset(),
            Offset::ZERO
        );
        assert_eq!(
            placement.with_rotation(Rotation::Deg90).rotate_rectify_offset(),
            Offset::new(243.5, -243.5)
        );
    }

    #[test]
    fn rotation_swaps_display_extents() {
        let placement = Placement::new(CONTAINER, CONTENT)
            .with_fit_mode(FitMode::None)
            .with_rotation(Rotation::Deg270);
        assert_eq!(placement.rotated_content_size(), Size::new(1038.0, 551.0));
        assert_eq!(
            placement.base_display_rect().size(),
            Size::new(1038.0, 551.0)
        );
    }

    #[test]
    fn rtl_mirrors_start_alignment() {
        let ltr = Placement::new(CONTAINER, CONTENT).with_alignment(Alignment::CENTER_START);
        let rtl = ltr.with_layout_direction(LayoutDirection::Rtl);
        assert_eq!(ltr.base_display_rect().left, 0.0);
        assert_eq!(rtl.base_display_rect().right, CONTAINER.width);
    }

    #[test]
    fn empty_placement_is_identity() {
        for (container, content) in [(Size::ZERO, CONTENT), (CONTAINER, Size::ZERO)] {
            let placement = Placement::new(container, content).with_rotation(Rotation::Deg90);
            assert!(placement.is_empty());
            assert_eq!(placement.base_transform(), Transform::IDENTITY);
            assert_eq!(placement.base_display_rect(), Rect::ZERO);
            assert_eq!(placement.base_visible_rect(), Rect::ZERO);
            let point = Offset::new(3.0, 4.0);
            assert_eq!(placement.content_point_to_base_point(point), point);
        }
    }

    #[test]
    fn fitted_content_is_fully_visible() {
        let visible = Placement::new(CONTAINER, CONTENT).base_visible_rect();
        assert!(visible.left.abs() < 1.0, "{visible:?}");
        assert!(visible.top.abs() < 1.0, "{visible:?}");
        assert!((visible.right - CONTENT.width).abs() < 1.0, "{visible:?}");
        assert!((visible.bottom - CONTENT.height).abs() < 1.0, "{visible:?}");
    }

    #[test]
    fn visible_rect_shrinks_with_user_zoom() {
        let placement = Placement::new(CONTAINER, CONTENT).with_rotation(Rotation::Deg90);
        let user = Transform::new(ScaleFactor::uniform(2.0), Offset::new(-540.0, -828.0));
        let visible = placement.visible_rect(&user);
        let base = placement.base_visible_rect();
        // A quarter turn maps the container's width onto the content's height.
        assert!(
            (visible.height() - base.height() / 2.0).abs() < 1.0,
            "{visible:?} {base:?}"
        );
        assert!((visible.width() - base.width()).abs() < 1.0, "{visible:?}");
        let center = placement.container_point_to_content_point(&user, CONTAINER.center());
        assert!((center - CONTENT.center()).length() < 1.0, "{center:?}");
    }

    #[test]
    fn container_point_round_trip_in_every_rotation() {
        let user = Transform::new(ScaleFactor::uniform(3.5), Offset::new(-200.0, 75.0));
        for rotation in Rotation::ALL {
            let placement = Placement::new(CONTAINER, CONTENT).with_rotation(rotation);
            let point = Offset::new(333.0, 222.0);
            let content = placement.container_point_to_content_point(&user, point);
            let back = placement.content_point_to_container_point(&user, content);
            assert!((back - point).length() < 1e-9, "{rotation:?}: {back:?}");
        }
    }
}
