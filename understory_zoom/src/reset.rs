// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshots of everything that affects placement, and what changed between two of them.

use understory_zoom_geometry::{Insets, Rotation, Size};

use crate::bounds::OffsetPolicy;
use crate::placement::Placement;
use crate::read_mode::ReadMode;
use crate::scales::ScalesPolicy;
use crate::{Alignment, FitMode, LayoutDirection};

/// Aspect ratios closer than this count as equal when content is swapped.
pub const SAME_ASPECT_RATIO_DELTA: f64 = 0.01;

/// Immutable snapshot of the inputs to a reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetParams {
    /// Viewport size.
    pub container_size: Size,
    /// Displayed content size.
    pub content_size: Size,
    /// Full-resolution content size, empty when unknown.
    pub content_origin_size: Size,
    /// Settled content rotation.
    pub rotation: Rotation,
    /// Fit mode.
    pub fit_mode: FitMode,
    /// Alignment.
    pub alignment: Alignment,
    /// Layout direction.
    pub layout_direction: LayoutDirection,
    /// Read mode, if enabled.
    pub read_mode: Option<ReadMode>,
    /// Scales policy.
    pub scales_policy: ScalesPolicy,
    /// See [`OffsetPolicy::limit_offset_within_base_visible_rect`].
    pub limit_offset_within_base_visible_rect: bool,
    /// See [`OffsetPolicy::container_whitespace_multiple`].
    pub container_whitespace_multiple: f64,
    /// See [`OffsetPolicy::container_whitespace`].
    pub container_whitespace: Insets,
}

impl ResetParams {
    /// The placement these parameters describe.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement {
            container_size: self.container_size,
            content_size: self.content_size,
            fit_mode: self.fit_mode,
            alignment: self.alignment,
            layout_direction: self.layout_direction,
            rotation: self.rotation,
        }
    }

    /// The offset policy these parameters describe.
    #[must_use]
    pub fn offset_policy(&self) -> OffsetPolicy {
        OffsetPolicy {
            limit_offset_within_base_visible_rect: self.limit_offset_within_base_visible_rect,
            container_whitespace_multiple: self.container_whitespace_multiple,
            container_whitespace: self.container_whitespace,
        }
    }

    /// Field-by-field comparison with `previous`.
    #[must_use]
    pub fn diff(&self, previous: &Self) -> ResetParamsDiff {
        ResetParamsDiff {
            container_size_changed: self.container_size != previous.container_size,
            content_size_changed: self.content_size != previous.content_size,
            content_origin_size_changed: self.content_origin_size != previous.content_origin_size,
            rotation_changed: self.rotation != previous.rotation,
            fit_mode_changed: self.fit_mode != previous.fit_mode,
            alignment_changed: self.alignment != previous.alignment,
            layout_direction_changed: self.layout_direction != previous.layout_direction,
            read_mode_changed: self.read_mode != previous.read_mode,
            scales_policy_changed: self.scales_policy != previous.scales_policy,
            limit_offset_within_base_visible_rect_changed: self
                .limit_offset_within_base_visible_rect
                != previous.limit_offset_within_base_visible_rect,
            container_whitespace_multiple_changed: self.container_whitespace_multiple
                != previous.container_whitespace_multiple,
            container_whitespace_changed: self.container_whitespace
                != previous.container_whitespace,
        }
    }
}

/// Which fields differ between two [`ResetParams`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetParamsDiff {
    /// Container size differs.
    pub container_size_changed: bool,
    /// Content size differs.
    pub content_size_changed: bool,
    /// Content origin size differs.
    pub content_origin_size_changed: bool,
    /// Rotation differs.
    pub rotation_changed: bool,
    /// Fit mode differs.
    pub fit_mode_changed: bool,
    /// Alignment differs.
    pub alignment_changed: bool,
    /// Layout direction differs.
    pub layout_direction_changed: bool,
    /// Read mode differs.
    pub read_mode_changed: bool,
    /// Scales policy differs.
    pub scales_policy_changed: bool,
    /// Offset limit differs.
    pub limit_offset_within_base_visible_rect_changed: bool,
    /// Whitespace multiple differs.
    pub container_whitespace_multiple_changed: bool,
    /// Whitespace insets differ.
    pub container_whitespace_changed: bool,
}

impl ResetParamsDiff {
    fn changed_fields(&self) -> [bool; 12] {
        [
            self.container_size_changed,
            self.content_size_changed,
            self.content_origin_size_changed,
            self.rotation_changed,
            self.fit_mode_changed,
            self.alignment_changed,
            self.layout_direction_changed,
            self.read_mode_changed,
            self.scales_policy_changed,
            self.limit_offset_within_base_visible_rect_changed,
            self.container_whitespace_multiple_changed,
            self.container_whitespace_changed,
        ]
    }

    fn changed_count(&self) -> usize {
        self.changed_fields().iter().filter(|&&changed| changed).count()
    }

    /// Nothing changed.
    #[must_use]
    pub fn is_not_changed(&self) -> bool {
        self.changed_count() == 0
    }

    /// Only the container size changed.
    #[must_use]
    pub fn is_only_container_size_changed(&self) -> bool {
        self.container_size_changed && self.changed_count() == 1
    }

    /// Only the content size changed.
    #[must_use]
    pub fn is_only_content_size_changed(&self) -> bool {
        self.content_size_changed && self.changed_count() == 1
    }

    /// Only the content origin size changed.
    #[must_use]
    pub fn is_only_content_origin_size_changed(&self) -> bool {
        self.content_origin_size_changed && self.changed_count() == 1
    }

    /// The content size, the content origin size, or both changed, and nothing else.
    #[must_use]
    pub fn is_only_content_size_or_content_origin_size_changed(&self) -> bool {
        let sizes = usize::from(self.content_size_changed)
            + usize::from(self.content_origin_size_changed);
        sizes > 0 && self.changed_count() == sizes
    }

    /// A field that redefines the placement or its policies changed.
    #[must_use]
    pub fn is_policy_changed(&self) -> bool {
        self.rotation_changed
            || self.fit_mode_changed
            || self.alignment_changed
            || self.layout_direction_changed
            || self.read_mode_changed
            || self.scales_policy_changed
            || self.limit_offset_within_base_visible_rect_changed
    }

    /// Picks how the user transform survives the change from `previous` to `current`.
    #[must_use]
    pub fn strategy(
        &self,
        previous: &ResetParams,
        current: &ResetParams,
        context: StrategyContext,
    ) -> ResetStrategy {
        if self.is_not_changed() {
            return ResetStrategy::NoOp;
        }
        if self.is_policy_changed()
            || previous.placement().is_empty()
            || current.placement().is_empty()
        {
            return ResetStrategy::Full;
        }
        if !self.container_size_changed && !self.content_size_changed {
            // Only the origin size or whitespace changed.
            return ResetStrategy::UpdateBounds;
        }
        if context.user_transform_is_initial {
            return ResetStrategy::Full;
        }
        // Origin size and whitespace only move the bounds, which every
        // strategy below recomputes, so they may change alongside.
        match (self.container_size_changed, self.content_size_changed) {
            (true, false) => ResetStrategy::RestoreVisibleCenter,
            (false, true)
                if context.keep_transform_when_same_aspect_ratio_content_size_changed
                    && current.content_size.is_same_aspect_ratio(
                        previous.content_size,
                        SAME_ASPECT_RATIO_DELTA,
                    ) =>
            {
                ResetStrategy::RescaleForContentSize
            }
            _ => ResetStrategy::Full,
        }
    }
}

/// Engine state that influences [`ResetParamsDiff::strategy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrategyContext {
    /// Keep the zoom when content is replaced by a same-aspect version.
    pub keep_transform_when_same_aspect_ratio_content_size_changed: bool,
    /// The user has not moved away from the initial transform.
    pub user_transform_is_initial: bool,
}

/// How a reset treats the current user transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetStrategy {
    /// Nothing to do.
    NoOp,
    /// Recompute everything and return to the initial user transform.
    Full,
    /// Keep the content point at the container center and the composed scale.
    RestoreVisibleCenter,
    /// Keep the visible region across a same-aspect content swap.
    RescaleForContentSize,
    /// Recompute scales and bounds, then clamp the user transform into them.
    UpdateBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ResetParams {
        ResetParams {
            container_size: Size::new(1080.0, 1656.0),
            content_size: Size::new(551.0, 1038.0),
            content_origin_size: Size::ZERO,
            rotation: Rotation::Deg0,
            fit_mode: FitMode::Fit,
            alignment: Alignment::CENTER,
            layout_direction: LayoutDirection::Ltr,
            read_mode: None,
            scales_policy: ScalesPolicy::DYNAMIC,
            limit_offset_within_base_visible_rect: false,
            container_whitespace_multiple: 0.0,
            container_whitespace: Insets::ZERO,
        }
    }

    const ZOOMED: StrategyContext = StrategyContext {
        keep_transform_when_same_aspect_ratio_content_size_changed: true,
        user_transform_is_initial: false,
    };

    fn strategy(current: ResetParams, context: StrategyContext) -> ResetStrategy {
        let previous = params();
        current.diff(&previous).strategy(&previous, &current, context)
    }

    #[test]
    fn diff_predicates() {
        let previous = params();
        assert!(previous.diff(&previous).is_not_changed());

        let container = ResetParams {
            container_size: Size::new(1656.0, 1080.0),
            ..previous
        };
        let diff = container.diff(&previous);
        assert!(diff.is_only_container_size_changed());
        assert!(!diff.is_only_content_size_changed());

        let both = ResetParams {
            content_size: Size::new(1102.0, 2076.0),
            content_origin_size: Size::new(5510.0, 10380.0),
            ..previous
        };
        let diff = both.diff(&previous);
        assert!(diff.is_only_content_size_or_content_origin_size_changed());
        assert!(!diff.is_only_content_size_changed());
        assert!(!diff.is_only_content_origin_size_changed());
    }

    #[test]
    fn nothing_changed_is_a_no_op() {
        assert_eq!(strategy(params(), ZOOMED), ResetStrategy::NoOp);
    }

    #[test]
    fn policy_changes_reset_fully() {
        let current = ResetParams {
            fit_mode: FitMode::Crop,
            ..params()
        };
        assert_eq!(strategy(current, ZOOMED), ResetStrategy::Full);
        let current = ResetParams {
            read_mode: Some(ReadMode::default()),
            ..params()
        };
        assert_eq!(strategy(current, ZOOMED), ResetStrategy::Full);
        let current = ResetParams {
            layout_direction: LayoutDirection::Rtl,
            ..params()
        };
        assert_eq!(strategy(current, ZOOMED), ResetStrategy::Full);
    }

    #[test]
    fn container_change_restores_center_unless_untouched() {
        let current = ResetParams {
            container_size: Size::new(1656.0, 1080.0),
            ..params()
        };
        assert_eq!(strategy(current, ZOOMED), ResetStrategy::RestoreVisibleCenter);
        let untouched = StrategyContext {
            user_transform_is_initial: true,
            ..ZOOMED
        };
        assert_eq!(strategy(current, untouched), ResetStrategy::Full);
    }

    #[test]
    fn content_change_rescales_only_for_same_aspect() {
        let same = ResetParams {
            content_size: Size::new(1102.0, 2076.0),
            ..params()
        };
        assert_eq!(strategy(same, ZOOMED), ResetStrategy::RescaleForContentSize);
        let without_keep = StrategyContext {
            keep_transform_when_same_aspect_ratio_content_size_changed: false,
            ..ZOOMED
        };
        assert_eq!(strategy(same, without_keep), ResetStrategy::Full);
        let different = ResetParams {
            content_size: Size::new(1038.0, 551.0),
            ..params()
        };
        assert_eq!(strategy(different, ZOOMED), ResetStrategy::Full);
    }

    #[test]
    fn origin_size_and_whitespace_update_bounds() {
        let origin = ResetParams {
            content_origin_size: Size::new(5510.0, 10380.0),
            ..params()
        };
        assert_eq!(strategy(origin, ZOOMED), ResetStrategy::UpdateBounds);
        let untouched = StrategyContext {
            user_transform_is_initial: true,
            ..ZOOMED
        };
        assert_eq!(strategy(origin, untouched), ResetStrategy::UpdateBounds);
        let whitespace = ResetParams {
            container_whitespace: Insets::uniform(20.0),
            ..params()
        };
        assert_eq!(strategy(whitespace, ZOOMED), ResetStrategy::UpdateBounds);
    }

    #[test]
    fn origin_size_rides_along_with_size_changes() {
        let container_and_origin = ResetParams {
            container_size: Size::new(1656.0, 1080.0),
            content_origin_size: Size::new(5510.0, 10380.0),
            ..params()
        };
        assert_eq!(
            strategy(container_and_origin, ZOOMED),
            ResetStrategy::RestoreVisibleCenter
        );
        let content_and_origin = ResetParams {
            content_size: Size::new(1102.0, 2076.0),
            content_origin_size: Size::new(5510.0, 10380.0),
            ..params()
        };
        assert!(
            content_and_origin
                .diff(&params())
                .is_only_content_size_or_content_origin_size_changed()
        );
        assert_eq!(
            strategy(content_and_origin, ZOOMED),
            ResetStrategy::RescaleForContentSize
        );
        let container_and_whitespace = ResetParams {
            container_size: Size::new(800.0, 800.0),
            container_whitespace: Insets::uniform(20.0),
            ..params()
        };
        assert_eq!(
            strategy(container_and_whitespace, ZOOMED),
            ResetStrategy::RestoreVisibleCenter
        );
        let both_sizes = ResetParams {
            container_size: Size::new(800.0, 800.0),
            content_size: Size::new(1102.0, 2076.0),
            ..params()
        };
        assert_eq!(strategy(both_sizes, ZOOMED), ResetStrategy::Full);
    }

    #[test]
    fn transitions_through_empty_reset_fully() {
        let empty = ResetParams {
            container_size: Size::ZERO,
            ..params()
        };
        assert_eq!(strategy(empty, ZOOMED), ResetStrategy::Full);
        let previous = empty;
        let current = params();
        assert_eq!(
            current.diff(&previous).strategy(&previous, &current, ZOOMED),
            ResetStrategy::Full
        );
    }
}
