// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carrying a user transform across placement changes.

use understory_zoom_geometry::{ScaleFactor, Transform};

use crate::bounds::OffsetPolicy;
use crate::placement::Placement;
use crate::scales::ScaleBounds;

/// Rebuilds `last_user` for a new container size.
///
/// The content point at the old container center moves to the new center and
/// the composed scale is kept, clamped into `bounds`. The resulting offset is
/// clamped to the new offset bounds. Returns `last_user` unchanged when the
/// placement did not change.
#[must_use]
pub fn restore_visible_center(
    previous: &Placement,
    current: &Placement,
    last_user: &Transform,
    bounds: &ScaleBounds,
    offset_policy: &OffsetPolicy,
) -> Transform {
    if previous == current {
        return *last_user;
    }
    if previous.is_empty() || current.is_empty() {
        return Transform::IDENTITY;
    }
    let centered = previous.container_point_to_content_point(
        last_user,
        previous.container_size.center(),
    );
    let composed_scale = previous.scale_factor().scale_x * last_user.scale_x();
    let user_scale = bounds.clamp(composed_scale) / current.scale_factor().scale_x;
    let offset = current.container_size.center()
        - current
            .content_point_to_base_point(centered)
            .times(user_scale);
    let offset =
        offset.clamp_to_rect(offset_policy.user_offset_bounds(current, user_scale));
    Transform::new(ScaleFactor::uniform(user_scale), offset)
}

/// Rebuilds `last_user` after the content was replaced by a same-aspect version.
///
/// The composed transform keeps its offset and its scale is multiplied by
/// the old over new content size, so the same region stays visible. Returns
/// `last_user` unchanged when the placement did not change.
#[must_use]
pub fn rescale_for_content_size(
    previous: &Placement,
    current: &Placement,
    last_user: &Transform,
    offset_policy: &OffsetPolicy,
) -> Transform {
    if previous == current {
        return *last_user;
    }
    if previous.is_empty() || current.is_empty() {
        return Transform::IDENTITY;
    }
    let combined = previous.base_transform().compose(last_user);
    let ratio = previous.rotated_content_size().width / current.rotated_content_size().width;
    let rescaled = Transform::new(combined.scale().scale_by(ratio), combined.offset());
    let user = rescaled.decompose(&current.base_transform());
    clamp_user_offset(
        current,
        offset_policy,
        &Transform::new(ScaleFactor::uniform(user.scale_x()), user.offset()),
    )
}

/// Clamps the composed scale of `user` into `bounds`, keeping the content
/// point at the container center fixed, then clamps its offset.
///
/// Returns `user` with only its offset clamped when the scale is in bounds.
#[must_use]
pub fn clamp_user_transform(
    placement: &Placement,
    bounds: &ScaleBounds,
    offset_policy: &OffsetPolicy,
    user: &Transform,
) -> Transform {
    let base_scale = placement.scale_factor().scale_x;
    let composed = base_scale * user.scale_x();
    let clamped = bounds.clamp(composed);
    if clamped == composed {
        return clamp_user_offset(placement, offset_policy, user);
    }
    let user_scale = clamped / base_scale;
    let center = placement.container_size.center();
    let anchor = (center - user.offset()).divide_by(user.scale());
    let offset = center - anchor.times(user_scale);
    clamp_user_offset(
        placement,
        offset_policy,
        &Transform::new(ScaleFactor::uniform(user_scale), offset),
    )
}

/// Clamps the offset of `user` into the offset bounds at its scale.
#[must_use]
pub fn clamp_user_offset(
    placement: &Placement,
    offset_policy: &OffsetPolicy,
    user: &Transform,
) -> Transform {
    let bounds = offset_policy.user_offset_bounds(placement, user.scale_x());
    user.with_offset(user.offset().clamp_to_rect(bounds))
}
