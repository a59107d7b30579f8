// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_zoom_geometry::Transform;

use crate::reset::ResetParams;
use crate::scales::ScaleBounds;

/// Scales and transforms a reset starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialZoom {
    /// Smallest settled composed scale.
    pub min_scale: f64,
    /// Double-tap composed scale.
    pub medium_scale: f64,
    /// Largest settled composed scale.
    pub max_scale: f64,
    /// Placement of the content before user zoom.
    pub base_transform: Transform,
    /// User transform the content opens with.
    pub user_transform: Transform,
}

impl Default for InitialZoom {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl InitialZoom {
    /// Identity transforms and unit scales, used while the container or content is empty.
    pub const ORIGIN: Self = Self {
        min_scale: 1.0,
        medium_scale: 1.0,
        max_scale: 1.0,
        base_transform: Transform::IDENTITY,
        user_transform: Transform::IDENTITY,
    };

    /// Derives the initial zoom from `params`.
    #[must_use]
    pub fn calculate(params: &ResetParams) -> Self {
        let placement = params.placement();
        if placement.is_empty() {
            return Self::ORIGIN;
        }
        let base_transform = placement.base_transform();
        let user_transform = params
            .read_mode
            .and_then(|read_mode| read_mode.user_transform(&placement))
            .unwrap_or(Transform::IDENTITY);
        let initial_scale = base_transform.scale_x() * user_transform.scale_x();
        let bounds = ScaleBounds::calculate(
            params.scales_policy,
            &placement,
            params.content_origin_size,
            initial_scale,
        );
        Self {
            min_scale: bounds.min,
            medium_scale: bounds.medium,
            max_scale: bounds.max,
            base_transform,
            user_transform,
        }
    }

    /// The three scale stops.
    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.min_scale,
            medium: self.medium_scale,
            max: self.max_scale,
        }
    }
}
