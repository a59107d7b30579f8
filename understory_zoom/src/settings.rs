// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_zoom_geometry::{Insets, Rotation};

use crate::animation::AnimationSpec;
use crate::bounds::OffsetPolicy;
use crate::fling::FlingSpec;
use crate::read_mode::ReadMode;
use crate::rubber_band::RubberBand;
use crate::scales::ScalesPolicy;
use crate::{Alignment, FitMode, LayoutDirection, ZoomError};

/// Configuration of a [`Zoomable`](crate::Zoomable).
///
/// Each field has a matching setter on the engine, which validates it and
/// resets the engine when placement is affected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSettings {
    /// How content is fitted to the container.
    pub fit_mode: FitMode,
    /// Where fitted content sits inside the container.
    pub alignment: Alignment,
    /// Direction used to resolve horizontal alignment.
    pub layout_direction: LayoutDirection,
    /// Settled content rotation.
    pub rotation: Rotation,
    /// Read mode for long content, disabled when `None`.
    pub read_mode: Option<ReadMode>,
    /// How medium and maximum scales are derived.
    pub scales_policy: ScalesPolicy,
    /// Cycle through min, medium and max on [`switch_scale`](crate::Zoomable::switch_scale)
    /// instead of min and medium.
    pub three_step_scale: bool,
    /// Let gestures scale past the bounds with resistance.
    pub rubber_band_scale: bool,
    /// Resistance curve used when `rubber_band_scale` is on.
    pub rubber_band: RubberBand,
    /// See [`OffsetPolicy::limit_offset_within_base_visible_rect`].
    pub limit_offset_within_base_visible_rect: bool,
    /// See [`OffsetPolicy::container_whitespace_multiple`].
    pub container_whitespace_multiple: f64,
    /// See [`OffsetPolicy::container_whitespace`].
    pub container_whitespace: Insets,
    /// Keep the zoom when content is replaced by a version with the same aspect ratio.
    pub keep_transform_when_same_aspect_ratio_content_size_changed: bool,
    /// Timing of scale, offset and rotation animations.
    pub animation_spec: AnimationSpec,
    /// Fling physics.
    pub fling_spec: FlingSpec,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            fit_mode: FitMode::Fit,
            alignment: Alignment::CENTER,
            layout_direction: LayoutDirection::Ltr,
            rotation: Rotation::Deg0,
            read_mode: None,
            scales_policy: ScalesPolicy::DYNAMIC,
            three_step_scale: false,
            rubber_band_scale: true,
            rubber_band: RubberBand::default(),
            limit_offset_within_base_visible_rect: false,
            container_whitespace_multiple: 0.0,
            container_whitespace: Insets::ZERO,
            keep_transform_when_same_aspect_ratio_content_size_changed: true,
            animation_spec: AnimationSpec::default(),
            fling_spec: FlingSpec::default(),
        }
    }
}

impl ZoomSettings {
    /// Validates every field that can hold an out-of-range value.
    pub fn validate(&self) -> Result<(), ZoomError> {
        if let Some(read_mode) = self.read_mode {
            read_mode.validate()?;
        }
        self.scales_policy.validate()?;
        self.rubber_band.validate()?;
        self.offset_policy().validate()?;
        self.fling_spec.validate()?;
        Ok(())
    }

    /// The offset-bounding part of the settings.
    #[must_use]
    pub fn offset_policy(&self) -> OffsetPolicy {
        OffsetPolicy {
            limit_offset_within_base_visible_rect: self.limit_offset_within_base_visible_rect,
            container_whitespace_multiple: self.container_whitespace_multiple,
            container_whitespace: self.container_whitespace,
        }
    }
}
