// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum, medium and maximum scales.

use smallvec::SmallVec;
use understory_zoom_geometry::Size;

use crate::placement::Placement;
use crate::{FitMode, ZoomError};

/// Ratio between successive zoom levels when none is configured.
pub const DEFAULT_SCALE_MULTIPLE: f64 = 3.0;

/// How the medium and maximum scales are derived from the minimum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalesPolicy {
    /// `medium = min * multiple`, `max = medium * multiple`.
    Fixed {
        /// Ratio between successive zoom levels.
        multiple: f64,
    },
    /// Like [`ScalesPolicy::Fixed`], but medium is raised to the scale that
    /// fills the container or shows the content at its native resolution.
    Dynamic {
        /// Ratio between successive zoom levels.
        multiple: f64,
    },
}

impl Default for ScalesPolicy {
    fn default() -> Self {
        Self::DYNAMIC
    }
}

impl ScalesPolicy {
    /// [`ScalesPolicy::Fixed`] with [`DEFAULT_SCALE_MULTIPLE`].
    pub const FIXED: Self = Self::Fixed {
        multiple: DEFAULT_SCALE_MULTIPLE,
    };
    /// [`ScalesPolicy::Dynamic`] with [`DEFAULT_SCALE_MULTIPLE`].
    pub const DYNAMIC: Self = Self::Dynamic {
        multiple: DEFAULT_SCALE_MULTIPLE,
    };

    /// Ratio between successive zoom levels.
    #[must_use]
    pub fn multiple(self) -> f64 {
        match self {
            Self::Fixed { multiple } | Self::Dynamic { multiple } => multiple,
        }
    }

    /// Rejects multiples that are not finite or below 1.
    pub fn validate(self) -> Result<Self, ZoomError> {
        let multiple = self.multiple();
        if !multiple.is_finite() || multiple < 1.0 {
            return Err(ZoomError::InvalidScaleMultiple(multiple));
        }
        Ok(self)
    }

    /// Medium scale for `placement` given its minimum and initial scales.
    ///
    /// `content_origin_size` is the full-resolution size of the content, or
    /// an empty size when unknown.
    #[must_use]
    pub fn medium_scale(
        self,
        placement: &Placement,
        content_origin_size: Size,
        min_scale: f64,
        initial_scale: f64,
    ) -> f64 {
        let fixed = min_scale * self.multiple();
        let dynamic = match self {
            Self::Fixed { .. } => fixed,
            Self::Dynamic { .. }
                if placement.fit_mode == FitMode::FillBounds || placement.is_empty() =>
            {
                fixed
            }
            Self::Dynamic { .. } => {
                let rotated = placement.rotated_content_size();
                let fill_scale = FitMode::Crop
                    .scale_factor(rotated, placement.container_size)
                    .scale_x;
                let native_scale = if content_origin_size.is_empty() {
                    1.0
                } else {
                    let origin = content_origin_size.rotate(placement.rotation);
                    finite_or(
                        (origin.width / rotated.width).max(origin.height / rotated.height),
                        1.0,
                    )
                };
                fixed.max(fill_scale).max(native_scale)
            }
        };
        dynamic.max(initial_scale)
    }
}

/// The three scale stops, in final (composed) scale units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    /// Smallest settled scale.
    pub min: f64,
    /// Intermediate stop for double-tap zoom.
    pub medium: f64,
    /// Largest settled scale.
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::ONE
    }
}

impl ScaleBounds {
    /// All three stops at 1.
    pub const ONE: Self = Self {
        min: 1.0,
        medium: 1.0,
        max: 1.0,
    };

    /// Creates bounds from three values in any order.
    #[must_use]
    pub fn sorted(a: f64, b: f64, c: f64) -> Self {
        let mut values = [a, b, c];
        values.sort_by(f64::total_cmp);
        Self {
            min: values[0],
            medium: values[1],
            max: values[2],
        }
    }

    /// Computes the bounds of `placement` under `policy`.
    ///
    /// The minimum is the smaller of the base scale and the fit scale, so the
    /// whole content can always be brought into view. [`FitMode::FillBounds`]
    /// already shows the whole content on both axes at its base scale, which
    /// is its minimum. `initial_scale` is the composed scale the content opens
    /// at, which medium never falls below.
    ///
    /// A medium or maximum that overflows falls back to the stop below it.
    #[must_use]
    pub fn calculate(
        policy: ScalesPolicy,
        placement: &Placement,
        content_origin_size: Size,
        initial_scale: f64,
    ) -> Self {
        if placement.is_empty() {
            return Self::ONE;
        }
        let base_scale = placement.scale_factor().scale_x;
        let min = if placement.fit_mode == FitMode::FillBounds {
            base_scale
        } else {
            base_scale.min(placement.fit_scale())
        };
        let medium = finite_or(
            policy.medium_scale(placement, content_origin_size, min, initial_scale),
            min,
        );
        let max = finite_or(medium * policy.multiple(), medium);
        Self::sorted(min, medium, max)
    }

    /// Clamps `scale` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.min(self.max).max(self.min)
    }

    /// Stops visited by [`calculate_next_step_scale`].
    #[must_use]
    pub fn steps(&self, three_step: bool) -> SmallVec<[f64; 3]> {
        let mut steps = SmallVec::new();
        steps.push(self.min);
        steps.push(self.medium);
        if three_step {
            steps.push(self.max);
        }
        steps
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Returns the first step strictly greater than `current + range_of_error`,
/// wrapping to the first step.
///
/// An empty `steps` slice returns `current`.
#[must_use]
pub fn calculate_next_step_scale(steps: &[f64], current: f64, range_of_error: f64) -> f64 {
    let Some(&first) = steps.first() else {
        return current;
    };
    steps
        .iter()
        .copied()
        .find(|&step| step > current + range_of_error)
        .unwrap_or(first)
}
