// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_zoom_geometry::{ScaleFactor, Size};

/// How content is scaled to the container before any user zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Keep the content at its own size.
    None,
    /// Like [`FitMode::None`] when the content already fits, otherwise like [`FitMode::Fit`].
    Inside,
    /// Scale uniformly so the whole content is visible.
    #[default]
    Fit,
    /// Scale uniformly so the content width matches the container width.
    FillWidth,
    /// Scale uniformly so the content height matches the container height.
    FillHeight,
    /// Scale each axis independently to cover the container exactly.
    FillBounds,
    /// Scale uniformly so the content covers the whole container.
    Crop,
}

impl FitMode {
    /// All seven fit modes.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Inside,
        Self::Fit,
        Self::FillWidth,
        Self::FillHeight,
        Self::FillBounds,
        Self::Crop,
    ];

    /// Scale applied to `content` (already rotated) to place it in `container`.
    ///
    /// Empty content, an empty container, or a ratio that overflows or
    /// underflows yields [`ScaleFactor::ONE`], so the result is always finite
    /// and non-zero.
    #[must_use]
    pub fn scale_factor(self, content: Size, container: Size) -> ScaleFactor {
        if content.is_empty() || container.is_empty() {
            return ScaleFactor::ONE;
        }
        let width_scale = container.width / content.width;
        let height_scale = container.height / content.height;
        let scale = match self {
            Self::None => ScaleFactor::ONE,
            Self::Inside => {
                if content.width <= container.width && content.height <= container.height {
                    ScaleFactor::ONE
                } else {
                    ScaleFactor::uniform(width_scale.min(height_scale))
                }
            }
            Self::Fit => ScaleFactor::uniform(width_scale.min(height_scale)),
            Self::FillWidth => ScaleFactor::uniform(width_scale),
            Self::FillHeight => ScaleFactor::uniform(height_scale),
            Self::FillBounds => ScaleFactor::new(width_scale, height_scale),
            Self::Crop => ScaleFactor::uniform(width_scale.max(height_scale)),
        };
        if scale.is_valid() {
            scale
        } else {
            ScaleFactor::ONE
        }
    }
}
